//! Command line entry point: resolves widget texts once and prints them as JSON.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use virtusize_i18n::config::{
    self,
    ConfigError,
};
use virtusize_i18n::{
    Language,
    LocalizationResolver,
    ResolveError,
    SdkConfig,
    StoreIdentifier,
};

/// Resolve the localized texts of the Virtusize widget for a store.
#[derive(Parser, Debug)]
#[command(name = "virtusize-i18n", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Language to resolve (en, ja, ko); defaults to the configured one
    #[arg(short, long)]
    language: Option<Language>,

    /// Store name; defaults to the configured one
    #[arg(short, long)]
    store: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// Errors that end the process with a failure status
#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to serialize texts: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads the config file and applies the command line overrides before validating.
fn prepare_config(cli: &Cli) -> Result<(SdkConfig, StoreIdentifier), ConfigError> {
    let mut sdk_config = config::read_from_file(&cli.config)?;
    if let Some(language) = cli.language {
        sdk_config.language = language;
    }
    if let Some(store) = &cli.store {
        sdk_config.store_name.clone_from(store);
    }
    sdk_config.validate().map_err(ConfigError::ValidationErrors)?;

    let store = sdk_config.store().map_err(|e| {
        ConfigError::ValidationErrors(vec![config::ValidationError::new("storeName", e.to_string())])
    })?;
    Ok((sdk_config, store))
}

/// Loads the configuration, resolves and writes the bundle to stdout.
async fn run(cli: &Cli) -> Result<(), CliError> {
    let (sdk_config, store) = prepare_config(cli)?;
    let resolver = LocalizationResolver::http(&sdk_config)?;
    let resolved = resolver.resolve(sdk_config.language, &store).await?;

    let mut stdout = std::io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut stdout, &resolved)?;
    } else {
        serde_json::to_writer(&mut stdout, &resolved)?;
    }
    writeln!(stdout)?;

    Ok(())
}
