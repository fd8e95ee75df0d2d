//! Widget session configuration
/// Config file loader
mod loader;
/// Configuration types and validation
mod types;

pub use loader::{
    load_from_file,
    read_from_file,
};
pub use types::{
    ConfigError,
    Environment,
    PayloadConfig,
    SdkConfig,
    ValidationError,
};
