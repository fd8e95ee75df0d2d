//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    SdkConfig,
};

/// 設定ファイルを読み込んでバリデーションする
///
/// # Arguments
/// * `config_path` - JSON 設定ファイルのパス
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_from_file(config_path: &Path) -> Result<SdkConfig, ConfigError> {
    let config = read_from_file(config_path)?;

    config.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!(store = %config.store_name, language = %config.language, "Configuration loaded");

    Ok(config)
}

/// 設定ファイルを読み込む（バリデーションなし）
///
/// 呼び出し側で値を上書きしてから [`SdkConfig::validate`] する場合に使う。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub fn read_from_file(config_path: &Path) -> Result<SdkConfig, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str(&content)?)
}
