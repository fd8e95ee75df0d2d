//! virtusize-i18n
//!
//! Virtusize フィッティングウィジェット向けの翻訳テキスト解決ライブラリ

pub mod config;
pub mod input;
pub mod resolver;
pub mod transport;
pub mod types;

mod test_utils;

// 主要な型を再エクスポート
pub use config::SdkConfig;
pub use resolver::{
    LocalizationResolver,
    LocalizationSession,
    ResolveError,
    ResolvedTextBundle,
};
pub use types::{
    Language,
    StoreIdentifier,
    TextKey,
};
