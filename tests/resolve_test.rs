//! 翻訳テキスト解決のテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rstest::rstest;
use virtusize_i18n::config::{
    PayloadConfig,
    SdkConfig,
};
use virtusize_i18n::resolver::FetchError;
use virtusize_i18n::transport::{
    Endpoints,
    HttpResponse,
    Transport,
    TransportError,
    Url,
};
use virtusize_i18n::{
    Language,
    LocalizationResolver,
    LocalizationSession,
    ResolveError,
    StoreIdentifier,
    TextKey,
};

const BASE_URL: &str = "https://api.virtusize.test";

/// Answers from a fixed table; unknown URLs answer 404.
#[derive(Debug, Default)]
struct StubTransport {
    replies: HashMap<String, Result<HttpResponse, TransportError>>,
}

impl StubTransport {
    fn with(mut self, path: &str, result: Result<HttpResponse, TransportError>) -> Self {
        self.replies.insert(format!("{BASE_URL}{path}"), result);
        self
    }
}

impl Transport for StubTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.replies.get(url.as_str()).cloned().unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
    }
}

fn resolver(transport: StubTransport) -> LocalizationResolver<StubTransport> {
    LocalizationResolver::new(transport, Endpoints::new(BASE_URL).unwrap())
}

fn store() -> StoreIdentifier {
    StoreIdentifier::new("virtusize").unwrap()
}

fn ok(body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::ok(body))
}

#[tokio::test]
async fn test_english_without_store_overrides() {
    let transport = StubTransport::default()
        .with("/i18n/en", ok(r#"{"willFitResultText": "Your recommended size is "}"#))
        .with("/store/virtusize/i18n", Ok(HttpResponse::no_content()));

    let resolved = resolver(transport).resolve(Language::English, &store()).await.unwrap();

    assert_eq!(resolved.text(TextKey::WillFitResultText).unwrap(), "Your recommended size is ");
}

#[tokio::test]
async fn test_override_equal_to_base_leaves_text_unchanged() {
    let transport = StubTransport::default()
        .with("/i18n/en", ok(r#"{"willFitResultText": "Your recommended size is "}"#))
        .with("/store/virtusize/i18n", ok(r#"{"willFitResultText": "Your recommended size is "}"#));

    let resolved = resolver(transport).resolve(Language::English, &store()).await.unwrap();

    assert_eq!(resolved.text(TextKey::WillFitResultText).unwrap(), "Your recommended size is ");
}

#[tokio::test]
async fn test_japanese_store_override_wins() {
    let transport = StubTransport::default()
        .with(
            "/i18n/ja",
            ok(r#"{"willFitResultText": "おすすめサイズ", "willNotFitResultText": "サイズが合いません"}"#),
        )
        .with("/store/virtusize/i18n", ok(r#"{"willFitResultText": "あなたの体型に人気のサイズ"}"#));

    let resolved = resolver(transport).resolve(Language::Japanese, &store()).await.unwrap();

    assert_eq!(resolved.text(TextKey::WillFitResultText).unwrap(), "あなたの体型に人気のサイズ");
    assert_eq!(resolved.text(TextKey::WillNotFitResultText).unwrap(), "サイズが合いません");
}

#[rstest]
#[case::english(Language::English)]
#[case::japanese(Language::Japanese)]
#[case::korean(Language::Korean)]
#[tokio::test]
async fn test_no_override_content_yields_base_bundle(#[case] language: Language) {
    let base = r#"{"willFitResultText": "base fit", "bodyDataEmptyText": "base empty"}"#;
    for store_reply in [Ok(HttpResponse::no_content()), ok(""), ok("{}"), Ok(HttpResponse::new(404, ""))] {
        let transport = StubTransport::default()
            .with(&format!("/i18n/{}", language.code()), ok(base))
            .with("/store/virtusize/i18n", store_reply);

        let resolved = resolver(transport).resolve(language, &store()).await.unwrap();

        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            serde_json::json!({"willFitResultText": "base fit", "bodyDataEmptyText": "base empty"})
        );
    }
}

#[rstest]
#[case::transport_error(Err(TransportError::Request("connection reset".to_string())))]
#[case::server_error(Ok(HttpResponse::new(502, "Bad Gateway")))]
#[case::malformed(ok("<html>oops</html>"))]
#[case::not_an_object(ok(r#"["willFitResultText"]"#))]
#[tokio::test]
async fn test_override_failure_falls_back_to_base(
    #[case] store_reply: Result<HttpResponse, TransportError>,
) {
    let transport = StubTransport::default()
        .with("/i18n/ko", ok(r#"{"willFitResultText": "추천 사이즈"}"#))
        .with("/store/virtusize/i18n", store_reply);

    let resolved = resolver(transport).resolve(Language::Korean, &store()).await.unwrap();

    assert_eq!(resolved.text(TextKey::WillFitResultText).unwrap(), "추천 사이즈");
}

#[rstest]
#[case::transport_error(Err(TransportError::Request("connection reset".to_string())))]
#[case::not_found(Ok(HttpResponse::new(404, "")))]
#[case::no_content(Ok(HttpResponse::no_content()))]
#[case::malformed(ok("{"))]
#[tokio::test]
async fn test_base_failure_is_reported(#[case] base_reply: Result<HttpResponse, TransportError>) {
    let transport = StubTransport::default()
        .with("/i18n/en", base_reply)
        .with("/store/virtusize/i18n", ok(r#"{"willFitResultText": "Fits"}"#));

    let result = resolver(transport).resolve(Language::English, &store()).await;

    assert!(matches!(result, Err(ResolveError::BaseFetchFailed(_))), "got {result:?}");
}

#[tokio::test]
async fn test_base_status_is_kept_in_error() {
    let transport = StubTransport::default().with("/i18n/en", Ok(HttpResponse::new(503, "")));

    let result = resolver(transport).resolve(Language::English, &store()).await;

    let Err(ResolveError::BaseFetchFailed(FetchError::Status(status))) = result else {
        panic!("expected status failure, got {result:?}");
    };
    assert_eq!(status, 503);
}

#[tokio::test]
async fn test_incomplete_base_reports_missing_key() {
    let transport = StubTransport::default()
        .with("/i18n/en", ok(r#"{"willFitResultText": "Fits"}"#))
        .with("/store/virtusize/i18n", ok(r#"{"bodyDataEmptyText": "Only in override"}"#));

    let resolved = resolver(transport).resolve(Language::English, &store()).await.unwrap();

    assert!(matches!(
        resolved.text(TextKey::BodyDataEmptyText),
        Err(ResolveError::MissingKey(TextKey::BodyDataEmptyText))
    ));
    assert!(resolved.missing_keys().contains(&TextKey::BodyDataEmptyText));
}

#[tokio::test]
async fn test_session_from_config_with_nested_payloads() {
    let transport = StubTransport::default()
        .with(
            "/i18n/ja",
            ok(r#"{"keys": {"apparel": {"inpage": {"willFitResultText": "おすすめサイズ"}}}}"#),
        )
        .with(
            "/store/virtusize/i18n",
            ok(r#"{"inpage": {"willFitResultText": "あなたの体型に人気のサイズ"}}"#),
        );
    let config = SdkConfig {
        api_key: "key".to_string(),
        store_name: "virtusize".to_string(),
        language: Language::Japanese,
        api_base_url: Some(BASE_URL.to_string()),
        payload: PayloadConfig {
            base_key_path: Some("keys.apparel.inpage".to_string()),
            override_key_path: Some("inpage".to_string()),
        },
        ..SdkConfig::default()
    };
    let mut session = LocalizationSession::from_config(&config, transport).unwrap();

    let resolved = session.refresh().await.unwrap();

    assert_eq!(resolved.text(TextKey::WillFitResultText).unwrap(), "あなたの体型に人気のサイズ");
}
