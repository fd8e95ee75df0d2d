//! `reqwest` backed transport

use reqwest::header::{
    HeaderMap,
    HeaderValue,
};

use super::{
    HttpResponse,
    Transport,
    TransportError,
    Url,
};
use crate::config::SdkConfig;

/// Header carrying the store's API key.
const API_KEY_HEADER: &str = "x-vs-api-key";

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Pooled HTTP client
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client with the configured timeout and API key.
    ///
    /// # Errors
    /// - [`TransportError::InvalidApiKey`] if the API key is not a valid header value
    /// - [`TransportError::Client`] if the TLS backend cannot be initialized
    pub fn new(config: &SdkConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let value = HeaderValue::from_str(&config.api_key)
                .map_err(|e| TransportError::InvalidApiKey(e.to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("virtusize-i18n/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Request(e.to_string()))?;
        tracing::debug!(%url, status, bytes = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_with_valid_config() {
        let config = SdkConfig { api_key: "key".to_string(), ..SdkConfig::default() };

        assert!(HttpTransport::new(&config).is_ok());
    }

    #[rstest]
    fn test_new_rejects_invalid_api_key() {
        let config = SdkConfig { api_key: "bad\nkey".to_string(), ..SdkConfig::default() };

        let result = HttpTransport::new(&config);

        assert!(matches!(result, Err(TransportError::InvalidApiKey(_))));
    }

    /// Serves one canned HTTP response and hands back the raw request head.
    async fn serve_once(response: &'static str) -> (Url, tokio::task::JoinHandle<String>) {
        use tokio::io::{
            AsyncReadExt,
            AsyncWriteExt,
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}/i18n/en", listener.local_addr().unwrap())).unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0_u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 27\r\nConnection: close\r\n\r\n{\"willFitResultText\": \"Ok\"}",
        )
        .await;
        let config = SdkConfig { api_key: "test-key".to_string(), ..SdkConfig::default() };
        let transport = HttpTransport::new(&config).unwrap();

        let response = transport.get(&url).await.unwrap();
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(response, HttpResponse::ok(r#"{"willFitResultText": "Ok"}"#));
        assert!(request.starts_with("get /i18n/en http/1.1"));
        assert!(request.contains("x-vs-api-key: test-key"));
        assert!(request.contains("user-agent: virtusize-i18n/"));
    }

    #[tokio::test]
    async fn test_get_passes_through_error_status() {
        let (url, server) =
            serve_once("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
        let transport = HttpTransport::new(&SdkConfig::default()).unwrap();

        let response = transport.get(&url).await.unwrap();
        server.await.unwrap();

        assert_eq!(response, HttpResponse::new(503, ""));
    }

    #[tokio::test]
    async fn test_get_refused_connection_is_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}/i18n/en", listener.local_addr().unwrap())).unwrap();
        drop(listener);
        let transport = HttpTransport::new(&SdkConfig::default()).unwrap();

        let result = transport.get(&url).await;

        assert!(matches!(result, Err(TransportError::Request(_))));
    }
}
