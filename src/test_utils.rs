//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される偽のトランスポートを提供します。
#![cfg(test)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::transport::{
    Endpoints,
    HttpResponse,
    Transport,
    TransportError,
    Url,
};

/// Base URL every test resolver points at.
pub(crate) const TEST_BASE_URL: &str = "https://api.virtusize.test";

/// `Endpoints` rooted at [`TEST_BASE_URL`].
pub(crate) fn test_endpoints() -> Endpoints {
    Endpoints::new(TEST_BASE_URL).unwrap_or_else(|e| unreachable!("{e}"))
}

/// Canned reply for one URL.
#[derive(Debug, Clone)]
struct Reply {
    /// Simulated latency
    delay: Duration,
    result: Result<HttpResponse, TransportError>,
}

/// In-memory transport answering from a URL → reply table.
///
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    /// Registered replies
    replies: HashMap<String, Reply>,
    /// URLs requested so far, in order
    requested: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, url: &str, result: Result<HttpResponse, TransportError>) -> Self {
        self.with_delay(url, Duration::ZERO, result)
    }

    pub(crate) fn with_delay(
        mut self,
        url: &str,
        delay: Duration,
        result: Result<HttpResponse, TransportError>,
    ) -> Self {
        self.replies.insert(url.to_string(), Reply { delay, result });
        self
    }

    /// URLs requested so far.
    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        if let Ok(mut urls) = self.requested.lock() {
            urls.push(url.to_string());
        }

        let reply = self
            .replies
            .get(url.as_str())
            .cloned()
            .unwrap_or(Reply { delay: Duration::ZERO, result: Ok(HttpResponse::new(404, "")) });

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}
