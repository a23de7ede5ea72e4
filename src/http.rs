//! Thin request/response plumbing shared by both API clients.
//!
//! One request in, the full response body out. Non-2xx statuses, timeouts,
//! and connection failures are surfaced as distinct error variants so retry
//! loops can log something meaningful.

use crate::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }

    /// POST a JSON body and return the response body as text.
    ///
    /// `timeout` overrides the client default for long-running calls
    /// (generation requests use a 180 second deadline).
    pub async fn post_json<Req: Serialize>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Req,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request to {}: {}", url, e);
            Error::from_reqwest(e)
        })?;

        Self::collect_body(response).await
    }

    /// GET a URL and return the response body as text.
    pub async fn get_text(&self, url: &str, headers: &[(&str, &str)]) -> Result<String> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request to {}: {}", url, e);
            Error::from_reqwest(e)
        })?;

        Self::collect_body(response).await
    }

    async fn collect_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await.map_err(Error::from_reqwest)?;

        if !status.is_success() {
            tracing::error!("API error (status {}): {}", status, body);
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_text_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let executor = RequestExecutor::new();
        let body = executor
            .get_text(&format!("{}/ping", server.uri()), &[])
            .await
            .unwrap();
        assert_eq!(body, "pong");
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fail"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let executor = RequestExecutor::new();
        let err = executor
            .get_text(&format!("{}/fail", server.uri()), &[])
            .await
            .unwrap_err();
        match err {
            Error::Transport { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "secret"))
            .and(wiremock::matchers::body_string_contains("\"model\""))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let executor = RequestExecutor::new();
        let body = serde_json::json!({ "model": "test" });
        executor
            .post_json(
                &format!("{}/v1/messages", server.uri()),
                &[("x-api-key", "secret")],
                &body,
                Some(Duration::from_secs(5)),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_network_error() {
        // Port 1 is essentially guaranteed to refuse connections.
        let executor = RequestExecutor::new();
        let err = executor
            .get_text("http://127.0.0.1:1/unreachable", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
