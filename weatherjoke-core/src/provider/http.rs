use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{Config, error::TransportError};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client; the timeout bounds every stage since nothing is retried.
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// GET `url` with `query` and decode a JSON body.
///
/// Connection failures, timeouts, non-2xx statuses and undecodable bodies all
/// come back as [`TransportError`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, TransportError> {
    tracing::debug!(service, url, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| TransportError::Request { service, source })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| TransportError::Request { service, source })?;

    if !status.is_success() {
        return Err(TransportError::Status { service, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| TransportError::Decode { service, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[derive(Debug, Deserialize)]
    struct Echo {
        ok: bool,
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
    }

    #[tokio::test]
    async fn decodes_success_body_and_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/echo"))
            .and(query_param("q", "a b"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/echo", server.uri());
        let echo: Echo = get_json(&Client::new(), "echo", &url, &[("q", "a b")]).await.expect("decoded");
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let err = get_json::<Echo>(&Client::new(), "echo", &server.uri(), &[]).await.unwrap_err();
        match err {
            TransportError::Status { status, body, .. } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "down for maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = get_json::<Echo>(&Client::new(), "echo", &server.uri(), &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode { service: "echo", .. }));
    }
}
