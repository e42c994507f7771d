use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::LookupError, model::JokeText, provider::http::get_json};

use super::JokeSource;

const SERVICE: &str = "chucknorris.io";

/// Random jokes from api.chucknorris.io.
#[derive(Debug, Clone)]
pub struct ChuckNorrisJokes {
    http: Client,
    url: String,
    /// The service only serves English, but the translator's source may be configured.
    language: String,
}

impl ChuckNorrisJokes {
    pub fn new(http: Client, url: String, language: String) -> Self {
        Self { http, url, language }
    }
}

#[async_trait]
impl JokeSource for ChuckNorrisJokes {
    async fn random_joke(&self) -> Result<JokeText, LookupError> {
        let parsed: CnJoke = get_json(&self.http, SERVICE, &self.url, &[]).await?;

        let original = parsed
            .value
            .filter(|v| !v.trim().is_empty())
            .ok_or(LookupError::NotFound(SERVICE))?;

        Ok(JokeText { original, language: self.language.clone() })
    }
}

#[derive(Debug, Deserialize)]
struct CnJoke {
    #[serde(default)]
    value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn reads_joke_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jokes/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": [],
                "icon_url": "https://api.chucknorris.io/img/avatar/chuck-norris.png",
                "id": "abc123",
                "url": "https://api.chucknorris.io/jokes/abc123",
                "value": "Chuck Norris can divide by zero."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let jokes =
            ChuckNorrisJokes::new(Client::new(), format!("{}/jokes/random", server.uri()), "en".into());
        let joke = jokes.random_joke().await.expect("joke");

        assert_eq!(joke.original, "Chuck Norris can divide by zero.");
        assert_eq!(joke.language, "en");
    }

    #[tokio::test]
    async fn keeps_fetched_text_byte_for_byte() {
        let fetched = "  Chuck Norris can hear sign language.\n";
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": fetched })))
            .mount(&server)
            .await;

        let jokes = ChuckNorrisJokes::new(Client::new(), server.uri(), "en".into());
        let joke = jokes.random_joke().await.expect("joke");

        assert_eq!(joke.original, fetched);
    }

    #[tokio::test]
    async fn blank_value_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x", "value": "  " })))
            .mount(&server)
            .await;

        let jokes = ChuckNorrisJokes::new(Client::new(), server.uri(), "en".into());
        assert!(jokes.random_joke().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn slow_provider_times_out_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "value": "too late" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let http = Client::builder().timeout(Duration::from_millis(50)).build().expect("client");
        let jokes = ChuckNorrisJokes::new(http, server.uri(), "en".into());

        let err = jokes.random_joke().await.unwrap_err();
        match err {
            LookupError::Transport(TransportError::Request { source, .. }) => assert!(source.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
