use crate::{
    config::Config,
    errors::{ChatError, ChatResult},
    logging::log_api_call,
    models::{AnswerResponse, ApiCallLog},
};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::Client;
use std::time::{Duration, Instant};

/// Anything that can turn a user message into an answer.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn send(&self, message: &str) -> ChatResult<AnswerResponse>;
}

/// HTTP client for the question-answering endpoint.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    client: Client,
    base_url: String,
}

impl AnswerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> ChatResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The message is appended to the base path as-is; percent-encoding is
    /// left to the URL parser.
    pub fn answer_url(&self, message: &str) -> String {
        format!("{}{}", self.base_url, message)
    }

    async fn fetch(&self, url: &str) -> ChatResult<(u16, AnswerResponse)> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ChatError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ChatError::transport(format!("Failed to read response body: {}", e)))?;

        let answer = serde_json::from_slice::<AnswerResponse>(&bytes)
            .map_err(|e| ChatError::decode(format!("Failed to parse answer: {}", e)))?;

        Ok((status.as_u16(), answer))
    }
}

#[async_trait]
impl AnswerSource for AnswerClient {
    async fn send(&self, message: &str) -> ChatResult<AnswerResponse> {
        let url = self.answer_url(message);
        debug!("GET {}", url);

        let started = Instant::now();
        let result = self.fetch(&url).await;

        let response_status = match &result {
            Ok((status, _)) => *status,
            Err(ChatError::Status { status, .. }) => *status,
            Err(_) => 0,
        };
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: url,
            request_summary: format!("GET {} chars", message.chars().count()),
            response_status,
            response_time_ms: started.elapsed().as_millis(),
        });

        result.map(|(_, answer)| answer).map_err(|e| {
            warn!("Answer request failed: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> AnswerClient {
        AnswerClient::new(format!("{}/answer/", server.uri()))
    }

    #[test]
    fn test_answer_url_appends_raw_message() {
        let client = AnswerClient::new("http://bot.local:8060/answer/");
        assert_eq!(
            client.answer_url("Hello there"),
            "http://bot.local:8060/answer/Hello there"
        );
    }

    #[tokio::test]
    async fn test_send_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/Hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "x1",
                "choices": [{"text": " \"Hi there!\" "}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client.send("Hello").await.unwrap();

        assert_eq!(response.id, "x1");
        assert_eq!(response.first_answer().as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn test_send_percent_encodes_spaces_in_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/Hello%20there"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "x2",
                "choices": [{"text": "General Kenobi"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client.send("Hello there").await.unwrap();
        assert_eq!(response.id, "x2");
    }

    #[tokio::test]
    async fn test_send_empty_choices_is_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/anything"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "x3", "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client.send("anything").await.unwrap();
        assert!(response.choices.is_empty());
        assert_eq!(response.first_answer(), None);
    }

    #[tokio::test]
    async fn test_send_non_success_status_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/boom"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.send("boom").await.unwrap_err();

        assert!(err.is_transport());
        match err {
            ChatError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_malformed_json_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 7"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.send("garbled").await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_send_schema_mismatch_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/legacy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "old shape" })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.send("legacy").await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_send_connection_refused_is_transport_error() {
        // Grab a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = AnswerClient::new(format!("http://127.0.0.1:{}/answer/", port));
        let err = client.send("Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout_from_config() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/answer/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "x4", "choices": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let config = Config {
            base_url: format!("{}/answer/", mock_server.uri()),
            request_timeout_secs: Some(1),
            ..Config::default()
        };
        let client = AnswerClient::from_config(&config).unwrap();
        let err = client.send("slow").await.unwrap_err();
        assert!(err.is_transport());
    }
}
