use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ApiKey, GenerationConfig};
use crate::error::{ConfigError, ServiceError};
use crate::gateways::traits::GenerationGateway;
use crate::prompt::GenerationRequest;

/// Chat-completions client for OpenAI-compatible services
#[derive(Debug, Clone)]
pub struct OpenAiGateway {
    client: Client,
    api_key: ApiKey,
    endpoint: String,
    model: String,
    max_tokens: u32,
    user: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiGateway {
    pub fn new(api_key: ApiKey, config: &GenerationConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", config.api_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            user: config.user.clone(),
        })
    }

    /// Create with the API key from `OPENAI_API_KEY`
    pub fn from_env(config: &GenerationConfig) -> Result<Self, ConfigError> {
        Self::new(ApiKey::from_env()?, config)
    }

    fn classify_status(status: StatusCode, body: &str) -> ServiceError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::InvalidCredentials,
            StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::Timeout,
            _ => ServiceError::Unavailable(format!("HTTP {}: {}", status.as_u16(), body.trim())),
        }
    }

    fn classify_transport(error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Timeout
        } else {
            ServiceError::Unavailable(error.to_string())
        }
    }
}

#[async_trait]
impl GenerationGateway for OpenAiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ServiceError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: request.text(),
            }],
            max_tokens: self.max_tokens,
            user: self.user.as_deref(),
        };

        info!(model = %self.model, "Requesting description from generation service");
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = Self::classify_status(status, &text);
            warn!("Generation service returned {}: {}", status, error);
            return Err(error);
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::Timeout
            } else {
                ServiceError::Unavailable(format!("Failed to parse response: {}", e))
            }
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            warn!("Generation service returned an empty description");
            return Err(ServiceError::EmptyResult);
        }

        debug!("Received {} characters of description", content.chars().count());
        Ok(content)
    }

    fn backend_name(&self) -> &'static str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, PropertyAttributes};
    use crate::prompt;

    fn gateway_for(url: &str, timeout_secs: u64) -> OpenAiGateway {
        let config = GenerationConfig {
            api_url: url.to_string(),
            timeout_secs,
            user: Some("listing-scribe".to_string()),
            ..Default::default()
        };
        OpenAiGateway::new(ApiKey::new("test-key"), &config).unwrap()
    }

    fn request() -> GenerationRequest {
        let attributes = PropertyAttributes {
            property_type: Some("Wohnung".to_string()),
            location: Some("Berlin".to_string()),
            ..Default::default()
        };
        prompt::build(&attributes, Some(Channel::TikTok))
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 1000,
                "user": "listing-scribe"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Moderne Wohnung in Berlin."}}]}"#)
            .create_async()
            .await;

        let content = gateway_for(&server.url(), 5).generate(&request()).await.unwrap();

        assert_eq!(content, "Moderne Wohnung in Berlin.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn blank_content_is_empty_result() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"  \n"}}]}"#)
            .create_async()
            .await;

        let err = gateway_for(&server.url(), 5).generate(&request()).await.unwrap_err();
        assert_eq!(err, ServiceError::EmptyResult);
    }

    #[tokio::test]
    async fn missing_choices_is_empty_result() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = gateway_for(&server.url(), 5).generate(&request()).await.unwrap_err();
        assert_eq!(err, ServiceError::EmptyResult);
    }

    #[tokio::test]
    async fn status_codes_map_to_service_errors() {
        let cases = [
            (401, ServiceError::InvalidCredentials),
            (403, ServiceError::InvalidCredentials),
            (429, ServiceError::RateLimited),
            (504, ServiceError::Timeout),
        ];

        for (status, expected) in cases {
            let mut server = mockito::Server::new_async().await;
            let _m = server
                .mock("POST", "/chat/completions")
                .with_status(status)
                .with_body("{}")
                .create_async()
                .await;

            let err = gateway_for(&server.url(), 5).generate(&request()).await.unwrap_err();
            assert_eq!(err, expected, "status {}", status);
        }
    }

    #[tokio::test]
    async fn server_error_is_unavailable_and_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream down")
            .expect(1)
            .create_async()
            .await;

        let err = gateway_for(&server.url(), 5).generate(&request()).await.unwrap_err();
        assert_eq!(err, ServiceError::Unavailable("HTTP 500: upstream down".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _hold = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let err = gateway_for(&format!("http://{}", addr), 1)
            .generate(&request())
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Timeout);
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let gateway = gateway_for("http://localhost:9/v1/", 5);
        assert_eq!(gateway.endpoint, "http://localhost:9/v1/chat/completions");
        assert!(!format!("{:?}", gateway).contains("test-key"));
    }
}
