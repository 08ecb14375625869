//! OpenRouter API Provider.
//!
//! Implements the `LLMProvider` trait for OpenRouter's OpenAI-compatible
//! Chat Completions API.

use super::provider::LLMProvider;
use super::types::{CompletionResponse, GenerationParams, Message, Role, Usage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Sent as `X-Title` so requests are attributed on the OpenRouter dashboard
const APP_TITLE: &str = "Lesson Generator";

/// OpenRouter Provider configuration and state.
pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenRouterProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }
}

#[async_trait]
impl LLMProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn completion(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<CompletionResponse> {
        let request = ChatRequest {
            model: &params.model,
            messages: messages.iter().map(ApiMessage::from).collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenRouter")?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "OpenRouter API error: {} - {}",
                status.as_u16(),
                error_text
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter response")?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .context("No choices returned from OpenRouter")?;

        Ok(CompletionResponse {
            content: choice.message.content,
            usage: chat_response.usage.map(Usage::from),
        })
    }
}

// -----------------------------------------------------------------------------
// OpenRouter DTOs (Data Transfer Objects)
// -----------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a Message> for ApiMessage<'a> {
    fn from(msg: &'a Message) -> Self {
        Self {
            role: match msg.role {
                Role::System => "system",
                Role::User => "user",
            },
            content: &msg.content,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

impl From<ApiUsage> for Usage {
    fn from(u: ApiUsage) -> Self {
        Self {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::LlmClient;
    use crate::llm::types::ContentSource;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

    /// Serve a fixed reply on a local port, recording each request
    async fn serve(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let seen = Arc::clone(&captured);
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = Arc::clone(&seen);
                let reply = reply.clone();
                async move {
                    seen.lock().unwrap().push((headers, body));
                    (status, Json(reply))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/v1/chat/completions"), captured)
    }

    fn provider(url: String) -> OpenRouterProvider {
        OpenRouterProvider::new("test-key".to_string(), url, Duration::from_secs(5)).unwrap()
    }

    async fn fallback_reason(url: String) -> String {
        let client = LlmClient::new(Arc::new(provider(url)), GenerationParams::default());
        let generated = client.generate_content("Topic: Comets\n", None).await;
        assert!(generated.text.contains("Comets"));
        match generated.source {
            ContentSource::Fallback { reason } => reason,
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_completion_over_http() {
        let reply = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"title\": \"Comets\"}"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
        });
        let (url, captured) = serve(StatusCode::OK, reply).await;

        let messages = vec![Message::system("be brief"), Message::user("Comets")];
        let response = provider(url)
            .completion(&messages, &GenerationParams::default())
            .await
            .unwrap();
        assert_eq!(response.content, "{\"title\": \"Comets\"}");
        assert_eq!(response.usage.unwrap().total_tokens, 17);

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (headers, body) = &requests[0];
        assert_eq!(headers["authorization"], "Bearer test-key");
        assert_eq!(headers["x-title"], "Lesson Generator");
        assert!(headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json"));

        assert_eq!(body["model"], "google/gemini-2.0-flash");
        assert_eq!(body["max_tokens"], 4000);
        let temperature = body["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Comets");
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let (url, _) = serve(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": {"message": "upstream exploded"}}),
        )
        .await;

        let err = provider(url.clone())
            .completion(&[Message::user("x")], &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));

        let reason = fallback_reason(url).await;
        assert!(reason.contains("500"));
        assert!(reason.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_empty_choices_falls_back() {
        let (url, _) = serve(StatusCode::OK, json!({"choices": []})).await;
        let reason = fallback_reason(url).await;
        assert!(reason.contains("No choices"));
    }

    #[tokio::test]
    async fn test_null_content_falls_back() {
        let reply = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        let (url, _) = serve(StatusCode::OK, reply).await;
        let reason = fallback_reason(url).await;
        assert!(reason.contains("Failed to parse"));
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::system("be nice"), Message::user("hello")];
        let params = GenerationParams::default();
        let request = ChatRequest {
            model: &params.model,
            messages: messages.iter().map(ApiMessage::from).collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "google/gemini-2.0-flash");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_response_without_usage() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices[0].message.content, "hi");
    }
}
