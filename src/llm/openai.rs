//! OpenAI 兼容的 chat completion 客户端

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::config::LlmConfig;
use crate::error::LlmError;
use crate::llm::{ChatMessage, LanguageModel, ResponseFormat};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatBody>,
}

#[derive(Serialize)]
struct ResponseFormatBody {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI API client
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn exchange(
        &self,
        messages: Vec<ChatMessage>,
        format: ResponseFormat,
    ) -> Result<Vec<String>, LlmError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            response_format: match format {
                ResponseFormat::JsonObject => Some(ResponseFormatBody {
                    kind: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let text = response.text().await?;
        tracing::debug!(
            model = %self.model,
            "completion response: {}",
            text.chars().take(1000).collect::<String>()
        );

        let completion: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;

        Ok(completion
            .choices
            .into_iter()
            .map(|c| c.message.content.unwrap_or_default())
            .collect())
    }
}

/// 根据配置创建语言模型客户端
pub fn create_language_model(config: &LlmConfig) -> Result<Arc<dyn LanguageModel>, LlmError> {
    if config.api_key.is_empty() {
        tracing::warn!("llm.api_key is empty; requests will be sent without authorization");
    }
    Ok(Arc::new(OpenAiClient::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> LlmConfig {
        LlmConfig {
            base_url: server.uri(),
            api_key: "test-key".into(),
            model: "gpt-3.5-turbo".into(),
            temperature: 0.0,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_exchange_returns_all_choices_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "first"}},
                    {"message": {"role": "assistant", "content": "second"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&config_for(&server)).unwrap();
        let replies = client
            .exchange(
                vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
                ResponseFormat::Text,
            )
            .await
            .unwrap();

        assert_eq!(replies, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_json_mode_sets_response_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "{}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&config_for(&server)).unwrap();
        let replies = client
            .exchange(vec![ChatMessage::user("x")], ResponseFormat::JsonObject)
            .await
            .unwrap();
        assert_eq!(replies, vec!["{}".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_choices_is_not_an_error_here() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&config_for(&server)).unwrap();
        let replies = client
            .exchange(vec![ChatMessage::user("x")], ResponseFormat::Text)
            .await
            .unwrap();
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn test_null_content_becomes_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&config_for(&server)).unwrap();
        let replies = client
            .exchange(vec![ChatMessage::user("x")], ResponseFormat::Text)
            .await
            .unwrap();
        assert_eq!(replies, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&config_for(&server)).unwrap();
        let err = client
            .exchange(vec![ChatMessage::user("x")], ResponseFormat::Text)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LlmError::Status {
                status: 401,
                body: "invalid api key".into()
            }
        );
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&config_for(&server)).unwrap();
        let err = client
            .exchange(vec![ChatMessage::user("x")], ResponseFormat::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9".into(),
            api_key: String::new(),
            model: "m".into(),
            temperature: 0.0,
            timeout_secs: 2,
        };
        let client = OpenAiClient::new(&config).unwrap();
        let err = client
            .exchange(vec![ChatMessage::user("x")], ResponseFormat::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }
}
