use crate::error::{Result, ScrapeError};
use crate::extract::ExtractionClient;
use crate::extract::prompt::{SYSTEM_ROLE, build_user_prompt};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default OpenAI API base
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat completions client for OpenAI-compatible APIs
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiClient {
    /// Create a client for the default API base
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_api_base(api_key, model, OPENAI_API_BASE.to_string())
    }

    /// Create a client for a custom API base (proxies, compatible servers, tests)
    pub fn with_api_base(api_key: String, model: String, api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl ExtractionClient for OpenAiClient {
    async fn extract(&self, chunk: &str) -> Result<String> {
        let prompt = build_user_prompt(chunk);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_ROLE,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        ::log::trace!("Sending {} byte prompt to {}", prompt.len(), self.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScrapeError::Extraction(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Extraction(format!(
                "model API returned {status}: {body}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScrapeError::Extraction(format!("malformed completion: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ScrapeError::Extraction("completion has no message content".to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_extract_returns_message_content() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({"model": "gpt-3.5-turbo"})),
                Matcher::Regex("experienced news article scraper".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{"message": {"role": "assistant", "content": "```json\n[]\n```"}}]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = OpenAiClient::with_api_base(
            "test-key".to_string(),
            DEFAULT_MODEL.to_string(),
            format!("{}/", server.url()),
        );
        let text = client.extract("<a href=\"/a\">A</a>").await.unwrap();

        assert_eq!(text, "```json\n[]\n```");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_prompt_carries_chunk() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::Regex(r#"unique-chunk-marker"#.to_string()))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"[]"}}]}"#)
            .create_async()
            .await;

        let client =
            OpenAiClient::with_api_base("k".to_string(), "m".to_string(), server.url());
        client.extract("unique-chunk-marker").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_is_extraction_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let client =
            OpenAiClient::with_api_base("k".to_string(), "m".to_string(), server.url());
        match client.extract("chunk").await {
            Err(ScrapeError::Extraction(message)) => {
                assert!(message.contains("429"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_extraction_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client =
            OpenAiClient::with_api_base("k".to_string(), "m".to_string(), server.url());
        let result = client.extract("chunk").await;
        assert!(matches!(result, Err(ScrapeError::Extraction(_))));
    }

    #[test]
    fn test_model_name() {
        let client = OpenAiClient::new("k".to_string(), DEFAULT_MODEL.to_string());
        assert_eq!(client.model(), "gpt-3.5-turbo");
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }
}
