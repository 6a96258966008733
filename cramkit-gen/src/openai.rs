//! Minimal chat-completion wire types and HTTP client.
//!
//! The hosted model sits behind the [`ChatModel`] trait so the pipeline can be
//! exercised against a scripted stand-in in tests.

use crate::{GenConfig, GenError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Clone, Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: Content,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: Content::Text(content.into()) }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: Content::Text(content.into()) }
    }

    /// A user message pairing an instruction with one inline base64 image.
    pub fn user_with_image(text: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl { image_url: ImageUrl { url: data_url.into() } },
            ]),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// One request, one reply: the first choice's message content.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, GenError>;
}

pub struct OpenAiClient {
    http: reqwest::Client,
    config: GenConfig,
}

impl OpenAiClient {
    pub fn new(config: GenConfig) -> Result<Self, GenError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, GenError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        log::debug!("chat completion request to {url} (model {})", request.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| GenError::MalformedResponse("empty completion".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_serializes_flat() {
        let msg = Message::user("hello");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["content"], "hello");
    }

    #[test]
    fn image_message_serializes_as_parts() {
        let msg = Message::user_with_image("read this", "data:image/png;base64,AAAA");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["content"][0]["type"], "text");
        assert_eq!(v["content"][1]["type"], "image_url");
        assert_eq!(v["content"][1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn omitted_tuning_fields_are_skipped() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![],
            temperature: None,
            max_tokens: Some(100),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("temperature").is_none());
        assert_eq!(v["max_tokens"], 100);
    }
}
