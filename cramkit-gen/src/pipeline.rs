//! The document-to-flashcards pipeline.
//!
//! Stages run strictly in order: input validation, extraction, sanitization,
//! one generation call, response parsing, draft validation. Any stage failure
//! aborts the invocation; there are no retries and no partial results.

use crate::extract::extract_text;
use crate::openai::{ChatModel, ChatRequest, Message, OpenAiClient};
use crate::prompt::{
    generation_prompt, CHAT_MAX_TOKENS, CHAT_TEMPERATURE, REQUESTED_CARDS, SYSTEM_PROMPT,
};
use crate::sanitize::{sanitize_subject, sanitize_text};
use crate::source::MAX_FILE_BYTES;
use crate::{GenConfig, GenError, SourceFile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An unvalidated-no-more flashcard produced by the model and accepted by the
/// validation stage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashcardDraft {
    pub front: String,
    pub back: String,
    pub difficulty: u8,
}

pub const DIFFICULTY_DEFAULT: u8 = 3;

/// A progress checkpoint: human-readable stage label plus percent complete.
#[derive(Clone, Debug)]
pub struct Progress {
    pub stage: &'static str,
    pub percent: u8,
}

/// Side-channel only; never affects control flow.
pub type ProgressFn = dyn Fn(Progress) + Send + Sync;

pub struct Generator {
    model: Arc<dyn ChatModel>,
    config: GenConfig,
}

impl Generator {
    pub fn new(config: GenConfig) -> Result<Self, GenError> {
        let client = OpenAiClient::new(config.clone())?;
        Ok(Self { model: Arc::new(client), config })
    }

    /// Swap in a different transport, e.g. a scripted model in tests.
    pub fn with_model(model: Arc<dyn ChatModel>, config: GenConfig) -> Self {
        Self { model, config }
    }

    /// Run the whole pipeline for one uploaded file. On success, between one
    /// and [`REQUESTED_CARDS`] validated drafts; never an empty success.
    pub async fn generate(
        &self,
        file: &SourceFile,
        subject: &str,
        progress: Option<&ProgressFn>,
    ) -> Result<Vec<FlashcardDraft>, GenError> {
        validate_input(file, subject)?;

        report(progress, "Extracting text from document...", 20);
        let extracted = extract_text(file, self.model.as_ref(), &self.config).await?;

        let text = sanitize_text(&extracted);
        let subject = sanitize_subject(subject);

        report(progress, "Generating flashcards with AI...", 60);
        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(generation_prompt(&subject, &text)),
            ],
            temperature: Some(CHAT_TEMPERATURE),
            max_tokens: Some(CHAT_MAX_TOKENS),
        };
        let reply = self.model.complete(request).await?;

        report(progress, "Finalizing flashcards...", 90);
        let drafts = validate_drafts(parse_reply(&reply)?)?;

        report(progress, "Complete!", 100);
        Ok(drafts)
    }
}

fn report(progress: Option<&ProgressFn>, stage: &'static str, percent: u8) {
    if let Some(cb) = progress {
        cb(Progress { stage, percent });
    }
}

fn validate_input(file: &SourceFile, subject: &str) -> Result<(), GenError> {
    if file.bytes.len() > MAX_FILE_BYTES {
        return Err(GenError::InvalidInput(format!(
            "file size must be less than {} MB",
            MAX_FILE_BYTES / 1024 / 1024
        )));
    }
    if !file.is_allowed_type() {
        return Err(GenError::InvalidInput(format!(
            "file type of '{}' is not supported",
            file.name
        )));
    }
    if subject.trim().is_empty() {
        return Err(GenError::InvalidInput("subject is required".into()));
    }
    Ok(())
}

/// Strip optional code-fence wrapping and parse the reply as a JSON array.
fn parse_reply(reply: &str) -> Result<Vec<serde_json::Value>, GenError> {
    let mut content = reply.trim().to_string();
    if content.starts_with("```") {
        content = content.replace("```json", "");
        content = content.replace("```", "");
    }

    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| GenError::MalformedResponse(format!("not valid JSON: {e}")))?;
    match value {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(GenError::MalformedResponse("expected a JSON array".into())),
    }
}

/// Keep entries with non-empty front and back strings; coerce difficulty into
/// [1,5] with 3 as the fallback; cap the batch at the requested size.
fn validate_drafts(items: Vec<serde_json::Value>) -> Result<Vec<FlashcardDraft>, GenError> {
    let mut drafts = Vec::new();
    for item in items {
        let front = item.get("front").and_then(|v| v.as_str()).unwrap_or("").trim();
        let back = item.get("back").and_then(|v| v.as_str()).unwrap_or("").trim();
        if front.is_empty() || back.is_empty() {
            continue;
        }
        drafts.push(FlashcardDraft {
            front: front.to_string(),
            back: back.to_string(),
            difficulty: coerce_difficulty(item.get("difficulty")),
        });
    }

    if drafts.is_empty() {
        return Err(GenError::NoValidCards);
    }
    drafts.truncate(REQUESTED_CARDS);
    Ok(drafts)
}

fn coerce_difficulty(value: Option<&serde_json::Value>) -> u8 {
    let n = match value {
        Some(serde_json::Value::Number(n)) => {
            n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))
        }
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if (1..=5).contains(&n) => n as u8,
        _ => DIFFICULTY_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn difficulty_coercion_table() {
        assert_eq!(coerce_difficulty(Some(&json!(0))), 3);
        assert_eq!(coerce_difficulty(Some(&json!(6))), 3);
        assert_eq!(coerce_difficulty(Some(&json!("abc"))), 3);
        assert_eq!(coerce_difficulty(None), 3);
        assert_eq!(coerce_difficulty(Some(&json!(null))), 3);
        for d in 1..=5 {
            assert_eq!(coerce_difficulty(Some(&json!(d))), d as u8);
        }
        assert_eq!(coerce_difficulty(Some(&json!("4"))), 4);
        assert_eq!(coerce_difficulty(Some(&json!(2.9))), 2);
    }

    #[test]
    fn parse_strips_code_fences() {
        let fenced = "```json\n[{\"front\":\"q\",\"back\":\"a\"}]\n```";
        let items = parse_reply(fenced).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn parse_rejects_non_arrays() {
        assert!(matches!(
            parse_reply("{\"front\":\"q\"}"),
            Err(GenError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_reply("not json at all"),
            Err(GenError::MalformedResponse(_))
        ));
    }

    #[test]
    fn validation_drops_incomplete_entries_and_caps_batch() {
        let items = vec![
            json!({"front": "q1", "back": "a1", "difficulty": 2}),
            json!({"front": "", "back": "a2"}),
            json!({"front": "q3"}),
            json!({"front": "q4", "back": "a4"}),
            json!({"front": "q5", "back": "a5"}),
            json!({"front": "q6", "back": "a6"}),
            json!({"front": "q7", "back": "a7"}),
            json!({"front": "q8", "back": "a8"}),
        ];
        let drafts = validate_drafts(items).unwrap();
        assert_eq!(drafts.len(), REQUESTED_CARDS);
        assert_eq!(drafts[0].difficulty, 2);
        assert_eq!(drafts[1].difficulty, DIFFICULTY_DEFAULT);
    }

    #[test]
    fn validation_fails_when_nothing_survives() {
        let items = vec![json!({"front": "", "back": ""}), json!({})];
        assert!(matches!(validate_drafts(items), Err(GenError::NoValidCards)));
    }
}
