use std::time::Duration;

/// Hosted-model connection settings. The credential is injected here by the
/// caller; nothing in this crate embeds or reads one on its own.
#[derive(Clone, Debug)]
pub struct GenConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub timeout: Duration,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

impl GenConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
