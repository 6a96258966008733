pub mod config;
pub mod course;
pub mod error;
pub mod extract;
pub mod openai;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod source;

pub use config::GenConfig;
pub use course::suggest_course;
pub use error::GenError;
pub use openai::{ChatModel, OpenAiClient};
pub use pipeline::{FlashcardDraft, Generator, Progress, ProgressFn};
pub use source::{FileKind, SourceFile};
