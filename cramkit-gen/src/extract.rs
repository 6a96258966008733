//! Text extraction, dispatched by detected file kind.

use crate::openai::{ChatModel, ChatRequest, Message};
use crate::prompt::{VISION_MAX_TOKENS, VISION_PROMPT};
use crate::{FileKind, GenConfig, GenError, SourceFile};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Extraction (and later the whole pipeline) refuses to proceed with less
/// usable text than this.
pub const MIN_TEXT_CHARS: usize = 50;

/// Pull a single text blob out of the file. Image formats go through the
/// hosted vision model; everything else is decoded locally.
pub async fn extract_text(
    file: &SourceFile,
    model: &dyn ChatModel,
    config: &GenConfig,
) -> Result<String, GenError> {
    let text = match file.kind() {
        FileKind::Pdf => extract_pdf(&file.bytes)?,
        FileKind::Image => extract_image(file, model, config).await?,
        FileKind::WordProcessor => extract_word(&file.bytes)?,
        FileKind::PlainText | FileKind::Other => {
            String::from_utf8_lossy(&file.bytes).into_owned()
        }
    };

    let text = text.trim().to_string();
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(GenError::InsufficientText);
    }
    Ok(text)
}

/// Each page's text layer, in page order, joined with newlines.
fn extract_pdf(bytes: &[u8]) -> Result<String, GenError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| GenError::ExtractionFailed(format!("could not read PDF: {e}")))?;

    let mut out = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => {
                out.push_str(page_text.trim_end());
                out.push('\n');
            }
            Err(e) => log::warn!("skipping PDF page {page_number}: {e}"),
        }
    }
    Ok(out)
}

/// Best-effort coercion for word-processor formats: decode lossily, blank out
/// non-printable bytes, collapse whitespace.
fn extract_word(bytes: &[u8]) -> Result<String, GenError> {
    let raw = String::from_utf8_lossy(bytes);
    let printable: String = raw
        .chars()
        .map(|c| if ('\u{20}'..='\u{7e}').contains(&c) { c } else { ' ' })
        .collect();
    let collapsed = printable.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() < MIN_TEXT_CHARS {
        return Err(GenError::UnsupportedFormat(
            "could not extract readable text from this document; convert it to PDF or plain text"
                .into(),
        ));
    }
    Ok(collapsed)
}

/// Ask the vision model for a literal transcription of the image.
async fn extract_image(
    file: &SourceFile,
    model: &dyn ChatModel,
    config: &GenConfig,
) -> Result<String, GenError> {
    let data_url = format!(
        "data:{};base64,{}",
        file.image_mime(),
        BASE64.encode(&file.bytes)
    );

    let request = ChatRequest {
        model: config.vision_model.clone(),
        messages: vec![Message::user_with_image(VISION_PROMPT, data_url)],
        temperature: None,
        max_tokens: Some(VISION_MAX_TOKENS),
    };

    let text = model.complete(request).await.map_err(|e| {
        GenError::ExtractionFailed(format!("vision transcription failed: {e}"))
    })?;
    if text.trim().is_empty() {
        return Err(GenError::ExtractionFailed(
            "vision transcription returned no text".into(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_coercion_strips_binary_noise() {
        let mut bytes = b"Cell   division\x00\x01\x02 is how \x7f\x80 organisms grow and replace worn-out cells".to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        let text = extract_word(&bytes).unwrap();
        assert!(text.contains("Cell division is how"));
        assert!(!text.contains('\x00'));
    }

    #[test]
    fn word_coercion_rejects_mostly_binary_input() {
        let bytes = vec![0u8, 1, 2, 3, 254, 255, 7, 8];
        assert!(matches!(
            extract_word(&bytes),
            Err(GenError::UnsupportedFormat(_))
        ));
    }
}
