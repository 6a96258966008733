//! Fixed prompts and tuning constants for the generation call. None of these
//! are runtime-configurable.

/// The pipeline always asks for exactly this many cards.
pub const REQUESTED_CARDS: usize = 5;

pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 2000;
pub const VISION_MAX_TOKENS: u32 = 1000;

pub const SYSTEM_PROMPT: &str = "You are an expert educator who creates high-quality \
educational flashcards. Always respond with valid JSON containing exactly 5 flashcard objects.";

pub const VISION_PROMPT: &str = "Extract all text content from this image. \
Return only the text without any additional commentary.";

pub fn generation_prompt(subject: &str, text: &str) -> String {
    format!(
        r#"You are an expert educator creating flashcards for {subject}.

Based on the following content, create exactly {REQUESTED_CARDS} high-quality flashcards that cover the most important concepts, definitions, formulas, or facts.

Content:
{text}

Instructions:
- Create exactly {REQUESTED_CARDS} flashcards
- Focus on the most important and testable concepts
- Make questions clear and specific
- Provide complete, accurate answers
- Vary difficulty levels (1-5 scale)
- Ensure questions test understanding, not just memorization
- Format your response as valid JSON

Return a JSON array with exactly {REQUESTED_CARDS} objects, each having this structure:
{{
  "front": "Clear, specific question",
  "back": "Complete, accurate answer",
  "difficulty": 1-5 (1=very easy, 5=very hard)
}}

Generate the flashcards now:"#
    )
}
