//! Strips script-ish markup from extracted text before it is embedded in a
//! prompt, and normalizes the user-supplied subject string.

use regex::Regex;
use std::sync::OnceLock;

/// Body text is capped at this many characters before prompting.
pub const MAX_TEXT_CHARS: usize = 8000;
pub const MAX_SUBJECT_CHARS: usize = 50;
const TRUNCATION_MARKER: &str = "...";

fn removal_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // paired tags with their content
            r"(?is)<script.*?</script\s*>",
            r"(?is)<iframe.*?</iframe\s*>",
            // stray opening/closing fragments left by unbalanced markup
            r"(?i)</?script[^>]*>?",
            r"(?i)</?iframe[^>]*>?",
            r"(?i)javascript:",
            r"(?i)on\w+\s*=",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static sanitizer pattern"))
        .collect()
    })
}

/// Removing one match can splice surrounding text into a fresh match, so each
/// pattern is applied until it stops matching. That also makes the whole
/// function idempotent.
fn remove_to_fixpoint(mut s: String, re: &Regex) -> String {
    loop {
        let next = re.replace_all(&s, "").into_owned();
        if next == s {
            return s;
        }
        s = next;
    }
}

pub fn sanitize_text(text: &str) -> String {
    let mut s = text.to_string();
    for re in removal_patterns() {
        s = remove_to_fixpoint(s, re);
    }
    let trimmed = s.trim();
    truncate_chars(trimmed, MAX_TEXT_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Subjects become part of the prompt verbatim: drop quote/angle characters,
/// keep only word characters, whitespace, and hyphens, and cap the length.
pub fn sanitize_subject(subject: &str) -> String {
    static KEEP: OnceLock<Regex> = OnceLock::new();
    let keep = KEEP.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static subject pattern"));

    let stripped: String = subject
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect();
    let kept = keep.replace_all(&stripped, "");
    let capped: String = kept.trim().chars().take(MAX_SUBJECT_CHARS).collect();
    capped.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_iframe_blocks() {
        let dirty = "before <script>alert(1)</script> middle <iframe src='x'>inner</iframe> after";
        let clean = sanitize_text(dirty);
        assert!(!clean.to_lowercase().contains("<script"));
        assert!(!clean.to_lowercase().contains("<iframe"));
        assert!(clean.contains("before"));
        assert!(clean.contains("after"));
    }

    #[test]
    fn strips_unclosed_and_spliced_tags() {
        let clean = sanitize_text("x <script src=evil.js y");
        assert!(!clean.to_lowercase().contains("<script"));

        // removing the inner pair must not leave a stitched-together tag
        let clean = sanitize_text("<scr<script>a</script>ipt>alert(1)</script>");
        assert!(!clean.to_lowercase().contains("<script"));
    }

    #[test]
    fn strips_schemes_and_handlers() {
        let clean = sanitize_text("click javascript:run() or onclick= go");
        assert!(!clean.to_lowercase().contains("javascript:"));
        assert!(!clean.contains("onclick="));
    }

    #[test]
    fn is_idempotent() {
        let long = "long ".repeat(3000);
        let inputs = [
            "plain text, nothing to do",
            "a <script>x</script> b onload=steal() javascript:x",
            long.as_str(),
        ];
        for input in inputs {
            let once = sanitize_text(input);
            assert_eq!(sanitize_text(&once), once);
        }
    }

    #[test]
    fn truncates_with_marker() {
        let long = "a".repeat(MAX_TEXT_CHARS + 100);
        let out = sanitize_text(&long);
        assert_eq!(out.chars().count(), MAX_TEXT_CHARS + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn subject_keeps_only_safe_characters() {
        let out = sanitize_subject("  Biology <b>101</b>! \"cells\" & 'dna' ");
        assert!(!out.contains('<') && !out.contains('>'));
        assert!(!out.contains('"') && !out.contains('\''));
        assert!(!out.contains('!') && !out.contains('&'));
        assert!(out.contains("Biology"));
    }

    #[test]
    fn subject_is_capped_and_idempotent() {
        let long = "Advanced Organic Chemistry And Its Many Subtopics Explained At Length";
        let once = sanitize_subject(long);
        assert!(once.chars().count() <= MAX_SUBJECT_CHARS);
        assert_eq!(sanitize_subject(&once), once);
    }
}
