/// Propose a course label from keywords in the file name. Order matters:
/// "biochemistry" should land on Chemistry, not Biology.
const COURSE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Mathematics", &["math", "calculus", "algebra", "geometry", "statistics", "trigonometry"]),
    ("Physics", &["physics", "mechanics", "quantum"]),
    ("Chemistry", &["chemistry", "organic", "inorganic", "biochemistry"]),
    ("Biology", &["biology", "anatomy", "genetics", "molecular"]),
    ("History", &["history", "historical", "war", "civilization"]),
    ("English", &["english", "literature", "writing", "grammar"]),
    ("Computer Science", &["programming", "computer", "software", "algorithm", "code"]),
    ("Economics", &["economics", "business", "finance", "accounting"]),
    ("Psychology", &["psychology", "cognitive", "behavior"]),
];

pub const FALLBACK_COURSE: &str = "General Studies";

pub fn suggest_course(file_name: &str) -> &'static str {
    let name = file_name.to_lowercase();
    COURSE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(course, _)| *course)
        .unwrap_or(FALLBACK_COURSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_keywords() {
        assert_eq!(suggest_course("calculus-week3.pdf"), "Mathematics");
        assert_eq!(suggest_course("Intro_To_Genetics.docx"), "Biology");
        assert_eq!(suggest_course("biochemistry-notes.txt"), "Chemistry");
        assert_eq!(suggest_course("ww2_history.pdf"), "History");
    }

    #[test]
    fn falls_back_to_general_studies() {
        assert_eq!(suggest_course("notes.pdf"), FALLBACK_COURSE);
    }
}
