//! Heuristic section filter. Keeps only the parts of a resume that plausibly
//! describe projects or work experience. Best-effort, not a resume parser.

use std::sync::OnceLock;

use regex::Regex;

use crate::extraction::chunker::PARAGRAPH_SEPARATOR;

fn section_heading() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"(?i)projects|experience").expect("static regex is valid"))
}

/// Collects every run of text that starts at a "projects" or "experience"
/// keyword and ends just before the next blank line (or end of text), and
/// joins the runs with blank lines. Returns the whole input if no keyword
/// occurs.
pub fn filter_relevant_sections(text: &str) -> String {
    let heading = section_heading();
    let mut sections: Vec<&str> = Vec::new();
    let mut search_from = 0;

    while let Some(found) = heading.find_at(text, search_from) {
        let start = found.start();
        let end = text[found.end()..]
            .find(PARAGRAPH_SEPARATOR)
            .map(|offset| found.end() + offset)
            .unwrap_or(text.len());
        sections.push(&text[start..end]);
        search_from = end;
    }

    if sections.is_empty() {
        text.to_string()
    } else {
        sections.join(PARAGRAPH_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_matching_paragraphs() {
        let resume = "Jane Doe\njane@example.com\n\n\
            Experience\nBuilt billing in Go and PostgreSQL\n\n\
            Hobbies\nChess\n\n\
            Projects\nA Rust CLI using Tokio";
        let filtered = filter_relevant_sections(resume);
        assert_eq!(
            filtered,
            "Experience\nBuilt billing in Go and PostgreSQL\n\nProjects\nA Rust CLI using Tokio"
        );
    }

    #[test]
    fn test_no_keyword_keeps_everything() {
        let resume = "Skills: Rust, Go\n\nEducation: BSc";
        assert_eq!(filter_relevant_sections(resume), resume);
    }

    #[test]
    fn test_case_insensitive_and_mid_line() {
        let resume = "Summary\n\nFive years of EXPERIENCE with Kafka\n\nReferences";
        assert_eq!(filter_relevant_sections(resume), "EXPERIENCE with Kafka");
    }

    #[test]
    fn test_multiple_keywords_in_one_paragraph_yield_one_section() {
        let resume = "Experience and side projects: React, Node\n\nOther";
        assert_eq!(
            filter_relevant_sections(resume),
            "Experience and side projects: React, Node"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(filter_relevant_sections(""), "");
    }
}
