//! Section detection — partitions resume text into labeled bodies by heading patterns.
//!
//! A heading is any non-blank line matching one of the patterns below, tested in
//! table order. Phrases inside ordinary sentences also match; false positives are
//! an accepted limitation of line-level detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::models::{SectionLabel, SectionMap};

const HEADING_TABLE: &[(SectionLabel, &str)] = &[
    (
        SectionLabel::Summary,
        r"\b(?:professional summary|summary|about me)\b",
    ),
    (SectionLabel::Objective, r"\b(?:career objective|objective)\b"),
    (
        SectionLabel::Experience,
        r"\b(?:work experience|professional experience|employment history|work history|experience)\b",
    ),
    (SectionLabel::Education, r"\b(?:education|academic background)\b"),
    (
        SectionLabel::Skills,
        r"\b(?:technical skills|core competencies|skills)\b",
    ),
    (SectionLabel::Projects, r"\b(?:projects|portfolio)\b"),
    (
        SectionLabel::Certifications,
        r"\b(?:certifications?|licenses)\b",
    ),
];

static HEADING_PATTERNS: Lazy<Vec<(SectionLabel, Regex)>> = Lazy::new(|| {
    HEADING_TABLE
        .iter()
        .map(|(label, pattern)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("heading pattern is valid");
            (*label, re)
        })
        .collect()
});

/// Returns the section label a line announces, if any.
pub fn match_heading(line: &str) -> Option<SectionLabel> {
    HEADING_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(label, _)| *label)
}

/// Splits `text` into a `SectionMap`. Lines before the first heading are dropped.
pub fn detect_sections(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut open: Option<(SectionLabel, Vec<&str>)> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        let heading = if trimmed.is_empty() {
            None
        } else {
            match_heading(trimmed)
        };

        match heading {
            Some(label) => {
                if let Some((prev, body)) = open.take() {
                    close_section(&mut sections, prev, &body);
                }
                open = Some((label, Vec::new()));
            }
            None => {
                if let Some((_, body)) = open.as_mut() {
                    body.push(trimmed);
                }
            }
        }
    }

    if let Some((label, body)) = open {
        close_section(&mut sections, label, &body);
    }

    sections
}

fn close_section(sections: &mut SectionMap, label: SectionLabel, body: &[&str]) {
    let joined = body.join("\n");
    sections.append(label, joined.trim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_headings_detected() {
        let text = "Experience\nAcme Corp, engineer\nEducation\nBSc Computer Science\nSkills\nRust, SQL";
        let sections = detect_sections(text);
        assert_eq!(
            sections.labels(),
            vec![
                SectionLabel::Experience,
                SectionLabel::Education,
                SectionLabel::Skills
            ]
        );
        assert_eq!(
            sections.get(SectionLabel::Experience),
            Some("Acme Corp, engineer")
        );
        assert_eq!(sections.get(SectionLabel::Skills), Some("Rust, SQL"));
    }

    #[test]
    fn test_heading_match_is_case_insensitive() {
        assert_eq!(
            match_heading("PROFESSIONAL EXPERIENCE"),
            Some(SectionLabel::Experience)
        );
        assert_eq!(match_heading("technical skills:"), Some(SectionLabel::Skills));
        assert_eq!(
            match_heading("Licenses & Certifications"),
            Some(SectionLabel::Certifications)
        );
    }

    #[test]
    fn test_preamble_is_discarded() {
        let text = "Jane Doe\njane@example.com\n\nSummary\nBackend engineer";
        let sections = detect_sections(text);
        assert_eq!(sections.labels(), vec![SectionLabel::Summary]);
        assert_eq!(sections.get(SectionLabel::Summary), Some("Backend engineer"));
    }

    #[test]
    fn test_no_headings_yields_empty_map() {
        let sections = detect_sections("just some words\nand more words");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_bodies_do_not_overlap() {
        let text = "Education\nMIT\n\nProjects\nCompiler in Rust\nRay tracer";
        let sections = detect_sections(text);
        assert_eq!(sections.get(SectionLabel::Education), Some("MIT"));
        assert_eq!(
            sections.get(SectionLabel::Projects),
            Some("Compiler in Rust\nRay tracer")
        );
    }

    #[test]
    fn test_mid_sentence_phrase_counts_as_heading() {
        let text = "Skills\nRust\nI have 5 years of experience with Go";
        let sections = detect_sections(text);
        assert_eq!(sections.get(SectionLabel::Skills), Some("Rust"));
        assert!(sections.contains(SectionLabel::Experience));
    }

    #[test]
    fn test_singular_project_is_not_a_heading() {
        assert_eq!(match_heading("Developed and led a project, increased revenue"), None);
    }

    #[test]
    fn test_repeated_heading_keeps_single_label() {
        let text = "Experience\nAcme\nSkills\nGo\nExperience\nGlobex";
        let sections = detect_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get(SectionLabel::Experience), Some("Acme\nGlobex"));
    }

    #[test]
    fn test_empty_text() {
        assert!(detect_sections("").is_empty());
    }
}
