// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outline builder — single-pass line classifier turning flat cleaned text
// into a nested section/subsection document.
//
// Classification is an explicit ordered rule table: each rule pairs a
// compiled pattern with a handler, rules are tried in fixed priority order,
// and the first match wins. Lines matching nothing become paragraphs of the
// open section, or are dropped when no section has opened yet.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use textwerk_core::types::{OutlineDocument, Section, SubsectionEntry};
use tracing::{debug, instrument};

/// `<digits>. <title>` — opens a new section.
static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").unwrap());

/// `Label: content` — a capitalized word with a trailing colon.
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]+:)\s*(.+)$").unwrap());

/// `* item`, `- item`, or `• item`.
static BULLET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\-•]\s+(.+)$").unwrap());

type Handler = fn(&mut OutlineBuilder, &Captures);

/// The rule table, in priority order. A line is classified by the first
/// pattern that matches it; later rules never see it.
static RULES: [(&LazyLock<Regex>, Handler); 3] = [
    (&SECTION_PATTERN, OutlineBuilder::on_section),
    (&LABEL_PATTERN, OutlineBuilder::on_label),
    (&BULLET_PATTERN, OutlineBuilder::on_bullet),
];

/// Accumulates sections while walking the input line by line.
///
/// At most one section is open (being appended to) at any time; it is
/// finalized when the next section header arrives or the input ends.
struct OutlineBuilder {
    finalized: Vec<Section>,
    current: Option<Section>,
}

impl OutlineBuilder {
    fn new() -> Self {
        Self {
            finalized: Vec::new(),
            current: None,
        }
    }

    /// Classify one non-empty, trimmed line via the rule table.
    fn feed(&mut self, line: &str) {
        for (pattern, handler) in RULES.iter() {
            if let Some(caps) = pattern.captures(line) {
                handler(self, &caps);
                return;
            }
        }
        self.on_paragraph(line);
    }

    fn on_section(&mut self, caps: &Captures) {
        if let Some(section) = self.current.take() {
            self.finalized.push(section);
        }
        // Ids are taken as the source declares them; a digit run too long
        // for i64 saturates rather than failing the whole document.
        let section_id = caps[1].parse().unwrap_or(i64::MAX);
        self.current = Some(Section::new(section_id, &caps[2]));
    }

    fn on_label(&mut self, caps: &Captures) {
        if let Some(section) = self.current.as_mut() {
            section.subsections.push(SubsectionEntry::Subsection {
                label: caps[1].to_string(),
                content: caps[2].to_string(),
            });
        }
    }

    fn on_bullet(&mut self, caps: &Captures) {
        let Some(section) = self.current.as_mut() else {
            return;
        };
        // Adjacent bullet lines coalesce into the trailing list entry; any
        // intervening entry breaks the run and a fresh list is started.
        if !section.subsections.last().is_some_and(SubsectionEntry::is_list) {
            section.subsections.push(SubsectionEntry::List { items: Vec::new() });
        }
        if let Some(SubsectionEntry::List { items }) = section.subsections.last_mut() {
            items.push(caps[1].to_string());
        }
    }

    fn on_paragraph(&mut self, line: &str) {
        // Lines before the first section header are dropped by design.
        if let Some(section) = self.current.as_mut() {
            section.subsections.push(SubsectionEntry::Paragraph {
                content: line.to_string(),
            });
        }
    }

    fn finish(mut self) -> Vec<Section> {
        if let Some(section) = self.current.take() {
            self.finalized.push(section);
        }
        self.finalized
    }
}

/// Build the nested outline for a cleaned, line-preserving text.
///
/// Total over all inputs: malformed or non-sequential section numbering is
/// accepted as-is, and whitespace-only input yields an empty content list.
/// The input text is retained verbatim in the result's `raw_text` field.
#[instrument(skip_all, fields(input_len = text.len()))]
pub fn build_outline(text: &str) -> OutlineDocument {
    let mut builder = OutlineBuilder::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        builder.feed(line);
    }

    let content = builder.finish();
    debug!(sections = content.len(), "Outline built");
    OutlineDocument::new(content, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(text: &str) -> Vec<Section> {
        build_outline(text).content
    }

    #[test]
    fn empty_and_whitespace_input_yield_empty_content() {
        assert!(sections("").is_empty());
        assert!(sections("   \n\t\n  ").is_empty());
    }

    #[test]
    fn section_header_opens_a_section() {
        let content = sections("1. Introduction");
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].section_id, 1);
        assert_eq!(content[0].title, "Introduction");
        assert!(content[0].subsections.is_empty());
    }

    #[test]
    fn lines_before_first_section_are_dropped() {
        let doc = build_outline("stray\n1. Intro\nbody");
        assert_eq!(doc.content.len(), 1);
        let section = &doc.content[0];
        assert_eq!(section.section_id, 1);
        assert_eq!(section.title, "Intro");
        assert_eq!(
            section.subsections,
            vec![SubsectionEntry::Paragraph {
                content: "body".to_string()
            }]
        );
        // The dropped line survives only in raw_text, never in the outline.
        let json = serde_json::to_string(&doc.content).unwrap();
        assert!(!json.contains("stray"));
    }

    #[test]
    fn label_line_becomes_subsection_entry() {
        let content = sections("1. Intro\nSummary: hello world");
        assert_eq!(
            content[0].subsections,
            vec![SubsectionEntry::Subsection {
                label: "Summary:".to_string(),
                content: "hello world".to_string(),
            }]
        );
    }

    #[test]
    fn adjacent_bullets_coalesce_into_one_list() {
        let content = sections("1. Items\n* first\n- second\n• third");
        assert_eq!(
            content[0].subsections,
            vec![SubsectionEntry::List {
                items: vec![
                    "first".to_string(),
                    "second".to_string(),
                    "third".to_string()
                ],
            }]
        );
    }

    #[test]
    fn intervening_paragraph_splits_bullet_runs() {
        let content = sections("1. Items\n* first\ninterlude\n* second");
        assert_eq!(
            content[0].subsections,
            vec![
                SubsectionEntry::List {
                    items: vec!["first".to_string()],
                },
                SubsectionEntry::Paragraph {
                    content: "interlude".to_string(),
                },
                SubsectionEntry::List {
                    items: vec!["second".to_string()],
                },
            ]
        );
    }

    #[test]
    fn next_section_header_finalizes_the_open_section() {
        let content = sections("1. One\nbody one\n2. Two\nbody two");
        assert_eq!(content.len(), 2);
        assert_eq!(content[0].title, "One");
        assert_eq!(content[1].title, "Two");
        assert_eq!(content[1].subsections.len(), 1);
    }

    #[test]
    fn section_ids_are_taken_as_declared() {
        // Out of order and duplicated ids are not an error.
        let content = sections("7. Seven\n3. Three\n3. Three again");
        let ids: Vec<i64> = content.iter().map(|s| s.section_id).collect();
        assert_eq!(ids, vec![7, 3, 3]);
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        // "1. Intro:" matches the section pattern before the label pattern
        // could ever see it.
        let content = sections("1. Summary: of everything");
        assert_eq!(content[0].section_id, 1);
        assert_eq!(content[0].title, "Summary: of everything");
        assert!(content[0].subsections.is_empty());
    }

    #[test]
    fn label_without_open_section_is_dropped() {
        let content = sections("Summary: orphaned\n1. Intro");
        assert_eq!(content.len(), 1);
        assert!(content[0].subsections.is_empty());
    }

    #[test]
    fn bullet_without_open_section_is_dropped() {
        let content = sections("* orphan\n1. Intro");
        assert_eq!(content.len(), 1);
        assert!(content[0].subsections.is_empty());
    }

    #[test]
    fn raw_text_is_retained_verbatim() {
        let input = "preamble\n1. Intro\nbody";
        assert_eq!(build_outline(input).raw_text, input);
    }

    #[test]
    fn mixed_document_end_to_end() {
        let text = "\
1. Overview
Summary: the short version
General discussion follows.
* alpha
* beta
2. Details
- gamma
Notes: wrap up";
        let content = sections(text);
        assert_eq!(content.len(), 2);
        assert_eq!(
            content[0].subsections,
            vec![
                SubsectionEntry::Subsection {
                    label: "Summary:".to_string(),
                    content: "the short version".to_string(),
                },
                SubsectionEntry::Paragraph {
                    content: "General discussion follows.".to_string(),
                },
                SubsectionEntry::List {
                    items: vec!["alpha".to_string(), "beta".to_string()],
                },
            ]
        );
        assert_eq!(
            content[1].subsections,
            vec![
                SubsectionEntry::List {
                    items: vec!["gamma".to_string()],
                },
                SubsectionEntry::Subsection {
                    label: "Notes:".to_string(),
                    content: "wrap up".to_string(),
                },
            ]
        );
    }
}
