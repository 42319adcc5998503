// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text normalizer — whitespace collapse, control-character stripping, and a
// punctuation allow-list. Pure functions, total over all inputs.

use std::sync::LazyLock;

use regex::Regex;

/// Any run of whitespace (spaces, tabs, newlines).
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// C0 and C1 control characters plus DEL, excluding the whitespace-class
/// controls (HT, LF, VT, FF, CR, NEL) which the collapse step turns into
/// single spaces instead.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0E-\x1F\x7F-\x84\x86-\x9F]").unwrap());

/// Everything outside the allow-list: word characters, whitespace, and the
/// punctuation set `. , ! ? - ( ) : & ' " / # * |`.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,!?\-():&'"/#*|]"#).unwrap());

/// Clean a single semantic unit of text.
///
/// Strips control characters and characters outside the allow-list, collapses
/// every whitespace run (including newlines) to one space, and trims.
/// Stripping happens before the collapse so that character removal can never
/// leave a double space behind — this is what makes the function idempotent.
///
/// Because the collapse erases line boundaries, this must never be applied to
/// a whole multi-line document that is still to be line-parsed — use
/// [`normalize_lines`] for that.
pub fn normalize(raw: &str) -> String {
    let no_controls = CONTROL_CHARS.replace_all(raw, "");
    let allowed = DISALLOWED.replace_all(&no_controls, "");
    let collapsed = WHITESPACE_RUN.replace_all(&allowed, " ");
    collapsed.trim().to_string()
}

/// Clean a multi-line document while preserving its line structure.
///
/// Applies [`normalize`] to each line independently and rejoins with `\n`,
/// so the outline builder still sees the original line boundaries.
pub fn normalize_lines(raw: &str) -> String {
    raw.lines().map(normalize).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn strips_control_characters() {
        let input = "before\u{0007}after\u{009C}end";
        let output = normalize(input);
        assert_eq!(output, "beforeafterend");
        assert!(output.chars().all(|c| !c.is_control()));
    }

    #[test]
    fn strips_characters_outside_allow_list() {
        assert_eq!(normalize("price: 5 € or ~5%"), "price: 5 or 5");
        // Allow-listed punctuation survives.
        assert_eq!(
            normalize(r#"a.b,c!d?e-f(g)h:i&j'k"l/m#n*o|p"#),
            r#"a.b,c!d?e-f(g)h:i&j'k"l/m#n*o|p"#
        );
    }

    #[test]
    fn trims_and_handles_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t  "), "");
        assert_eq!(normalize("  word  "), "word");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "1. Intro\nSummary:  hello\t world",
            "  spaced   out  ",
            "ctrl\u{0001}chars & stray ~ glyphs €",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "normalize must be idempotent");
        }
    }

    #[test]
    fn normalize_lines_preserves_line_boundaries() {
        let input = "1.  Intro\nSummary:   hello\n*  item";
        assert_eq!(normalize_lines(input), "1. Intro\nSummary: hello\n* item");
    }

    #[test]
    fn normalize_lines_leaves_blank_lines_empty() {
        assert_eq!(normalize_lines("a\n\nb"), "a\n\nb");
    }
}
