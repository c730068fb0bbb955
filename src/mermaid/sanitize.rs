// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    // Bracketed, double-quoted node labels: ["..."], no embedded quotes.
    LABEL.get_or_init(|| Regex::new(r#"\["([^"]+)"\]"#).expect("label regex compiles"))
}

fn numbered_item_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"(\d+)\. ").expect("numbered item regex compiles"))
}

/// Rewrite quoted node labels so mermaid does not read their content as
/// Markdown list syntax.
///
/// Inside every `["..."]` label:
/// - `1. Text` becomes `1: Text`
/// - a leading `- ` (also after embedded newlines) becomes `– ` (en-dash)
/// - `<br/>`/`<br>` become the two-character `\n` escape so the renderer
///   emits a real line break
///
/// Text outside labels is never touched, and the rewrite is idempotent.
pub fn sanitize_labels(code: &str) -> String {
    label_regex()
        .replace_all(code, |caps: &Captures<'_>| {
            let label = numbered_item_regex().replace_all(&caps[1], "$1: ");
            let label = match label.strip_prefix("- ") {
                Some(rest) => format!("– {rest}"),
                None => label.into_owned(),
            };
            let label = label.replace("\n- ", "\n– ");
            let label = label.replace("<br/>", "\\n").replace("<br>", "\\n");
            format!("[\"{label}\"]")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::sanitize_labels;

    #[rstest]
    #[case(r#"A["1. Collect input"]"#, r#"A["1: Collect input"]"#)]
    #[case(r#"A["- item"]"#, "A[\"\u{2013} item\"]")]
    #[case(r#"A["first<br/>second"]"#, r#"A["first\nsecond"]"#)]
    #[case(r#"A["first<br>second"]"#, r#"A["first\nsecond"]"#)]
    fn rewrites_list_markup_inside_labels(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_labels(input), expected);
    }

    #[test]
    fn rewrites_dash_items_after_embedded_newlines() {
        let input = "A[\"steps:\n- one\n- two\"]";
        assert_eq!(sanitize_labels(input), "A[\"steps:\n\u{2013} one\n\u{2013} two\"]");
    }

    #[test]
    fn leaves_text_outside_labels_alone() {
        let input = "flowchart TD\n%% 1. not a label\nA[plain] --> B\n- loose dash";
        assert_eq!(sanitize_labels(input), input);
    }

    #[test]
    fn leaves_unquoted_bracket_labels_alone() {
        let input = "A[1. unquoted] --> B";
        assert_eq!(sanitize_labels(input), input);
    }

    #[test]
    fn is_idempotent() {
        let input = "A[\"1. a<br/>b\"] --> B[\"- c\"]\nC[\"x\ny\"]";
        let once = sanitize_labels(input);
        assert_eq!(sanitize_labels(&once), once);
    }

    #[test]
    fn handles_multiple_numbered_items_in_one_label() {
        assert_eq!(
            sanitize_labels(r#"A["1. first 2. second"]"#),
            r#"A["1: first 2: second"]"#
        );
    }
}
