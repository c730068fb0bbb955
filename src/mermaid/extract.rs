// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        // Opening fence may carry a language tag; interior is non-greedy so
        // only the first block is captured.
        Regex::new(r"(?s)```(?:\w*\n)?(.*?)```").expect("fence regex compiles")
    })
}

/// Extract Mermaid source from free-form text.
///
/// Returns the trimmed interior of the first fenced code block when one is
/// present, otherwise the trimmed input. An unterminated fence falls through
/// to the raw path; this function never fails.
pub fn extract_mermaid_code(text: &str) -> String {
    if let Some(captures) = fence_regex().captures(text) {
        return captures[1].trim().to_owned();
    }
    text.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::extract_mermaid_code;

    #[rstest]
    #[case("```mermaid\nflowchart TD\nA-->B\n```", "flowchart TD\nA-->B")]
    #[case("```\ngraph LR\nX-->Y\n```", "graph LR\nX-->Y")]
    #[case("```flowchart TD\nA-->B\n```", "flowchart TD\nA-->B")]
    fn unwraps_first_fenced_block(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(extract_mermaid_code(input), expected);
    }

    #[test]
    fn keeps_only_the_first_of_multiple_blocks() {
        let input = "```mermaid\nsequenceDiagram\n```\nprose\n```mermaid\ngantt\n```";
        assert_eq!(extract_mermaid_code(input), "sequenceDiagram");
    }

    #[test]
    fn returns_trimmed_input_without_fences() {
        assert_eq!(extract_mermaid_code("  flowchart TD\nA-->B  \n"), "flowchart TD\nA-->B");
    }

    #[test]
    fn unterminated_fence_falls_back_to_raw_input() {
        let input = "```mermaid\nflowchart TD\nA-->B";
        assert_eq!(extract_mermaid_code(input), input.trim());
    }

    #[test]
    fn whitespace_only_input_yields_empty_string() {
        assert_eq!(extract_mermaid_code("   \n\t "), "");
    }
}
