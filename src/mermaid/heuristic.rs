// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

// One pattern per known diagram kind plus the arrow tokens shared by most of
// them. Matching any single pattern is enough; this is a classifier, not a
// parser.
const MERMAID_PATTERNS: &[&str] = &[
    r"graph\s+[TBLR]?[DRLR]?",
    r"sequenceDiagram",
    r"classDiagram",
    r"stateDiagram-v2",
    r"erDiagram",
    r"pie\s*title",
    r"gantt",
    r"flowchart\s+[TBLR]?[DRLR]?",
    r"-->|--[x]|==>",
    r"subgraph",
    r"participant",
    r"class\s+\w+",
    r"state\s+\w+",
];

// Tokens that mark the text as general-purpose source code rather than
// diagram syntax (import statements, function/class definitions).
const EXCLUSION_PATTERN: &str = r"import\s+|def\s+|class\s*:";

fn keyword_regexes() -> &'static Vec<Regex> {
    static KEYWORDS: OnceLock<Vec<Regex>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        MERMAID_PATTERNS
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("mermaid keyword regex compiles")
            })
            .collect()
    })
}

fn exclusion_regex() -> &'static Regex {
    static EXCLUSION: OnceLock<Regex> = OnceLock::new();
    EXCLUSION.get_or_init(|| {
        RegexBuilder::new(EXCLUSION_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("exclusion regex compiles")
    })
}

/// Decide whether `code` looks like Mermaid diagram source.
///
/// Deliberately permissive: false positives are fine because a negative
/// result only produces a warning, never a rejected render.
pub fn appears_to_be_mermaid(code: &str) -> bool {
    keyword_regexes().iter().any(|pattern| pattern.is_match(code))
        && !exclusion_regex().is_match(code)
}
