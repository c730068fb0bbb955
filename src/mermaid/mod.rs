// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid text preprocessing.
//!
//! Everything here is pure text-to-text: fence extraction, label
//! sanitization, and the permissive syntax heuristic that only ever
//! downgrades a render to a warning.

mod extract;
mod heuristic;
mod sanitize;

pub use extract::extract_mermaid_code;
pub use heuristic::appears_to_be_mermaid;
pub use sanitize::sanitize_labels;

/// Advisory verdict for `validate_mermaid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    EmptyInput,
    LooksValid,
    LooksInvalid,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::LooksValid => "looks_valid",
            Self::LooksInvalid => "looks_invalid",
        }
    }
}

/// Classify free-form text without touching the filesystem or the renderer.
///
/// Extraction runs first so a fenced block can be judged on its own; the
/// sanitizer is deliberately skipped because it only matters for rendering.
pub fn validate(text: &str) -> Verdict {
    let extracted = extract_mermaid_code(text);
    if extracted.is_empty() {
        return Verdict::EmptyInput;
    }
    if appears_to_be_mermaid(&extracted) {
        Verdict::LooksValid
    } else {
        Verdict::LooksInvalid
    }
}
