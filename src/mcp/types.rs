// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateDiagramParams {
    /// Mermaid diagram code to render; fenced code blocks are unwrapped.
    pub mermaid_code: String,
    /// Output format for the diagram (default `svg`).
    pub format: Option<OutputFormat>,
    /// Theme name; `default`/`dark` use the bundled high-contrast profile,
    /// anything else passes through to the renderer as a built-in theme.
    pub theme: Option<String>,
    /// Width of the output image in pixels (default 1920).
    #[schemars(range(min = 800, max = 4000))]
    pub width: Option<u32>,
    /// Height of the output image in pixels (default 1080).
    #[schemars(range(min = 600, max = 4000))]
    pub height: Option<u32>,
    /// Scale factor for higher resolution (default 2).
    #[schemars(range(min = 1, max = 4))]
    pub scale: Option<f64>,
    /// Background color: hex, named color, or `transparent` (default).
    pub background_color: Option<String>,
    /// Output file name without extension; the format extension is appended.
    pub file_name: String,
    /// Include a base64 copy of binary (png/pdf) artifacts in the response.
    pub include_base64: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateDiagramResponse {
    /// `ok` or `error`; render failures are results, not protocol errors.
    pub status: String,
    pub message: String,
    pub path: Option<String>,
    pub byte_size: Option<u64>,
    pub format: Option<OutputFormat>,
    /// Heuristic warning when the input did not look like Mermaid syntax.
    pub warning: Option<String>,
    /// Full SVG text for inline embedding (svg format only).
    pub svg: Option<String>,
    pub base64: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateMermaidParams {
    /// Mermaid diagram code to validate.
    pub mermaid_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateMermaidResponse {
    /// `empty_input`, `looks_valid`, or `looks_invalid`.
    pub verdict: String,
    pub message: String,
}
