// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Invocation of the external mermaid-cli renderer.
//!
//! The invoker owns the full pipeline: extraction, sanitization, the
//! heuristic warning, a scoped scratch directory, the bounded `mmdc`
//! subprocess, durable-output persistence, and format-specific
//! post-processing.

mod invoker;
pub mod theme;

pub use invoker::{
    heuristic_warning, OutputFormat, RenderError, RenderRequest, RenderSettings, RenderSuccess,
    Renderer, RENDER_TIMEOUT,
};
