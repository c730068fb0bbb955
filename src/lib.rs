// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Undine — Mermaid render/validate MCP server backed by mermaid-cli.
//!
//! The crate wraps the external `mmdc` renderer in a small text pipeline
//! (fence extraction, label sanitization, syntax heuristic) and exposes it
//! over MCP as `generate_diagram`/`validate_mermaid`.

pub mod mcp;
pub mod mermaid;
pub mod render;
