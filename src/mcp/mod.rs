// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Two stateless tools (`generate_diagram`, `validate_mermaid`) plus the
//! `mermaid://syntax-guide` resource, wired over the render pipeline.

mod server;
mod types;

pub use server::UndineMcp;
