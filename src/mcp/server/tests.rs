// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::*;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("undine-mcp-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn generate_params(mermaid_code: &str, file_name: &str) -> GenerateDiagramParams {
    GenerateDiagramParams {
        mermaid_code: mermaid_code.to_owned(),
        format: None,
        theme: None,
        width: None,
        height: None,
        scale: None,
        background_color: None,
        file_name: file_name.to_owned(),
        include_base64: None,
    }
}

#[cfg(unix)]
fn server_with_fake_renderer(tmp: &TempDir, body: &str) -> UndineMcp {
    use std::os::unix::fs::PermissionsExt;

    let script_path = tmp.path().join("fake-mmdc");
    std::fs::write(&script_path, format!("#!/bin/sh\n{body}\n")).expect("write fake renderer");
    std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))
        .expect("make fake renderer executable");

    let output_dir = tmp.path().join("out");
    std::fs::create_dir_all(&output_dir).expect("create output dir");
    UndineMcp::new(
        RenderSettings::new()
            .with_renderer(script_path.display().to_string())
            .with_output_dir(output_dir)
            .with_open_after_render(false),
    )
}

#[cfg(unix)]
const EMIT_SVG_BODY: &str = "out=\"\"\nwhile [ \"$#\" -gt 0 ]; do\n  if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift 2; else shift 1; fi\ndone\nprintf '%s' '<svg style=\"background-color: white;\"/>' > \"$out\"";

#[tokio::test]
async fn validate_reports_empty_input() {
    let server = UndineMcp::new(RenderSettings::new());
    let Json(result) = server
        .validate_mermaid(Parameters(ValidateMermaidParams { mermaid_code: String::new() }))
        .await
        .expect("validate_mermaid");
    assert_eq!(result.verdict, "empty_input");
    assert!(result.message.contains("no Mermaid code provided"));
}

#[tokio::test]
async fn validate_accepts_diagram_syntax() {
    let server = UndineMcp::new(RenderSettings::new());
    let Json(result) = server
        .validate_mermaid(Parameters(ValidateMermaidParams {
            mermaid_code: "```mermaid\nsequenceDiagram\nA->>B: hi\n```".to_owned(),
        }))
        .await
        .expect("validate_mermaid");
    assert_eq!(result.verdict, "looks_valid");
}

#[tokio::test]
async fn validate_flags_source_code_as_invalid() {
    let server = UndineMcp::new(RenderSettings::new());
    let Json(result) = server
        .validate_mermaid(Parameters(ValidateMermaidParams {
            mermaid_code: "def foo(): pass".to_owned(),
        }))
        .await
        .expect("validate_mermaid");
    assert_eq!(result.verdict, "looks_invalid");
}

#[tokio::test]
async fn generate_rejects_missing_required_inputs() {
    let server = UndineMcp::new(RenderSettings::new());

    match server.generate_diagram(Parameters(generate_params("", "diagram"))).await {
        Err(err) => assert!(err.message.contains("mermaid_code")),
        Ok(_) => panic!("expected invalid params for empty mermaid_code"),
    }

    match server.generate_diagram(Parameters(generate_params("flowchart TD\nA-->B", " "))).await {
        Err(err) => assert!(err.message.contains("file_name")),
        Ok(_) => panic!("expected invalid params for blank file_name"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn generate_returns_inline_svg_with_transparent_background() {
    let tmp = TempDir::new("svg");
    let server = server_with_fake_renderer(&tmp, EMIT_SVG_BODY);

    let Json(result) = server
        .generate_diagram(Parameters(generate_params("```flowchart TD\nA-->B\n```", "diagram")))
        .await
        .expect("generate_diagram");

    assert_eq!(result.status, "ok");
    assert_eq!(result.warning, None);
    let svg = result.svg.as_deref().expect("inline svg");
    assert!(!svg.contains("background-color: white;"));
    let path = result.path.as_deref().expect("artifact path");
    assert!(path.ends_with("diagram.svg"));
    assert!(std::path::Path::new(path).exists());
    assert_eq!(result.byte_size, Some(svg.len() as u64));
}

#[cfg(unix)]
#[tokio::test]
async fn generate_surfaces_heuristic_warning_but_still_renders() {
    let tmp = TempDir::new("warn");
    let server = server_with_fake_renderer(&tmp, EMIT_SVG_BODY);

    let Json(result) = server
        .generate_diagram(Parameters(generate_params("just some prose", "diagram")))
        .await
        .expect("generate_diagram");
    assert_eq!(result.status, "ok");
    assert!(result.warning.is_some());
    assert!(result.path.is_some());
}

#[cfg(unix)]
#[tokio::test]
async fn generate_reports_renderer_failure_as_result() {
    let tmp = TempDir::new("fail");
    let server = server_with_fake_renderer(&tmp, "echo 'boom' >&2\nexit 1");

    let Json(result) = server
        .generate_diagram(Parameters(generate_params("flowchart TD\nA-->B", "diagram")))
        .await
        .expect("render failure is a result, not a protocol error");
    assert_eq!(result.status, "error");
    assert!(result.message.contains("boom"));
    assert_eq!(result.path, None);
    assert_eq!(result.warning, None);
}

#[cfg(unix)]
#[tokio::test]
async fn generate_keeps_heuristic_warning_when_renderer_fails() {
    let tmp = TempDir::new("failwarn");
    let server = server_with_fake_renderer(&tmp, "echo 'boom' >&2\nexit 1");

    let Json(result) = server
        .generate_diagram(Parameters(generate_params("just some prose", "diagram")))
        .await
        .expect("render failure is a result, not a protocol error");
    assert_eq!(result.status, "error");
    assert!(result.warning.is_some());
}

#[tokio::test]
async fn syntax_guide_resource_is_listed_and_readable_uri_checked() {
    // Single-resource catalog; the URI is the contract.
    assert_eq!(SYNTAX_GUIDE_URI, "mermaid://syntax-guide");
    assert!(SYNTAX_GUIDE.contains("flowchart TD"));
    assert!(SYNTAX_GUIDE.contains("sequenceDiagram"));
    assert!(SYNTAX_GUIDE.contains("erDiagram"));
}
