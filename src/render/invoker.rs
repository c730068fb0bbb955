// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::theme::theme_profile;
use crate::mermaid::{appears_to_be_mermaid, extract_mermaid_code, sanitize_labels};

/// Hard budget for one renderer subprocess run.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_RENDERER_BIN: &str = "mmdc";
const HEURISTIC_WARNING: &str = "the provided code doesn't appear to contain valid Mermaid \
                                 diagram syntax; attempting to generate anyway";
const TRANSPARENT_BACKGROUND: &str = "transparent";
const WHITE_BACKGROUND_STYLE: &str = "background-color: white;";
const TRANSPARENT_BACKGROUND_STYLE: &str = "background-color: transparent;";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    /// SVG is the only format small and textual enough to embed inline.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Svg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One render invocation. Width/height/scale ranges are enforced by the tool
/// schema, not re-validated here.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub mermaid_code: String,
    pub format: OutputFormat,
    pub theme: String,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub background_color: String,
    pub file_name: String,
    pub include_base64: bool,
}

impl RenderRequest {
    pub fn new(mermaid_code: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            mermaid_code: mermaid_code.into(),
            format: OutputFormat::Svg,
            theme: "default".to_owned(),
            width: 1920,
            height: 1080,
            scale: 2.0,
            background_color: TRANSPARENT_BACKGROUND.to_owned(),
            file_name: file_name.into(),
            include_base64: false,
        }
    }
}

/// Renderer configuration: which binary to run, where durable artifacts go,
/// how long a run may take, and whether to open results in a viewer.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    renderer_bin: String,
    output_dir: PathBuf,
    timeout: Duration,
    open_after_render: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            renderer_bin: DEFAULT_RENDERER_BIN.to_owned(),
            output_dir: PathBuf::from("."),
            timeout: RENDER_TIMEOUT,
            open_after_render: cfg!(target_os = "macos"),
        }
    }
}

impl RenderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(mut self, renderer_bin: impl Into<String>) -> Self {
        self.renderer_bin = renderer_bin.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_open_after_render(mut self, open_after_render: bool) -> Self {
        self.open_after_render = open_after_render;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[derive(Debug)]
pub enum RenderError {
    MissingInput {
        field: &'static str,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Spawn {
        renderer: String,
        source: io::Error,
    },
    Timeout {
        timeout: Duration,
    },
    RendererFailed {
        stderr: String,
    },
    OutputMissing {
        path: PathBuf,
    },
    PersistFailed {
        path: PathBuf,
        detail: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { field } => write!(f, "no {field} provided"),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Spawn { renderer, source } => {
                write!(f, "cannot start renderer {renderer:?}: {source}")
            }
            Self::Timeout { timeout } => write!(
                f,
                "diagram generation timed out after {}s; the diagram might be too complex",
                timeout.as_secs()
            ),
            Self::RendererFailed { stderr } => {
                write!(f, "failed to generate diagram: {stderr}")
            }
            Self::OutputMissing { path } => {
                write!(f, "renderer exited cleanly but produced no output at {path:?}")
            }
            Self::PersistFailed { path, detail } => {
                write!(f, "cannot persist artifact to {path:?}: {detail}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Successful render outcome.
#[derive(Debug, Clone)]
pub struct RenderSuccess {
    pub path: PathBuf,
    pub byte_size: u64,
    pub format: OutputFormat,
    /// Full artifact text for SVG output, after background correction.
    pub svg_text: Option<String>,
    /// Base64 copy of binary artifacts when the request asked for one.
    pub base64: Option<String>,
    /// Heuristic warning; the render still ran.
    pub warning: Option<String>,
}

static SCRATCH_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Per-invocation working directory, removed on drop on every exit path.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn new() -> Result<Self, RenderError> {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = SCRATCH_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("undine-render-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path)
            .map_err(|source| RenderError::Io { path: path.clone(), source })?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Run the full pipeline for one request.
    ///
    /// Every failure mode maps to one `RenderError` variant; the scratch
    /// directory is removed regardless of the outcome, timeout included.
    pub async fn render(&self, request: &RenderRequest) -> Result<RenderSuccess, RenderError> {
        if request.mermaid_code.trim().is_empty() {
            return Err(RenderError::MissingInput { field: "mermaid_code" });
        }
        if request.file_name.trim().is_empty() {
            return Err(RenderError::MissingInput { field: "file_name" });
        }

        let code = sanitize_labels(&extract_mermaid_code(&request.mermaid_code));
        let warning = (!appears_to_be_mermaid(&code)).then(|| HEURISTIC_WARNING.to_owned());

        let scratch = ScratchDir::new()?;
        let input_path = scratch.path().join("input.mmd");
        let output_path = scratch.path().join(format!("output.{}", request.format.extension()));
        fs::write(&input_path, &code)
            .map_err(|source| RenderError::Io { path: input_path.clone(), source })?;

        let mut command = tokio::process::Command::new(&self.settings.renderer_bin);
        command
            .arg("-q")
            .arg("-i")
            .arg(&input_path)
            .arg("-o")
            .arg(&output_path)
            .arg("-w")
            .arg(request.width.to_string())
            .arg("-H")
            .arg(request.height.to_string())
            .arg("-s")
            .arg(request.scale.to_string())
            .arg("--backgroundColor")
            .arg(&request.background_color);

        match theme_profile(&request.theme) {
            Some(profile) => {
                let config_path = scratch.path().join("config.json");
                fs::write(&config_path, profile.to_config_json().to_string())
                    .map_err(|source| RenderError::Io { path: config_path.clone(), source })?;
                command.arg("--configFile").arg(&config_path);
            }
            None => {
                command.arg("-t").arg(&request.theme);
            }
        }

        command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        // Dropping the wait future on timeout must reap the renderer too.
        command.kill_on_drop(true);

        let child = command.spawn().map_err(|source| RenderError::Spawn {
            renderer: self.settings.renderer_bin.clone(),
            source,
        })?;

        let output =
            match tokio::time::timeout(self.settings.timeout, child.wait_with_output()).await {
                Ok(waited) => waited
                    .map_err(|source| RenderError::Io { path: output_path.clone(), source })?,
                Err(_) => return Err(RenderError::Timeout { timeout: self.settings.timeout }),
            };

        if !output.status.success() {
            return Err(RenderError::RendererFailed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        if !output_path.exists() {
            return Err(RenderError::OutputMissing { path: output_path });
        }

        let bytes = fs::read(&output_path)
            .map_err(|source| RenderError::Io { path: output_path.clone(), source })?;
        let durable_path = self
            .settings
            .output_dir
            .join(format!("{}.{}", request.file_name, request.format.extension()));
        persist_verified(&durable_path, &bytes)?;

        let mut byte_size = bytes.len() as u64;
        let base64 = (request.include_base64 && !request.format.is_text())
            .then(|| STANDARD.encode(&bytes));

        let svg_text = if request.format.is_text() {
            let text = String::from_utf8(bytes).map_err(|_| RenderError::PersistFailed {
                path: durable_path.clone(),
                detail: "renderer produced non-UTF-8 SVG output".to_owned(),
            })?;
            let text = if request.background_color == TRANSPARENT_BACKGROUND {
                // mmdc unconditionally emits a white page background; undo it
                // when the caller asked for transparency.
                let corrected =
                    text.replace(WHITE_BACKGROUND_STYLE, TRANSPARENT_BACKGROUND_STYLE);
                if corrected != text {
                    persist_verified(&durable_path, corrected.as_bytes())?;
                }
                corrected
            } else {
                text
            };
            byte_size = text.len() as u64;
            Some(text)
        } else {
            None
        };

        self.open_in_viewer(&durable_path);

        Ok(RenderSuccess {
            path: durable_path,
            byte_size,
            format: request.format,
            svg_text,
            base64,
            warning,
        })
    }

    fn open_in_viewer(&self, path: &Path) {
        if !self.settings.open_after_render {
            return;
        }
        #[cfg(target_os = "macos")]
        {
            // Fire and forget: the viewer outlives the request and must not
            // block the runtime thread.
            let _ = tokio::process::Command::new("open").arg(path).spawn();
        }
        #[cfg(not(target_os = "macos"))]
        let _ = path;
    }
}

/// Heuristic warning for raw caller input, after extraction/sanitization.
///
/// `render` computes the same warning internally; this lets callers attach
/// it to failure outcomes too, so the advisory survives a failed render.
pub fn heuristic_warning(mermaid_code: &str) -> Option<String> {
    let code = sanitize_labels(&extract_mermaid_code(mermaid_code));
    (!appears_to_be_mermaid(&code)).then(|| HEURISTIC_WARNING.to_owned())
}

/// Write `bytes` to `path` and verify the durable copy byte-for-byte by size.
fn persist_verified(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    fs::write(path, bytes).map_err(|source| RenderError::PersistFailed {
        path: path.to_path_buf(),
        detail: source.to_string(),
    })?;

    let written = fs::metadata(path)
        .map_err(|source| RenderError::PersistFailed {
            path: path.to_path_buf(),
            detail: source.to_string(),
        })?
        .len();
    if written != bytes.len() as u64 {
        return Err(RenderError::PersistFailed {
            path: path.to_path_buf(),
            detail: format!("size mismatch: expected {} bytes, got {written}", bytes.len()),
        });
    }
    Ok(())
}
