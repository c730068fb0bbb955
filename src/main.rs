// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Undine CLI entrypoint.
//!
//! By default this serves MCP over stdio (intended for tool integrations).
//! Use `--http-port` to serve MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp` instead.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};

use undine::mcp::UndineMcp;
use undine::render::RenderSettings;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--output-dir <dir>] [--renderer <bin>] [--timeout-secs <n>] [--no-open]\n  {program} --http-port <port> [--output-dir <dir>] [--renderer <bin>] [--timeout-secs <n>] [--no-open]\n\nThe default mode serves MCP over stdio. --http-port serves MCP over\nstreamable HTTP at `http://127.0.0.1:<port>/mcp` (0 = ephemeral).\n\n--output-dir selects where rendered artifacts are persisted (default: the\ncurrent working directory). --renderer overrides the mermaid-cli binary\n(default: mmdc). --timeout-secs bounds one renderer run (default: 30).\n--no-open disables opening artifacts in the default viewer (macOS only)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    http_port: Option<u16>,
    output_dir: Option<String>,
    renderer: Option<String>,
    timeout_secs: Option<u64>,
    no_open: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--http-port" => {
                if options.http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.http_port = Some(port);
            }
            "--output-dir" => {
                if options.output_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.output_dir = Some(dir);
            }
            "--renderer" => {
                if options.renderer.is_some() {
                    return Err(());
                }
                let bin = args.next().ok_or(())?;
                options.renderer = Some(bin);
            }
            "--timeout-secs" => {
                if options.timeout_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                if secs == 0 {
                    return Err(());
                }
                options.timeout_secs = Some(secs);
            }
            "--no-open" => {
                if options.no_open {
                    return Err(());
                }
                options.no_open = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn render_settings(options: &CliOptions) -> RenderSettings {
    let mut settings = RenderSettings::new();
    if let Some(output_dir) = &options.output_dir {
        settings = settings.with_output_dir(output_dir);
    }
    if let Some(renderer) = &options.renderer {
        settings = settings.with_renderer(renderer);
    }
    if let Some(timeout_secs) = options.timeout_secs {
        settings = settings.with_timeout(Duration::from_secs(timeout_secs));
    }
    if options.no_open {
        settings = settings.with_open_after_render(false);
    }
    settings
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "undine".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mcp = UndineMcp::new(render_settings(&options));
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        let Some(http_port) = options.http_port else {
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        };

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", http_port)).await?;
            let local_addr = listener.local_addr()?;

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            eprintln!("undine: serving MCP at http://127.0.0.1:{}/mcp", local_addr.port());

            let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                server_shutdown.cancelled().await;
            });

            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                shutdown_token.cancel();
            });

            serve.await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("undine: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_http_port() {
        let options = parse_options(["--http-port".to_owned(), "8080".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.http_port, Some(8080));
    }

    #[test]
    fn parses_full_flag_set() {
        let options = parse_options(
            [
                "--http-port",
                "0",
                "--output-dir",
                "/tmp/diagrams",
                "--renderer",
                "mmdc-local",
                "--timeout-secs",
                "10",
                "--no-open",
            ]
            .map(str::to_owned)
            .into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.http_port, Some(0));
        assert_eq!(options.output_dir.as_deref(), Some("/tmp/diagrams"));
        assert_eq!(options.renderer.as_deref(), Some("mmdc-local"));
        assert_eq!(options.timeout_secs, Some(10));
        assert!(options.no_open);
    }

    #[test]
    fn rejects_duplicate_flags() {
        assert!(parse_options(["--no-open", "--no-open"].map(str::to_owned).into_iter()).is_err());
    }

    #[test]
    fn rejects_unknown_flags_and_bad_values() {
        assert!(parse_options(["--what".to_owned()].into_iter()).is_err());
        assert!(parse_options(["--http-port".to_owned()].into_iter()).is_err());
        assert!(parse_options(["--http-port".to_owned(), "NaN".to_owned()].into_iter()).is_err());
        assert!(parse_options(["--timeout-secs".to_owned(), "0".to_owned()].into_iter()).is_err());
    }
}
