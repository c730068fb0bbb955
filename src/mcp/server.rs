// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{
    AnnotateAble, ListResourcesResult, PaginatedRequestParam, RawResource,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::mermaid::{self, Verdict};
use crate::render::{
    heuristic_warning, OutputFormat, RenderError, RenderRequest, RenderSettings, Renderer,
};

use super::types::*;

pub const SYNTAX_GUIDE_URI: &str = "mermaid://syntax-guide";

const SYNTAX_GUIDE: &str = r#"Mermaid Diagram Syntax Guide

Common Mermaid diagram types:

1. Flowchart:
flowchart TD
    A[Start] --> B{Decision}
    B -->|Yes| C[Process]
    B -->|No| D[End]

2. Sequence Diagram:
sequenceDiagram
    participant A as Alice
    participant B as Bob
    A->>B: Hello Bob, how are you?
    B-->>A: Great!

3. Class Diagram:
classDiagram
    class Animal {
        +String name
        +eat()
    }
    Animal <|-- Dog

4. State Diagram:
stateDiagram-v2
    [*] --> Still
    Still --> [*]
    Still --> Moving

5. ER Diagram:
erDiagram
    CUSTOMER ||--o{ ORDER : places
    ORDER ||--|{ LINE-ITEM : contains

For more syntax, visit: https://mermaid.js.org/
"#;

#[derive(Clone)]
pub struct UndineMcp {
    renderer: Arc<Renderer>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl UndineMcp {
    pub fn new(settings: RenderSettings) -> Self {
        Self { renderer: Arc::new(Renderer::new(settings)), tool_router: Self::tool_router() }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Render Mermaid code through mermaid-cli and persist the artifact; SVG
    /// output is returned inline, binary formats by path (base64 on request).
    #[tool(name = "generate_diagram")]
    async fn generate_diagram(
        &self,
        params: Parameters<GenerateDiagramParams>,
    ) -> Result<Json<GenerateDiagramResponse>, ErrorData> {
        let GenerateDiagramParams {
            mermaid_code,
            format,
            theme,
            width,
            height,
            scale,
            background_color,
            file_name,
            include_base64,
        } = params.0;

        let request = RenderRequest {
            mermaid_code,
            format: format.unwrap_or(OutputFormat::Svg),
            theme: theme.unwrap_or_else(|| "default".to_owned()),
            width: width.unwrap_or(1920),
            height: height.unwrap_or(1080),
            scale: scale.unwrap_or(2.0),
            background_color: background_color.unwrap_or_else(|| "transparent".to_owned()),
            file_name,
            include_base64: include_base64.unwrap_or(false),
        };

        match self.renderer.render(&request).await {
            Ok(success) => {
                let message = describe_success(&success.path, success.byte_size, success.format);
                Ok(Json(GenerateDiagramResponse {
                    status: "ok".to_owned(),
                    message,
                    path: Some(success.path.display().to_string()),
                    byte_size: Some(success.byte_size),
                    format: Some(success.format),
                    warning: success.warning,
                    svg: success.svg_text,
                    base64: success.base64,
                }))
            }
            // Absent required input is a hard parameter error; everything
            // else is reported back as a descriptive result.
            Err(err @ RenderError::MissingInput { .. }) => {
                Err(ErrorData::invalid_params(err.to_string(), None))
            }
            Err(err) => Ok(Json(GenerateDiagramResponse {
                status: "error".to_owned(),
                message: err.to_string(),
                path: None,
                byte_size: None,
                format: None,
                warning: heuristic_warning(&request.mermaid_code),
                svg: None,
                base64: None,
            })),
        }
    }

    /// Check whether text looks like Mermaid diagram syntax; advisory only,
    /// `generate_diagram` renders regardless of the verdict.
    #[tool(name = "validate_mermaid")]
    async fn validate_mermaid(
        &self,
        params: Parameters<ValidateMermaidParams>,
    ) -> Result<Json<ValidateMermaidResponse>, ErrorData> {
        let verdict = mermaid::validate(&params.0.mermaid_code);
        let message = match verdict {
            Verdict::EmptyInput => "validation failed: no Mermaid code provided".to_owned(),
            Verdict::LooksValid => {
                "validation passed: the code appears to contain valid Mermaid diagram syntax"
                    .to_owned()
            }
            Verdict::LooksInvalid => {
                "validation warning: the code doesn't appear to contain valid Mermaid diagram \
                 syntax; check for common patterns like 'graph', 'sequenceDiagram', or \
                 'classDiagram'"
                    .to_owned()
            }
        };

        Ok(Json(ValidateMermaidResponse { verdict: verdict.as_str().to_owned(), message }))
    }
}

#[tool_handler]
impl ServerHandler for UndineMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Undine Mermaid rendering server (tools: generate_diagram, validate_mermaid; \
                 resources: mermaid://syntax-guide)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut resource = RawResource::new(SYNTAX_GUIDE_URI, "Mermaid Syntax Guide");
        resource.description = Some("A guide to Mermaid diagram syntax and examples".to_owned());
        resource.mime_type = Some("text/plain".to_owned());
        Ok(ListResourcesResult {
            resources: vec![resource.no_annotation()],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        if request.uri != SYNTAX_GUIDE_URI {
            return Err(ErrorData::resource_not_found(
                "unknown resource",
                Some(serde_json::json!({ "uri": request.uri })),
            ));
        }
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(SYNTAX_GUIDE, SYNTAX_GUIDE_URI)],
        })
    }
}

fn describe_success(path: &std::path::Path, byte_size: u64, format: OutputFormat) -> String {
    if format.is_text() {
        format!(
            "successfully generated SVG diagram and saved to {} ({byte_size} bytes)",
            path.display()
        )
    } else {
        format!(
            "successfully generated {} diagram and saved to {} ({byte_size} bytes); open the \
             file in an image viewer to inspect it",
            format.extension().to_uppercase(),
            path.display()
        )
    }
}

#[cfg(test)]
mod tests;
