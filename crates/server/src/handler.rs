//! MCP surface: `tools/list` and `tools/call` over the catalog.

use crate::catalog::Catalog;
use crate::envelope::{from_outcome, tool_error};
use evolution_gateway_client::Gateway;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use std::sync::Arc;

pub const SERVER_NAME: &str = "evolution-mcp";

const INSTRUCTIONS: &str = "Tools for a WhatsApp account connected through Evolution API. \
Phone numbers are digits with country code and no '+'. Chats and groups are addressed by JID \
(e.g. 5538999999999@s.whatsapp.net, 120363012345678901@g.us).";

#[derive(Clone)]
pub struct EvolutionServer {
    gateway: Arc<dyn Gateway>,
    catalog: Arc<Catalog>,
}

impl EvolutionServer {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>, catalog: Arc<Catalog>) -> Self {
        Self { gateway, catalog }
    }

    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.catalog.list_tools()
    }

    /// Run one tool call: validate, build the endpoint, issue exactly one gateway call, wrap
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Only for an unknown tool name. Every other failure is an error envelope.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let Some(spec) = self.catalog.get(name) else {
            return Err(ErrorData::invalid_params(
                format!("unknown tool: {name}"),
                None,
            ));
        };
        let args = arguments.unwrap_or_default();

        // Undeclared arguments are dropped, not rejected.
        for unknown in self.catalog.unknown_parameters(spec.name, &args) {
            tracing::warn!(tool = %spec.name, parameter = %unknown, "ignoring unknown argument");
        }

        if let Err(invalid) = self.catalog.validate(spec.name, &args) {
            tracing::warn!(
                tool = %spec.name,
                violations = invalid.violations.len(),
                "rejected tool arguments"
            );
            return Ok(tool_error(invalid.to_string()));
        }

        let endpoint = match (spec.build)(&args, self.gateway.instance()) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                tracing::warn!(
                    tool = %spec.name,
                    error = %e,
                    "tool arguments did not map to a request"
                );
                return Ok(tool_error(format!("Invalid params: {e}")));
            }
        };

        tracing::info!(
            tool = %spec.name,
            method = %endpoint.method,
            path = %endpoint.path,
            "calling gateway"
        );
        let outcome = self.gateway.call(endpoint).await;
        Ok(from_outcome(spec.name, spec.failure, outcome))
    }
}

impl ServerHandler for EvolutionServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch(&request.name, request.arguments).await
    }
}
