use campaign_core::{CampaignClient, CampaignRequest, GetCampaignRequest, ResultEnvelope};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tracing::{debug, info};

/// MCP server exposing the campaign adapter as tools
#[derive(Clone)]
pub struct CampaignMcpServer {
    client: CampaignClient,
    tool_router: ToolRouter<Self>,
}

impl CampaignMcpServer {
    pub fn new(client: CampaignClient) -> Self {
        let tool_router = Self::tool_router();
        info!(
            "Tool router initialized with {} tools",
            tool_router.list_all().len()
        );

        Self {
            client,
            tool_router,
        }
    }

    /// Run the MCP server on stdio transport
    pub async fn run_stdio(self) -> miette::Result<()> {
        info!("Starting MCP server on stdio transport");

        use tokio::io::{stdin, stdout};

        let transport = (stdin(), stdout());
        let server = rmcp::ServiceExt::serve(self, transport)
            .await
            .map_err(|e| miette::miette!("Failed to start server: {}", e))?;

        let quit_reason = server
            .waiting()
            .await
            .map_err(|e| miette::miette!("Server error: {}", e))?;

        info!("Server stopped: {:?}", quit_reason);
        Ok(())
    }

    /// Run the MCP server on HTTP transport (streamable), mounted at `/mcp`
    pub async fn run_http(self, port: u16) -> miette::Result<()> {
        use rmcp::transport::streamable_http_server::{
            StreamableHttpService, session::local::LocalSessionManager,
        };
        use tokio::net::TcpListener;

        info!("Starting MCP server on HTTP transport at port {}", port);

        let service = StreamableHttpService::new(
            move || {
                debug!("Creating new MCP handler instance");
                Ok(self.clone())
            },
            LocalSessionManager::default().into(),
            Default::default(),
        );
        let router = axum::Router::new().nest_service("/mcp", service);

        let addr = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| miette::miette!("Failed to bind to {}: {}", addr, e))?;

        info!("MCP HTTP server listening on http://{}/mcp", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
            })
            .await
            .map_err(|e| miette::miette!("Server error: {}", e))
    }
}

/// Render an envelope as tool output. Error envelopes are tool data, not protocol errors.
fn envelope_result(envelope: ResultEnvelope) -> Result<CallToolResult, McpError> {
    if let ResultEnvelope::Error { error } = &envelope {
        debug!(%error, "Returning error envelope");
    }
    Ok(CallToolResult::success(vec![Content::json(
        envelope.into_value(),
    )?]))
}

#[tool_router]
impl CampaignMcpServer {
    #[tool(description = "Create a new email campaign in ActiveCampaign. Returns the upstream \
                          response, including the new campaign ID")]
    pub async fn create_campaign(
        &self,
        params: Parameters<CampaignRequest>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        info!(
            name = %params.name,
            campaign_type = %params.campaign_type,
            status = %params.status,
            lists = params.list_ids.len(),
            "Creating campaign"
        );

        envelope_result(self.client.create_campaign(&params).await)
    }

    #[tool(description = "Get campaign report totals by campaign ID")]
    pub async fn get_campaign(
        &self,
        params: Parameters<GetCampaignRequest>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        info!(campaign_id = params.campaign_id, "Getting campaign");

        envelope_result(self.client.get_campaign(params.campaign_id).await)
    }

    #[tool(description = "List all campaigns in ActiveCampaign")]
    pub async fn list_campaigns(&self) -> Result<CallToolResult, McpError> {
        info!("Listing campaigns");

        envelope_result(self.client.list_campaigns().await)
    }
}

#[tool_handler]
impl ServerHandler for CampaignMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "activecampaign".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "ActiveCampaign campaign tools: create campaigns, fetch campaign report totals \
                 and list campaigns. Results are the upstream API's JSON or {\"error\": ...}."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
