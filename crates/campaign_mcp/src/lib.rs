//! Campaign MCP - Model Context Protocol server for ActiveCampaign campaigns
//!
//! Registers the campaign adapter operations as MCP tools:
//! - `create_campaign`
//! - `get_campaign`
//! - `list_campaigns`

pub mod server;
pub mod transport;

pub use server::CampaignMcpServer;
pub use transport::McpTransport;
