use std::{sync::Arc, time::Duration};

use campaign_core::{CampaignClient, EnvCredentials, HttpTransport};
use campaign_mcp::{CampaignMcpServer, McpTransport};
use clap::Parser;
use miette::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// MCP server exposing ActiveCampaign campaign tools
///
/// Credentials are read from ACTIVECAMPAIGN_URL and ACTIVECAMPAIGN_API_KEY
/// (a .env file in the working directory is loaded first) on every tool call.
struct Args {
    /// Transport to serve on: stdio or http
    #[arg(short, long, default_value = "stdio")]
    transport: McpTransport,

    /// Port for the http transport
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Give up on upstream requests after this many seconds
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .build(),
        )
    }))?;
    miette::set_panic_hook();

    let args = Args::parse();

    // stdout belongs to the stdio transport, so logs go to stderr
    let filter = if args.debug {
        EnvFilter::new("campaign_core=debug,campaign_mcp=debug,rmcp=info,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();

    let transport = match args.request_timeout_secs {
        Some(secs) => {
            info!("Upstream request timeout: {}s", secs);
            HttpTransport::with_timeout(Duration::from_secs(secs))?
        }
        None => HttpTransport::new(),
    };
    let client = CampaignClient::new(Arc::new(EnvCredentials), Arc::new(transport));
    let server = CampaignMcpServer::new(client);

    info!("Starting ActiveCampaign MCP server ({})", args.transport);
    match args.transport {
        McpTransport::Stdio => server.run_stdio().await,
        McpTransport::Http => server.run_http(args.port).await,
    }
}
