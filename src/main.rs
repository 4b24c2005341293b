use clap::Parser;
use mcp_for_azure_devops_work_items::azure::client::AzureDevOpsClient;
use mcp_for_azure_devops_work_items::config::Config;
use mcp_for_azure_devops_work_items::mcp::server::AzureMcpServer;
use mcp_for_azure_devops_work_items::server::http;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run in server mode
    #[arg(long)]
    server: bool,

    /// Port to run the server on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Azure DevOps organization name
    #[arg(long, env = "AZURE_DEVOPS_ORG")]
    organization: Option<String>,

    /// Token used when a request carries no bearer token
    #[arg(long, env = "AZURE_DEVOPS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Azure DevOps REST API base URL
    #[arg(long, env = "AZURE_DEVOPS_API_URL")]
    api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?.merge(Config {
        organization: args.organization,
        fallback_token: args.token,
        api_base_url: args.api_url,
    });

    if config.organization().is_none() {
        log::warn!("No Azure DevOps organization configured; tool calls will fail until one is set");
    }

    let client = AzureDevOpsClient::with_base_url(config.api_base_url());
    let mcp_server = AzureMcpServer::new(Arc::new(client), config);

    if args.server {
        log::info!("Starting web server on port {}", args.port);
        http::run_server(mcp_server, args.port).await?;
    } else {
        log::info!("Starting stdio server");
        let service = mcp_server.serve(stdio()).await?;
        service.waiting().await?;
    }

    Ok(())
}
