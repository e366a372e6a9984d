use anyhow::Context as _;
use clap::Parser as _;
use evolution_gateway_client::GatewayClient;
use evolution_mcp::cli::{Cli, config_error_report};
use evolution_mcp::{Catalog, EvolutionServer, logging};
use rmcp::ServiceExt as _;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match cli.gateway_config() {
        Ok(config) => config,
        Err(e) => {
            eprint!("{}", config_error_report(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    logging::init(&cli.log_level, cli.log_format)?;

    let catalog = Catalog::standard()?;
    tracing::info!(
        instance = %config.instance(),
        tools = catalog.len(),
        "evolution-mcp server running on stdio"
    );

    let gateway = GatewayClient::new(config);
    let server = EvolutionServer::new(Arc::new(gateway), Arc::new(catalog));

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("start MCP stdio service")?;
    let reason = service.waiting().await.context("MCP stdio service")?;
    tracing::info!(?reason, "evolution-mcp server stopped");

    Ok(ExitCode::SUCCESS)
}
