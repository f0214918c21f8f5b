//! Serve command: run the HTTP API on the configured backend

use clap::Args;

use crate::AppContext;

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (defaults to the configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port (defaults to the configured port)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn run(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let host = args.host.as_deref().unwrap_or(&ctx.config.host);
    let port = args.port.unwrap_or(ctx.config.port);
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting HTTP API on {}", addr);
    pathfinder_server::run_server(ctx.storage.clone(), &addr).await
}
