use std::sync::Arc;

use clap::Parser;

mod api;
mod config;
mod error;
mod http;
mod logger;
mod recipe;
mod routing;
mod server;
mod store;

/// In-memory recipe CRUD service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file name, without extension (a missing file is fine)
    #[arg(short, long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let cfg = config::Config::load_from(&cli.config)?;
    logger::init(&cfg.logging)?;

    // Tokio runtime, sized by the workers setting when present
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    // The only store instance; everything else reaches it through AppState
    let store: Arc<dyn store::RecipeStore> = Arc::new(store::MemStore::new());
    let state = Arc::new(config::AppState::new(cfg, store)?);

    server::run(listener, state, server::signal::shutdown_signal()).await;
    Ok(())
}
