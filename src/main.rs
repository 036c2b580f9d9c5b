use std::sync::Arc;

use blog_api::{Config, PostStore, Server, app};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .init();

    let store = Arc::new(PostStore::seeded());
    info!(posts = store.len(), "store seeded");

    Server::bind(config.addr).serve(app(store)).await?;
    Ok(())
}
