use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pagelens_lib::{serve, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pagelens=info".parse()?))
        .init();

    let config = Config::from_env()?;
    serve(config).await?;

    Ok(())
}
