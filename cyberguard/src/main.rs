use cyberguard::{init, init_tracing, server::run_server, Configuration};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    init_tracing();

    let config = match Configuration::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    info!(
        retrieval_model = %config.perplexity_model,
        synthesis_model = %config.openai_model,
        "Successfully loaded configuration"
    );

    run_server(config).await
}
