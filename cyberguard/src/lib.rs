pub mod assistant;
pub mod server;

pub use assistant::configuration::Configuration;
pub use assistant::error::{ConfigurationError, RetrievalError};
pub use assistant::pipeline::BriefingPipeline;
pub use assistant::state::{BriefingRequest, BriefingResult, DetailLevel, FocusArea};

use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

/// Load a local `.env` file, if any, into the process environment.
pub fn init() {
    dotenv().ok();
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cyberguard=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
