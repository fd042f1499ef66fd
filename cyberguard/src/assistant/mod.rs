pub mod configuration;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod retrieval;
pub mod scoring;
pub mod state;
pub mod synthesis;
pub mod utils;
