use thiserror::Error;

/// Raised while loading configuration, before any client is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{0} is not set. Add it to your .env file.")]
    MissingKey(&'static str),

    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },
}

/// Raised when a chat-completion call fails, for either stage of the pipeline.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {provider}: {source}")]
    MalformedResponse {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No response content from {provider}")]
    EmptyResponse { provider: String },
}
