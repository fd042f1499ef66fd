use std::sync::Arc;
use tracing::info;

use super::error::RetrievalError;
use super::prompts::{retrieval_prompt, RETRIEVAL_SYSTEM_PROMPT};
use super::provider::{ChatProvider, Message};
use super::state::{BriefingRequest, RetrievedContext};

/// First stage: asks a web-search model for fresh, cited context.
#[derive(Clone)]
pub struct Retriever {
    provider: Arc<dyn ChatProvider>,
}

impl Retriever {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    pub async fn retrieve(&self, request: &BriefingRequest) -> Result<RetrievedContext, RetrievalError> {
        let messages = [
            Message::system(RETRIEVAL_SYSTEM_PROMPT),
            Message::user(retrieval_prompt(request)),
        ];

        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            focus_area = %request.focus_area(),
            "Researching live sources"
        );

        let text = self.provider.complete(&messages).await?;
        Ok(RetrievedContext { text })
    }
}
