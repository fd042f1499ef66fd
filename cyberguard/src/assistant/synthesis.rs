use std::sync::Arc;
use tracing::info;

use super::error::RetrievalError;
use super::prompts::{synthesis_prompt, SYNTHESIS_SYSTEM_PROMPT};
use super::provider::{ChatProvider, Message};
use super::state::RetrievedContext;

/// Second stage: turns research notes into the seven-section briefing.
#[derive(Clone)]
pub struct Synthesizer {
    provider: Arc<dyn ChatProvider>,
}

impl Synthesizer {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    pub async fn synthesize(
        &self,
        query: &str,
        context: &RetrievedContext,
        detail_label: &str,
    ) -> Result<String, RetrievalError> {
        let messages = [
            Message::system(SYNTHESIS_SYSTEM_PROMPT),
            Message::user(synthesis_prompt(query, &context.text, detail_label)),
        ];

        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            context_chars = context.text.len(),
            "Generating structured briefing"
        );

        self.provider.complete(&messages).await
    }
}
