use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::configuration::Configuration;
use super::error::{ConfigurationError, RetrievalError};
use super::provider::{ChatCompletionClient, ChatProvider};
use super::retrieval::Retriever;
use super::scoring::heuristic_risk_score;
use super::state::{BriefingRequest, BriefingResult, AUDIENCE, SOURCES_HINT};
use super::synthesis::Synthesizer;

/// Web-grounded retrieval followed by structured synthesis.
///
/// Holds only read-only provider handles, so one pipeline can serve any
/// number of independent requests.
#[derive(Clone)]
pub struct BriefingPipeline {
    retriever: Retriever,
    synthesizer: Synthesizer,
}

impl BriefingPipeline {
    /// Build both HTTP providers from validated configuration. Fails before
    /// any client exists if a credential is empty.
    pub fn new(config: &Configuration) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let perplexity = ChatCompletionClient::new(
            "Perplexity",
            config.perplexity_base_url.as_str(),
            config.perplexity_api_key.as_str(),
            config.perplexity_model.as_str(),
        );
        let openai = ChatCompletionClient::new(
            "OpenAI",
            config.openai_base_url.as_str(),
            config.openai_api_key.as_str(),
            config.openai_model.as_str(),
        );

        Ok(Self::with_providers(Arc::new(perplexity), Arc::new(openai)))
    }

    pub fn with_providers(
        retrieval: Arc<dyn ChatProvider>,
        synthesis: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            retriever: Retriever::new(retrieval),
            synthesizer: Synthesizer::new(synthesis),
        }
    }

    pub fn retrieval_model(&self) -> &str {
        self.retriever.provider().model()
    }

    pub fn synthesis_model(&self) -> &str {
        self.synthesizer.provider().model()
    }

    /// Label-based entry point. Unknown labels are echoed into the prompts
    /// as given and only the hint sentences fall back to the defaults.
    pub async fn generate_briefing(
        &self,
        query: &str,
        focus_area: &str,
        detail_level: &str,
    ) -> Result<BriefingResult, RetrievalError> {
        let request = BriefingRequest::from_labels(query, focus_area, detail_level);
        self.run(&request).await
    }

    pub async fn run(&self, request: &BriefingRequest) -> Result<BriefingResult, RetrievalError> {
        let started = Instant::now();

        let context = self.retriever.retrieve(request).await?;
        let answer = self
            .synthesizer
            .synthesize(request.query(), &context, request.detail_label())
            .await?;

        let risk_score = heuristic_risk_score(&context.text);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(risk = risk_score.value(), elapsed_ms, "Briefing ready");

        Ok(BriefingResult {
            answer,
            web_context: context.text,
            risk_score: risk_score.label().to_string(),
            audience: AUDIENCE.to_string(),
            sources_hint: SOURCES_HINT.to_string(),
        })
    }
}
