use serde::{Deserialize, Serialize};
use std::fmt;

use super::utils::fold_hyphens;

pub const AUDIENCE: &str =
    "Designed for CISOs, security leads, and engineering managers who need fast, reliable context.";

pub const SOURCES_HINT: &str = "Links at the bottom of the briefing come from live web research via Perplexity. \
Always click through and verify before acting on them in production environments.";

/// Topic the retrieval prompt is biased towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FocusArea {
    #[default]
    AllThreats,
    Ransomware,
    CloudSaas,
    SupplyChain,
    AiLlm,
    Identity,
}

impl FocusArea {
    pub const ALL: [FocusArea; 6] = [
        FocusArea::AllThreats,
        FocusArea::Ransomware,
        FocusArea::CloudSaas,
        FocusArea::SupplyChain,
        FocusArea::AiLlm,
        FocusArea::Identity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FocusArea::AllThreats => "All threats",
            FocusArea::Ransomware => "Ransomware",
            FocusArea::CloudSaas => "Cloud & SaaS security",
            FocusArea::SupplyChain => "Supply-chain / third-party risk",
            FocusArea::AiLlm => "AI & LLM security",
            FocusArea::Identity => "Identity & access (IAM)",
        }
    }

    /// Exact label match; anything unrecognized falls back to `All threats`.
    pub fn from_label(label: &str) -> Self {
        let label = fold_hyphens(label);
        Self::ALL
            .into_iter()
            .find(|area| area.label() == label)
            .unwrap_or_default()
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for FocusArea {
    fn from(label: String) -> Self {
        FocusArea::from_label(&label)
    }
}

impl From<FocusArea> for String {
    fn from(area: FocusArea) -> Self {
        area.label().to_string()
    }
}

/// How long and detailed the briefing should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DetailLevel {
    HighLevel,
    #[default]
    Balanced,
    DeepDive,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::HighLevel,
        DetailLevel::Balanced,
        DetailLevel::DeepDive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailLevel::HighLevel => "High-level summary",
            DetailLevel::Balanced => "Balanced",
            DetailLevel::DeepDive => "Deep dive",
        }
    }

    /// Exact label match; anything unrecognized falls back to `Balanced`.
    pub fn from_label(label: &str) -> Self {
        let label = fold_hyphens(label);
        Self::ALL
            .into_iter()
            .find(|level| level.label() == label)
            .unwrap_or_default()
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for DetailLevel {
    fn from(label: String) -> Self {
        DetailLevel::from_label(&label)
    }
}

impl From<DetailLevel> for String {
    fn from(level: DetailLevel) -> Self {
        level.label().to_string()
    }
}

/// One user question plus the knobs that shape the prompts.
///
/// The caller's labels are kept verbatim for the prompt text; the parsed
/// enums only select the hint sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingRequest {
    query: String,
    focus_label: String,
    detail_label: String,
    focus_area: FocusArea,
    detail_level: DetailLevel,
}

impl BriefingRequest {
    pub fn new(query: impl Into<String>, focus_area: FocusArea, detail_level: DetailLevel) -> Self {
        Self::from_labels(query, focus_area.label(), detail_level.label())
    }

    pub fn from_labels(query: impl Into<String>, focus_label: &str, detail_label: &str) -> Self {
        let query: String = query.into();
        Self {
            query: query.trim().to_string(),
            focus_label: focus_label.to_string(),
            detail_label: detail_label.to_string(),
            focus_area: FocusArea::from_label(focus_label),
            detail_level: DetailLevel::from_label(detail_label),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn focus_label(&self) -> &str {
        &self.focus_label
    }

    pub fn detail_label(&self) -> &str {
        &self.detail_label
    }

    pub fn focus_area(&self) -> FocusArea {
        self.focus_area
    }

    pub fn detail_level(&self) -> DetailLevel {
        self.detail_level
    }
}

/// Raw web-grounded answer, including its trailing `Sources:` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedContext {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingResult {
    pub answer: String,
    pub web_context: String,
    pub risk_score: String,
    pub audience: String,
    pub sources_hint: String,
}
