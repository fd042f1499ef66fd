//! Keyword heuristic that turns research notes into a rough 1-5 risk label.
//!
//! This is not a calibrated probability. Each phrase counts at most once no
//! matter how often it appears.

use serde::Serialize;
use std::fmt;

use super::utils::fold_hyphens;

const BASELINE: i32 = 3;
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 5;

const HIGH_TERMS: [&str; 5] = [
    "active exploitation",
    "critical",
    "ransomware",
    "zero-day",
    "nation-state",
];

const LOW_TERMS: [&str; 3] = ["proof of concept", "theoretical", "no active exploits"];

const LABELS: [(i32, &str); 5] = [
    (1, "1/5 – Low (monitor only)"),
    (2, "2/5 – Low‑Medium (monitor + basic hardening)"),
    (3, "3/5 – Medium (prioritize in backlog)"),
    (4, "4/5 – High (treat as active program item)"),
    (5, "5/5 – Critical (urgent response likely needed)"),
];

const FALLBACK_LABEL: &str = "3/5 – Medium (prioritize in backlog)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RiskScore(i32);

impl RiskScore {
    pub fn value(self) -> i32 {
        self.0
    }

    pub fn label(self) -> &'static str {
        LABELS
            .iter()
            .find(|(score, _)| *score == self.0)
            .map(|(_, label)| *label)
            .unwrap_or(FALLBACK_LABEL)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn heuristic_risk_score(web_context: &str) -> RiskScore {
    let text = fold_hyphens(&web_context.to_lowercase());

    let high = HIGH_TERMS.iter().filter(|term| text.contains(*term)).count() as i32;
    let low = LOW_TERMS.iter().filter(|term| text.contains(*term)).count() as i32;

    RiskScore((BASELINE + high - low).clamp(MIN_SCORE, MAX_SCORE))
}
