use super::state::{BriefingRequest, DetailLevel, FocusArea};

pub const RETRIEVAL_SYSTEM_PROMPT: &str =
    "You are a cybersecurity threat‑intel assistant that always cites sources at the end.";

pub const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You are "CyberGuard AI", a senior cybersecurity advisor.
You turn raw research notes into executive‑ready threat briefings.

Requirements:
• Be accurate and avoid exaggeration.
• If something is uncertain or early‑stage, say so.
• Write as if for a CISO or security lead in a mid‑size company.
• Use clear section headings and bullet points."#;

const RETRIEVAL_INSTRUCTIONS: &str = r#"You are a senior cybersecurity analyst.

Task:
• Research the very latest, credible, public information from the web.
• Focus on: {focus_area}.
• User question: {query}

Instructions:
• Start with a short paragraph summarizing what is happening.
• Then provide 3–7 concise bullet points with key facts and statistics.
• End with a section called "Sources" that lists numbered links, for example:
  Sources:
  1. https://example.com/article‑1
  2. https://example.com/article‑2

{focus_hint}
{depth_hint}"#;

const SYNTHESIS_INSTRUCTIONS: &str = r#"User question:
{query}

Web research notes (may include numbered Sources at the end):
---
{web_context}
---

Using ONLY the information above (plus common security best practices),
produce a structured briefing with this format:

1. Executive Summary (2–4 short bullet points)
2. What We Know So Far
3. Who Is Most At Risk
4. Technical Details (only if available)
5. Recommended Actions in the Next 30–90 Days
6. One‑Paragraph Brief for Non‑Technical Leadership
7. Sources (reuse or clean up the numbered links, do not invent URLs)

Depth level requested by the user: {detail_level}"#;

pub fn focus_hint(focus_area: &str) -> &'static str {
    FocusArea::from_label(focus_area).hint()
}

pub fn depth_hint(detail_level: &str) -> &'static str {
    DetailLevel::from_label(detail_level).hint()
}

impl FocusArea {
    pub fn hint(self) -> &'static str {
        match self {
            FocusArea::Ransomware => "Focus on ransomware campaigns, double‑extortion, data leaks, and impact on operations.",
            FocusArea::CloudSaas => "Emphasize cloud misconfigurations, SaaS abuse, and identity‑based attacks in cloud environments.",
            FocusArea::SupplyChain => "Highlight attacks via suppliers, managed service providers, CI/CD, and software dependencies.",
            FocusArea::AiLlm => "Highlight prompt injection, data exfiltration via LLMs, model supply‑chain risks, and AI governance.",
            FocusArea::Identity => "Emphasize credential theft, phishing, MFA bypass, and privileged access abuse.",
            FocusArea::AllThreats => "Consider the overall threat landscape and pick the most relevant details.",
        }
    }
}

impl DetailLevel {
    pub fn hint(self) -> &'static str {
        match self {
            DetailLevel::HighLevel => "Keep it concise (250–350 words).",
            DetailLevel::Balanced => "Write a balanced briefing (400–600 words).",
            DetailLevel::DeepDive => "Go deep (700–900 words) with rich technical detail.",
        }
    }
}

pub fn retrieval_prompt(request: &BriefingRequest) -> String {
    let (head, tail) = RETRIEVAL_INSTRUCTIONS
        .split_once("{query}")
        .map(|(head, tail)| (head.to_string(), tail.to_string()))
        .unwrap_or_default();

    // Caller text goes in last so braces it contains stay literal.
    let tail = tail
        .replace("{focus_hint}", request.focus_area().hint())
        .replace("{depth_hint}", request.detail_level().hint());
    format!(
        "{}{}{}",
        head.replace("{focus_area}", request.focus_label()),
        request.query(),
        tail
    )
}

pub fn synthesis_prompt(query: &str, web_context: &str, detail_label: &str) -> String {
    let (head, tail) = SYNTHESIS_INSTRUCTIONS
        .split_once("{web_context}")
        .map(|(head, tail)| (head.to_string(), tail.to_string()))
        .unwrap_or_default();

    // Caller text goes in last so braces it contains stay literal.
    format!(
        "{}{}{}",
        head.replace("{query}", query),
        web_context,
        tail.replace("{detail_level}", detail_label)
    )
}
