use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::brief::InsightBrief;

const MARKET_SYSTEM_PROMPT: &str = "You are a professional crypto analyst. Provide concise, \
neutral, investor-grade insights for the last 24 hours. Use bullet points and bold text using \
**bold** syntax. Include: price trend, liquidity context, volume/txs structure, notable risks, \
and actionable checklist.";

const RISK_SYSTEM_PROMPT: &str = "You are a professional token security analyst. Provide clear, \
structured analysis of token safety data. Be direct and helpful.";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("completion service credentials not configured")]
    MissingCredentials,

    #[error("completion response contained no choices")]
    EmptyCompletion,
}

/// Selects the system prompt, output shape, and sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightMode {
    /// Bullet-point investor brief. Lower temperature favors consistency.
    MarketInsight,
    /// Four-section structured risk verdict. Higher temperature favors
    /// varied phrasing.
    RiskAssessment,
}

/// Sampling parameters and credentials for the completion service. All of
/// these are configuration, surfaced through `AppConfig`, not constants
/// buried in call sites.
#[derive(Debug, Clone)]
pub struct InsightSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub market_temperature: f32,
    pub market_max_tokens: u32,
    pub risk_temperature: f32,
    pub risk_max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Anything that can turn a brief into narrative text. The production
/// implementation is [`InsightClient`]; tests substitute stubs.
#[async_trait]
pub trait NarrativeSource: Send + Sync {
    async fn generate(&self, brief: &InsightBrief, mode: InsightMode)
        -> Result<String, InsightError>;
}

#[derive(Debug, Clone)]
pub struct InsightClient {
    http: Client,
    settings: InsightSettings,
}

impl InsightClient {
    pub fn new(http: Client, settings: InsightSettings) -> Self {
        Self { http, settings }
    }

    fn sampling(&self, mode: InsightMode) -> (f32, u32) {
        match mode {
            InsightMode::MarketInsight => (
                self.settings.market_temperature,
                self.settings.market_max_tokens,
            ),
            InsightMode::RiskAssessment => {
                (self.settings.risk_temperature, self.settings.risk_max_tokens)
            }
        }
    }

    fn user_prompt(brief: &InsightBrief, mode: InsightMode) -> String {
        match (brief, mode) {
            (InsightBrief::Market(b), _) => {
                let chain = b.chain.as_deref().unwrap_or("unknown");
                let body = serde_json::to_string(b).unwrap_or_default();
                format!("Analyze this token on {chain} blockchain:\n{body}")
            }
            (InsightBrief::Risk(payload), _) => {
                let body = serde_json::to_string_pretty(payload).unwrap_or_default();
                format!(
                    "You are an expert token rug pull analyst. Analyze this token security data \
and provide a clear, human-readable assessment.\n\nToken Data:\n{body}\n\n\
Provide your analysis in the following structure:\n\
1. Overall Risk Assessment: [Safe/Moderate Risk/High Risk]\n\
2. Key Risk Factors: [List any red flags found]\n\
3. Positive Indicators: [List any good signs]\n\
4. Final Recommendation: [Clear action item for investors]\n\n\
Be direct, professional, and focus on what matters most to investors. Use clear language \
without excessive technical jargon."
                )
            }
        }
    }
}

#[async_trait]
impl NarrativeSource for InsightClient {
    /// Request a narrative completion. The service is treated as unreliable:
    /// non-success statuses carry the body back to the caller, and the
    /// response size is bounded by the per-mode output-token ceiling.
    async fn generate(
        &self,
        brief: &InsightBrief,
        mode: InsightMode,
    ) -> Result<String, InsightError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingCredentials)?;

        let (temperature, max_tokens) = self.sampling(mode);
        let system = match mode {
            InsightMode::MarketInsight => MARKET_SYSTEM_PROMPT,
            InsightMode::RiskAssessment => RISK_SYSTEM_PROMPT,
        };
        let user = Self::user_prompt(brief, mode);

        let request = ChatRequest {
            model: &self.settings.model,
            temperature,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
        };

        let resp = self
            .http
            .post(&self.settings.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(InsightError::EmptyCompletion)?;

        Ok(text.trim().to_string())
    }
}
