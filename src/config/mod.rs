use std::env;
use std::time::Duration;

const DEFAULT_COMPLETION_API_URL: &str = "https://api.fireworks.ai/inference/v1/chat/completions";
const DEFAULT_COMPLETION_MODEL: &str =
    "accounts/sentientfoundation-serverless/models/dobby-mini-unhinged-plus-llama-3-1-8b";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Shared secret for validating session tokens issued by the identity
    /// provider.
    pub jwt_secret: String,

    // Upstream data sources
    pub market_api_base: Option<String>,
    pub risk_api_base: Option<String>,
    pub risk_api_key: Option<String>,

    // Completion service
    pub completion_api_url: String,
    pub completion_api_key: Option<String>,
    pub completion_model: String,
    pub market_insight_temperature: f32,
    pub market_insight_max_tokens: u32,
    pub risk_assessment_temperature: f32,
    pub risk_assessment_max_tokens: u32,

    /// Bounded timeout applied to every outbound call; expiry surfaces as a
    /// transport error for the affected section.
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,

            market_api_base: env::var("MARKET_API_BASE").ok(),
            risk_api_base: env::var("RISK_API_BASE").ok(),
            risk_api_key: env::var("RISK_API_KEY").ok(),

            completion_api_url: env::var("COMPLETION_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_URL.into()),
            completion_api_key: env::var("COMPLETION_API_KEY").ok(),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.into()),

            market_insight_temperature: env::var("MARKET_INSIGHT_TEMPERATURE")
                .unwrap_or_else(|_| "0.4".into())
                .parse()
                .unwrap_or(0.4),
            market_insight_max_tokens: env::var("MARKET_INSIGHT_MAX_TOKENS")
                .unwrap_or_else(|_| "450".into())
                .parse()
                .unwrap_or(450),
            risk_assessment_temperature: env::var("RISK_ASSESSMENT_TEMPERATURE")
                .unwrap_or_else(|_| "0.7".into())
                .parse()
                .unwrap_or(0.7),
            risk_assessment_max_tokens: env::var("RISK_ASSESSMENT_MAX_TOKENS")
                .unwrap_or_else(|_| "1000".into())
                .parse()
                .unwrap_or(1000),

            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".into())
                    .parse()
                    .unwrap_or(15),
            ),
        })
    }

    /// Returns true if the completion service is configured; without a key
    /// the insight section degrades on every request.
    pub fn has_completion_auth(&self) -> bool {
        self.completion_api_key.is_some()
    }
}
