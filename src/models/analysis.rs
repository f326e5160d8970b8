use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One renderable section of a composed view. The loading state lives on the
/// client while a request is in flight; the service only ever reports
/// populated content or a short human-readable failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Section {
    Populated { content: String },
    Failed { reason: String },
}

impl Section {
    pub fn populated(content: impl Into<String>) -> Self {
        Section::Populated {
            content: content.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Section::Failed {
            reason: reason.into(),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Section::Populated { content } => Some(content),
            Section::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Section::Failed { .. })
    }
}

/// The full set of rendered sections produced for one analysis request.
/// Sections degrade independently; a failure in one never empties another.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedView {
    pub address: String,
    pub chain: Option<String>,
    pub token_symbol: Option<String>,
    pub overview: Section,
    pub metrics: Section,
    pub pools: Section,
    pub insight: Section,
}

/// Database row for the analyses table. Insert-only: saved analyses are
/// immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contract_address: String,
    pub chain: Option<String>,
    pub token_symbol: Option<String>,
    pub token_data: String,
    pub metrics_data: String,
    pub ai_insights: String,
    pub created_at: DateTime<Utc>,
}
