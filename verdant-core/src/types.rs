//! Wire-level payload types for the dashboard API.
//!
//! Field names and enum spellings follow the remote API. Anything the
//! backend sends in camelCase carries an explicit serde rename so the
//! Rust side stays snake_case.

use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

/// Carbon impact classification attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// Wire spelling, as the API returns it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Category of an insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Recommendation,
    Achievement,
    Tip,
}

/// Insight priority. `Positive` is the API's spelling for achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    Positive,
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

/// A recorded spending transaction with its carbon accounting.
///
/// Server-assigned ids are positive. Entries queued locally while the
/// backend is unreachable carry negative ids so callers can tell them
/// apart until the queue is drained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    /// Carbon footprint in kg CO2.
    pub carbon: f64,
    pub category: String,
    /// ISO date (YYYY-MM-DD) as the API transmits it.
    pub date: String,
    pub impact: ImpactLevel,
}

/// Input for creating a transaction. The server computes carbon and impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
}

/// One point of the footprint trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Month abbreviation, e.g. "Jan".
    pub month: String,
    /// Footprint in tons CO2.
    pub footprint: f64,
    /// Monthly target in tons CO2. Invariant: `target <= footprint`.
    pub target: f64,
}

/// Response body of `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPayload {
    pub transactions: Vec<Transaction>,
    #[serde(rename = "chartData")]
    pub chart_data: Vec<ChartPoint>,
}

// ============================================================================
// INSIGHTS & ASSISTANT
// ============================================================================

/// A single insight card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub priority: Priority,
}

/// A chat message shown in the assistant panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub message: String,
    /// Human-readable relative timestamp ("2 hours ago", "Just now").
    pub timestamp: String,
    #[serde(rename = "isUser", default, skip_serializing_if = "is_false")]
    pub is_user: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

/// Response body of `GET /insights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsPayload {
    pub insights: Vec<Insight>,
    pub messages: Vec<AssistantMessage>,
}

// ============================================================================
// PREDICTION & CONVERSATION
// ============================================================================

/// Response body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonPrediction {
    /// Carbon estimate in kg CO2.
    pub carbon: f64,
    pub impact_level: ImpactLevel,
    pub recommendation: String,
}

/// One turn of the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Response body of `POST /conversation`: the full history, newest last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: Vec<ChatTurn>,
}

impl ChatResponse {
    /// The assistant's latest reply, if the history is non-empty.
    pub fn latest(&self) -> Option<&ChatTurn> {
        self.response.last()
    }
}
