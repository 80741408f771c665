//! Verdant Core - Entity Types
//!
//! Pure data structures with no I/O. All other crates depend on this.
//! Payload shapes mirror the remote dashboard API exactly, so a decoded
//! response round-trips byte-for-byte through serde_json.

use chrono::{DateTime, Utc};

pub mod carbon;
pub mod dataset;
pub mod error;
pub mod types;

pub use carbon::{carbon_factor, estimate, impact_for, DEFAULT_CARBON_FACTOR};
pub use dataset::{all_keys, DatasetKey, STORAGE_PREFIX};
pub use error::{FetchError, StoreError, VerdantError, VerdantResult};
pub use types::{
    AssistantMessage, CarbonPrediction, ChartPoint, ChatResponse, ChatTurn, ImpactLevel, Insight,
    InsightKind, InsightsPayload, NewTransaction, Priority, Transaction, TransactionsPayload,
};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
