//! Verdant Client - Remote API and Offline Resilience
//!
//! The data layer the dashboard surfaces sit on: a typed HTTP client
//! for the backend ([`ApiClient`]), the cache-first resilient fetch
//! path ([`ResilientSource`]), synthetic fallback generators, and the
//! offline transaction queue glue.
//!
//! The central guarantee is that reads never fail: every dataset fetch
//! resolves to cached, live, or synthesized data, tagged with its
//! [`Origin`] so the UI can badge non-live values.

pub mod api;
pub mod config;
pub mod offline;
pub mod source;
pub mod status;
pub mod synth;

pub use api::{ApiClient, ChartDataEndpoint, InsightsEndpoint, TransactionsEndpoint};
pub use config::{ClientConfig, ConfigError, DEFAULT_TIMEOUT_MS};
pub use offline::submit_transaction;
pub use source::{DatasetSpec, FetchResult, Origin, RemoteSource, ResilientSource, SourceConfig};
pub use status::ServerStatus;
pub use synth::{
    chart_series, fallback_chat_reply, insights_payload, mock_transactions, transactions_payload,
    Entropy, FixedEntropy, ThreadEntropy, SERIES_LEN,
};
