//! Logical dataset keys and their persisted storage-key mapping.
//!
//! A dataset key names one cacheable, fetchable collection ("chart_data",
//! "insights", ...). The persisted key adds the `verdant_` prefix so the
//! backing store can host unrelated keys without collisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix applied to every persisted key.
pub const STORAGE_PREFIX: &str = "verdant_";

/// A validated, non-empty logical dataset name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetKey(String);

impl DatasetKey {
    /// Create a dataset key. Returns `None` for empty or whitespace-only
    /// names; key validity is the caller's contract, not a runtime error.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    /// The footprint trend chart series.
    pub fn chart_data() -> Self {
        Self("chart_data".to_string())
    }

    /// The recent-transactions list (mock set when offline).
    pub fn transactions() -> Self {
        Self("mock_transactions".to_string())
    }

    /// Insights and assistant messages.
    pub fn insights() -> Self {
        Self("insights".to_string())
    }

    /// Transactions queued while the backend was unreachable.
    pub fn offline_transactions() -> Self {
        Self("offline_transactions".to_string())
    }

    /// The logical name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The key under which this dataset is persisted.
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every dataset key Verdant persists, used by bulk reset.
pub fn all_keys() -> Vec<DatasetKey> {
    vec![
        DatasetKey::chart_data(),
        DatasetKey::transactions(),
        DatasetKey::insights(),
        DatasetKey::offline_transactions(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_names() {
        assert!(DatasetKey::new("").is_none());
        assert!(DatasetKey::new("   ").is_none());
        assert!(DatasetKey::new("chart_data").is_some());
    }

    #[test]
    fn storage_key_is_prefixed() {
        assert_eq!(DatasetKey::chart_data().storage_key(), "verdant_chart_data");
        assert_eq!(
            DatasetKey::offline_transactions().storage_key(),
            "verdant_offline_transactions"
        );
    }

    #[test]
    fn all_keys_contains_every_dataset() {
        let keys = all_keys();
        assert_eq!(keys.len(), 4);
        assert!(keys.contains(&DatasetKey::insights()));
    }
}
