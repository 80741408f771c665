//! Synthetic dataset generators for offline fallback.
//!
//! When the backend is unreachable and nothing is cached, the UI still
//! needs plausible data. Randomized datasets draw through the
//! [`Entropy`] seam so tests can pin the noise; canned datasets are
//! fixed content.

use chrono::{Datelike, Utc};
use rand::Rng;

use verdant_core::{
    AssistantMessage, ChartPoint, ImpactLevel, Insight, InsightKind, InsightsPayload, Priority,
    Transaction, TransactionsPayload,
};

/// Number of points in a synthesized footprint trend.
pub const SERIES_LEN: usize = 6;

const BASE_FOOTPRINT: f64 = 3.0;
const JITTER: f64 = 0.4;
const TREND_STEP: f64 = 0.12;
const FOOTPRINT_FLOOR: f64 = 0.5;
const TARGET_MARGIN: f64 = 0.4;
const TARGET_TREND_STEP: f64 = 0.05;
const TARGET_FLOOR: f64 = 0.3;

/// Source of uniform noise in `[0, 1)`.
///
/// Production uses [`ThreadEntropy`]; tests inject [`FixedEntropy`] so
/// generated shapes are reproducible.
pub trait Entropy {
    fn unit(&mut self) -> f64;
}

/// Thread-local RNG entropy.
#[derive(Debug, Default)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic entropy cycling through a fixed sequence.
#[derive(Debug)]
pub struct FixedEntropy {
    values: Vec<f64>,
    index: usize,
}

impl FixedEntropy {
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.5] } else { values };
        Self { values, index: 0 }
    }
}

impl Entropy for FixedEntropy {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v
    }
}

fn uniform(entropy: &mut dyn Entropy, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * entropy.unit()
}

/// A six-month footprint trend ending in the current month.
///
/// Footprints jitter around a gently declining baseline; targets sit
/// below their footprint and decline slightly faster, so the series
/// reads as progress toward a goal.
pub fn chart_series(entropy: &mut dyn Entropy) -> Vec<ChartPoint> {
    recent_months(SERIES_LEN)
        .into_iter()
        .enumerate()
        .map(|(i, month)| {
            let jitter = uniform(entropy, -JITTER, JITTER);
            let footprint = (BASE_FOOTPRINT + jitter - TREND_STEP * i as f64).max(FOOTPRINT_FLOOR);
            let target = (footprint - TARGET_MARGIN - TARGET_TREND_STEP * i as f64)
                .max(TARGET_FLOOR)
                .min(footprint);
            ChartPoint {
                month,
                footprint,
                target,
            }
        })
        .collect()
}

fn recent_months(len: usize) -> Vec<String> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let current = Utc::now().month0() as isize;
    (0..len)
        .map(|i| {
            let offset = (len - 1 - i) as isize;
            let idx = (current - offset).rem_euclid(12) as usize;
            MONTHS[idx].to_string()
        })
        .collect()
}

struct TransactionTemplate {
    description: &'static str,
    amount: f64,
    carbon: f64,
    category: &'static str,
    date: &'static str,
}

const TRANSACTION_TEMPLATES: [TransactionTemplate; 5] = [
    TransactionTemplate {
        description: "Weekly groceries",
        amount: 65.50,
        carbon: 4.2,
        category: "Food",
        date: "2025-09-01",
    },
    TransactionTemplate {
        description: "Commute to work",
        amount: 25.00,
        carbon: 7.8,
        category: "Transport",
        date: "2025-09-02",
    },
    TransactionTemplate {
        description: "Clothing purchase",
        amount: 89.99,
        carbon: 12.3,
        category: "Shopping",
        date: "2025-09-03",
    },
    TransactionTemplate {
        description: "Home electricity",
        amount: 42.75,
        carbon: 6.1,
        category: "Energy",
        date: "2025-09-04",
    },
    TransactionTemplate {
        description: "Weekend getaway",
        amount: 189.50,
        carbon: 28.5,
        category: "Travel",
        date: "2025-09-05",
    },
];

/// Impact classification for synthesized transactions.
///
/// Synthetic carbon values are kg-scale, unlike the tons-scale values
/// the prediction endpoint returns, so the thresholds differ.
fn impact_for_kg(carbon: f64) -> ImpactLevel {
    if carbon < 2.0 {
        ImpactLevel::Low
    } else if carbon < 7.0 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::High
    }
}

/// Five plausible transactions with jittered amounts and footprints.
pub fn mock_transactions(entropy: &mut dyn Entropy) -> Vec<Transaction> {
    TRANSACTION_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let amount = template.amount * uniform(entropy, 0.9, 1.1);
            let carbon = template.carbon * uniform(entropy, 0.85, 1.15);
            Transaction {
                id: (i + 1) as i64,
                description: template.description.to_string(),
                amount: (amount * 100.0).round() / 100.0,
                carbon: (carbon * 10.0).round() / 10.0,
                category: template.category.to_string(),
                date: template.date.to_string(),
                impact: impact_for_kg(carbon),
            }
        })
        .collect()
}

/// Full transactions payload: mock transactions plus a fresh trend.
pub fn transactions_payload(entropy: &mut dyn Entropy) -> TransactionsPayload {
    TransactionsPayload {
        transactions: mock_transactions(entropy),
        chart_data: chart_series(entropy),
    }
}

/// Canned insight cards and assistant starter messages.
pub fn insights_payload() -> InsightsPayload {
    InsightsPayload {
        insights: vec![
            Insight {
                kind: InsightKind::Recommendation,
                title: "Switch to Public Transport".to_string(),
                description: "Your transport emissions are 40% above average. Consider using \
                              public transport 2-3 times per week."
                    .to_string(),
                impact: "Could save 0.3 tons CO₂ monthly".to_string(),
                priority: Priority::High,
            },
            Insight {
                kind: InsightKind::Achievement,
                title: "Energy Efficiency Improved".to_string(),
                description: "Great job! Your energy consumption decreased by 15% this month \
                              compared to last month."
                    .to_string(),
                impact: "Saved 0.2 tons CO₂".to_string(),
                priority: Priority::Positive,
            },
            Insight {
                kind: InsightKind::Tip,
                title: "Sustainable Shopping".to_string(),
                description: "Try buying local and seasonal products. They typically have 50% \
                              lower carbon footprint."
                    .to_string(),
                impact: "Potential 0.1 tons CO₂ savings".to_string(),
                priority: Priority::Medium,
            },
        ],
        messages: vec![
            AssistantMessage {
                message: "Hey! I noticed your transport emissions spiked this week. Would you \
                          like some personalized suggestions to reduce them?"
                    .to_string(),
                timestamp: "2 hours ago".to_string(),
                is_user: false,
            },
            AssistantMessage {
                message: "Congratulations! You've achieved a 15% reduction in your monthly \
                          footprint. Keep up the great work! 🌱"
                    .to_string(),
                timestamp: "1 day ago".to_string(),
                is_user: false,
            },
            AssistantMessage {
                message: "Based on your spending patterns, I found 3 eco-friendly alternatives \
                          that could save you money and reduce emissions."
                    .to_string(),
                timestamp: "3 days ago".to_string(),
                is_user: false,
            },
        ],
    }
}

/// Stand-in assistant reply for when the chat endpoint is unreachable.
pub fn fallback_chat_reply() -> AssistantMessage {
    AssistantMessage {
        message: "I'm sorry, I'm having trouble connecting to the server right now. Here's a \
                  general tip: Consider using public transportation or carpooling to reduce \
                  your carbon footprint from daily commutes. This can significantly lower \
                  your emissions."
            .to_string(),
        timestamp: "Just now".to_string(),
        is_user: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_series_has_six_ordered_points() {
        let mut entropy = FixedEntropy::new(vec![0.5]);
        let series = chart_series(&mut entropy);

        assert_eq!(series.len(), SERIES_LEN);
        for point in &series {
            assert!(point.footprint >= FOOTPRINT_FLOOR);
            assert!(point.target >= TARGET_FLOOR);
            assert!(point.target <= point.footprint);
        }
    }

    #[test]
    fn chart_series_ends_in_the_current_month() {
        let mut entropy = FixedEntropy::new(vec![0.5]);
        let series = chart_series(&mut entropy);

        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let current = months[Utc::now().month0() as usize];
        assert_eq!(series.last().unwrap().month, current);
    }

    #[test]
    fn fixed_entropy_makes_generation_reproducible() {
        let a = chart_series(&mut FixedEntropy::new(vec![0.1, 0.9]));
        let b = chart_series(&mut FixedEntropy::new(vec![0.1, 0.9]));
        assert_eq!(a, b);
    }

    #[test]
    fn mock_transactions_jitter_around_templates() {
        let mut entropy = FixedEntropy::new(vec![0.0, 1.0, 0.5]);
        let txs = mock_transactions(&mut entropy);

        assert_eq!(txs.len(), 5);
        for (tx, template) in txs.iter().zip(TRANSACTION_TEMPLATES.iter()) {
            assert_eq!(tx.description, template.description);
            assert!(tx.amount >= template.amount * 0.9 - 0.01);
            assert!(tx.amount <= template.amount * 1.1 + 0.01);
            assert!(tx.carbon > 0.0);
        }
        assert!(txs.iter().all(|tx| tx.id > 0));
    }

    #[test]
    fn kg_impact_thresholds() {
        assert_eq!(impact_for_kg(1.0), ImpactLevel::Low);
        assert_eq!(impact_for_kg(4.2), ImpactLevel::Medium);
        assert_eq!(impact_for_kg(7.8), ImpactLevel::High);
    }

    #[test]
    fn insights_payload_is_well_formed() {
        let payload = insights_payload();
        assert_eq!(payload.insights.len(), 3);
        assert_eq!(payload.messages.len(), 3);
        assert!(payload.messages.iter().all(|m| !m.is_user));
    }

    #[test]
    fn thread_entropy_stays_in_unit_interval() {
        let mut entropy = ThreadEntropy;
        for _ in 0..100 {
            let v = entropy.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
