use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Indicator identity
// ---------------------------------------------------------------------------

/// Unique KPI identifier, used as key by the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How to format the numeric value on screen or in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money,
    Percent,
    Integer,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    /// Target reached or exceeded.
    Good,
    /// Below target.
    Warning,
    /// No target to compare with.
    Neutral,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// One KPI card: actual value compared with its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub id: IndicatorId,
    pub label: String,
    pub format: ValueFormat,
    pub actual: f64,
    pub target: f64,
    /// `actual / target * 100`, uncapped; 0 when the target is 0.
    pub achievement: f64,
    pub delta: f64,
    pub status: IndicatorStatus,
}

/// A labelled count inside a distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub name: String,
    pub count: usize,
}

/// Summed closed revenue of one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRankingEntry {
    pub name: String,
    pub revenue: f64,
}

/// Every aggregate derived from a sale list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub total_opportunities: usize,
    pub closed_count: usize,
    pub open_count: usize,
    pub cancelled_count: usize,
    /// Fraction in [0, 1]
    pub conversion_rate: f64,
    pub total_revenue: f64,
    pub total_mrr: f64,
    pub plan_distribution: Vec<DistributionEntry>,
    pub periodicity_distribution: Vec<DistributionEntry>,
    pub status_distribution: Vec<DistributionEntry>,
    /// Empty unless computed for an admin view.
    pub seller_ranking: Vec<SellerRankingEntry>,
}
