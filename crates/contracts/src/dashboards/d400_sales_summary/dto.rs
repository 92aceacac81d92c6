use serde::{Deserialize, Serialize};

use crate::domain::a002_kpi_targets::KpiTargets;
use crate::shared::indicators::{KpiResult, SalesMetrics};

/// Everything the dashboard and the printable report render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub user_name: String,
    pub is_admin: bool,
    pub targets: KpiTargets,
    pub metrics: SalesMetrics,
    /// Cards in display order: opportunities, deals closed, conversion, revenue, MRR
    pub kpis: Vec<KpiResult>,
}

/// Numeric brief handed to the text-generation service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightSummary {
    pub total_opportunities: usize,
    pub closed_count: usize,
    pub open_count: usize,
    pub cancelled_count: usize,
    pub conversion_rate: f64,
    pub conversion_rate_target: f64,
    pub total_revenue: f64,
    pub revenue_target: f64,
    /// `revenue_target - total_revenue`, may be negative
    pub revenue_gap: f64,
    pub total_mrr: f64,
    pub mrr_target: f64,
    pub mrr_gap: f64,
    pub average_ticket: f64,
    pub average_mrr: f64,
    pub sales_needed: u64,
}
