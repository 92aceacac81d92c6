use contracts::dashboards::d400_sales_summary::DashboardResponse;
use contracts::domain::a001_sale::Sale;
use contracts::domain::a002_kpi_targets::KpiTargets;
use contracts::system::users::User;

use crate::shared::indicators::{compute_kpis, compute_metrics};

/// Metrics and KPI cards for a loaded view. The seller ranking is only
/// computed for the admin.
pub fn build_dashboard(user: &User, sales: &[Sale], targets: &KpiTargets) -> DashboardResponse {
    let metrics = compute_metrics(sales, user.is_admin);
    let kpis = compute_kpis(&metrics, targets);

    DashboardResponse {
        user_name: user.name.clone(),
        is_admin: user.is_admin,
        targets: *targets,
        metrics,
        kpis,
    }
}
