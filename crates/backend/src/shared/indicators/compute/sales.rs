use contracts::domain::a001_sale::{Sale, SalesStatus, NOT_INFORMED};
use contracts::domain::a002_kpi_targets::KpiTargets;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use crate::domain::a001_sale::mrr::round_money;
use crate::shared::indicators::metadata::{ids, label_of};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Counts per label, kept in first-seen order
#[derive(Default)]
struct OrderedCounter {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl OrderedCounter {
    fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(c) => *c += 1,
            None => {
                self.order.push(label.to_string());
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    fn into_entries(mut self) -> Vec<DistributionEntry> {
        self.order
            .into_iter()
            .map(|name| {
                let count = self.counts.remove(&name).unwrap_or(0);
                DistributionEntry { name, count }
            })
            .collect()
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Percentage of target reached. Not capped; 0 when the target is 0.
pub fn achievement(actual: f64, target: f64) -> f64 {
    if target > 0.0 && actual.is_finite() {
        (actual / target) * 100.0
    } else {
        0.0
    }
}

/// Closed-sale count over all opportunities, in [0, 1]
pub fn conversion_rate(closed: usize, total: usize) -> f64 {
    ratio(closed as f64, total as f64)
}

// ---------------------------------------------------------------------------
// Distributions and ranking
// ---------------------------------------------------------------------------

/// Closed sales per plan, most sold first. Ties keep first-seen order.
pub fn plan_distribution(sales: &[Sale]) -> Vec<DistributionEntry> {
    let mut counter = OrderedCounter::default();
    for sale in sales.iter().filter(|s| s.is_closed()) {
        let plan = sale.plan.trim();
        counter.add(if plan.is_empty() { NOT_INFORMED } else { plan });
    }
    let mut entries = counter.into_entries();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Closed sales per periodicity in first-seen order (unsorted)
pub fn periodicity_distribution(sales: &[Sale]) -> Vec<DistributionEntry> {
    let mut counter = OrderedCounter::default();
    for sale in sales.iter().filter(|s| s.is_closed()) {
        counter.add(sale.periodicity.label());
    }
    counter.into_entries()
}

/// All sales per status in funnel order; empty statuses are left out
pub fn status_distribution(sales: &[Sale]) -> Vec<DistributionEntry> {
    SalesStatus::FUNNEL_ORDER
        .iter()
        .map(|status| DistributionEntry {
            name: status.label().to_string(),
            count: sales.iter().filter(|s| s.status == *status).count(),
        })
        .filter(|e| e.count > 0)
        .collect()
}

/// Closed revenue summed per seller, highest first. Equal sums keep
/// first-seen order.
///
/// Sums are rounded to cents before sorting, so sellers whose totals differ
/// by less than half a cent tie and keep first-seen order. Unrounded float
/// sums would make the order depend on the input order instead.
pub fn seller_ranking(sales: &[Sale]) -> Vec<SellerRankingEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for sale in sales.iter().filter(|s| s.is_closed()) {
        let name = sale.seller_label();
        match totals.get_mut(name) {
            Some(total) => *total += sale.revenue,
            None => {
                order.push(name.to_string());
                totals.insert(name.to_string(), sale.revenue);
            }
        }
    }

    let mut ranking: Vec<SellerRankingEntry> = order
        .into_iter()
        .map(|name| {
            let revenue = round_money(totals.get(&name).copied().unwrap_or(0.0));
            SellerRankingEntry { name, revenue }
        })
        .collect();
    ranking.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranking
}

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

/// Every aggregate of a sale list. The ranking is only filled for admin views.
///
/// Revenue and MRR totals are plain sums of closed sales rounded to cents.
/// Rounding is what makes the totals identical for any input order; float
/// addition alone is not associative (`0.1 + 0.2 + 0.3` depends on order).
pub fn compute_metrics(sales: &[Sale], include_ranking: bool) -> SalesMetrics {
    let total_opportunities = sales.len();
    let mut closed_count = 0;
    let mut open_count = 0;
    let mut cancelled_count = 0;
    let mut total_revenue = 0.0;
    let mut total_mrr = 0.0;

    for sale in sales {
        match sale.status {
            SalesStatus::Sold | SalesStatus::SoldPaid => {
                closed_count += 1;
                total_revenue += sale.revenue;
                total_mrr += sale.mrr;
            }
            SalesStatus::Open => open_count += 1,
            SalesStatus::Cancelled => cancelled_count += 1,
        }
    }

    SalesMetrics {
        total_opportunities,
        closed_count,
        open_count,
        cancelled_count,
        conversion_rate: conversion_rate(closed_count, total_opportunities),
        // Cent rounding keeps totals independent of summation order
        total_revenue: round_money(total_revenue),
        total_mrr: round_money(total_mrr),
        plan_distribution: plan_distribution(sales),
        periodicity_distribution: periodicity_distribution(sales),
        status_distribution: status_distribution(sales),
        seller_ranking: if include_ranking {
            seller_ranking(sales)
        } else {
            Vec::new()
        },
    }
}

fn kpi(id: IndicatorId, actual: f64, target: f64) -> KpiResult {
    let (label, format) = label_of(&id);
    let achievement = achievement(actual, target);
    let status = if target <= 0.0 {
        IndicatorStatus::Neutral
    } else if achievement >= 100.0 {
        IndicatorStatus::Good
    } else {
        IndicatorStatus::Warning
    };
    KpiResult {
        id,
        label: label.to_string(),
        format,
        actual,
        target,
        achievement,
        delta: actual - target,
        status,
    }
}

/// KPI cards in display order
pub fn compute_kpis(metrics: &SalesMetrics, targets: &KpiTargets) -> Vec<KpiResult> {
    vec![
        kpi(ids::opportunities(), metrics.total_opportunities as f64, 0.0),
        kpi(
            ids::deals_closed(),
            metrics.closed_count as f64,
            targets.deals_closed as f64,
        ),
        kpi(
            ids::conversion_rate(),
            metrics.conversion_rate,
            targets.conversion_rate,
        ),
        kpi(ids::revenue(), metrics.total_revenue, targets.revenue),
        kpi(ids::mrr(), metrics.total_mrr, targets.mrr),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_sale::Periodicity;

    fn sale(
        id: &str,
        revenue: f64,
        periodicity: Periodicity,
        plan: &str,
        status: SalesStatus,
        seller: Option<&str>,
    ) -> Sale {
        let date = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        Sale {
            id: id.into(),
            customer_id: id.into(),
            customer_name: format!("Cliente {}", id),
            date,
            revenue,
            mrr: crate::domain::a001_sale::mrr::derive_mrr(revenue, Some(periodicity), plan),
            plan: plan.into(),
            periodicity,
            payment_method: "Cartão".into(),
            purchase_date: date,
            status,
            hub_link: String::new(),
            notes: String::new(),
            seller_name: seller.map(String::from),
        }
    }

    fn scenario() -> (Vec<Sale>, KpiTargets) {
        (
            vec![
                sale("001", 1500.0, Periodicity::Monthly, "Essencial", SalesStatus::SoldPaid, None),
                sale("002", 3000.0, Periodicity::Monthly, "Controle", SalesStatus::Open, None),
            ],
            KpiTargets {
                revenue: 44200.0,
                mrr: 7200.0,
                conversion_rate: 0.65,
                deals_closed: 34,
            },
        )
    }

    #[test]
    fn test_reference_scenario() {
        let (sales, targets) = scenario();
        let m = compute_metrics(&sales, false);

        assert_eq!(m.total_opportunities, 2);
        assert_eq!(m.closed_count, 1);
        assert_eq!(m.open_count, 1);
        assert_eq!(m.cancelled_count, 0);
        assert_eq!(m.conversion_rate, 0.5);
        assert_eq!(m.total_revenue, 1500.0);
        assert_eq!(m.total_mrr, 1500.0);

        let revenue_achievement = achievement(m.total_revenue, targets.revenue);
        assert!((revenue_achievement - 3.3937).abs() < 0.001);

        let kpis = compute_kpis(&m, &targets);
        assert_eq!(kpis.len(), 5);
        assert_eq!(kpis[3].id, ids::revenue());
        assert!((kpis[3].achievement - revenue_achievement).abs() < 1e-12);
        assert_eq!(kpis[3].delta, 1500.0 - 44200.0);
        assert_eq!(kpis[3].status, IndicatorStatus::Warning);
        assert_eq!(kpis[0].status, IndicatorStatus::Neutral);
        assert_eq!(kpis[0].achievement, 0.0);
    }

    #[test]
    fn test_empty_list() {
        let m = compute_metrics(&[], true);
        assert_eq!(m, SalesMetrics::default());
        assert_eq!(m.conversion_rate, 0.0);

        let kpis = compute_kpis(&m, &KpiTargets::default());
        assert!(kpis.iter().all(|k| k.achievement == 0.0 && k.achievement.is_finite()));
    }

    #[test]
    fn test_achievement_guards_and_overachievement() {
        assert_eq!(achievement(1500.0, 0.0), 0.0);
        assert_eq!(achievement(0.0, 0.0), 0.0);
        assert_eq!(achievement(f64::INFINITY, 10.0), 0.0);
        assert_eq!(achievement(300.0, 200.0), 150.0);
        assert_eq!(conversion_rate(0, 0), 0.0);
    }

    #[test]
    fn test_conversion_rate_bounds() {
        let statuses = [
            SalesStatus::Open,
            SalesStatus::Sold,
            SalesStatus::SoldPaid,
            SalesStatus::Cancelled,
        ];
        let mut sales = Vec::new();
        for i in 0..20 {
            let status = statuses[i % statuses.len()];
            sales.push(sale(&i.to_string(), 100.0, Periodicity::Monthly, "Essencial", status, None));
            let rate = compute_metrics(&sales, false).conversion_rate;
            assert!((0.0..=1.0).contains(&rate));
        }
        assert_eq!(compute_metrics(&sales, false).conversion_rate, 0.5);
    }

    #[test]
    fn test_totals_independent_of_order() {
        let mut sales = vec![
            sale("a", 0.1, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None),
            sale("b", 0.2, Periodicity::Monthly, "Essencial", SalesStatus::SoldPaid, None),
            sale("c", 0.3, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None),
            sale("d", 1234.56, Periodicity::Quarterly, "Completo", SalesStatus::Sold, None),
            sale("e", 99.99, Periodicity::Annual, "Controle", SalesStatus::Cancelled, None),
        ];
        let forward = compute_metrics(&sales, false);
        sales.reverse();
        let backward = compute_metrics(&sales, false);
        sales.swap(0, 3);
        let shuffled = compute_metrics(&sales, false);

        assert_eq!(forward.total_revenue, backward.total_revenue);
        assert_eq!(forward.total_revenue, shuffled.total_revenue);
        assert_eq!(forward.total_mrr, backward.total_mrr);
        assert_eq!(forward.total_mrr, shuffled.total_mrr);
        assert_eq!(forward.total_revenue, 1235.16);
    }

    #[test]
    fn test_cancelled_and_open_excluded_from_money() {
        let sales = vec![
            sale("a", 1000.0, Periodicity::Monthly, "Essencial", SalesStatus::Cancelled, None),
            sale("b", 2000.0, Periodicity::Monthly, "Essencial", SalesStatus::Open, None),
        ];
        let m = compute_metrics(&sales, true);
        assert_eq!(m.total_revenue, 0.0);
        assert_eq!(m.total_mrr, 0.0);
        assert!(m.plan_distribution.is_empty());
        assert!(m.seller_ranking.is_empty());
        assert_eq!(m.status_distribution.len(), 2);
    }

    #[test]
    fn test_plan_distribution_sorted_and_stable() {
        let sales = vec![
            sale("1", 10.0, Periodicity::Monthly, "Controle", SalesStatus::Sold, None),
            sale("2", 10.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None),
            sale("3", 10.0, Periodicity::Monthly, "", SalesStatus::Sold, None),
            sale("4", 10.0, Periodicity::Monthly, "Essencial", SalesStatus::SoldPaid, None),
            sale("5", 10.0, Periodicity::Monthly, "Completo", SalesStatus::Open, None),
        ];
        let dist = plan_distribution(&sales);
        let names: Vec<_> = dist.iter().map(|e| (e.name.as_str(), e.count)).collect();
        assert_eq!(
            names,
            vec![("Essencial", 2), ("Controle", 1), (NOT_INFORMED, 1)]
        );
    }

    #[test]
    fn test_periodicity_distribution_first_seen_order() {
        let sales = vec![
            sale("1", 10.0, Periodicity::Annual, "Essencial", SalesStatus::Sold, None),
            sale("2", 10.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None),
            sale("3", 10.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None),
            sale("4", 10.0, Periodicity::Quarterly, "Essencial", SalesStatus::Cancelled, None),
        ];
        let dist = periodicity_distribution(&sales);
        let names: Vec<_> = dist.iter().map(|e| (e.name.as_str(), e.count)).collect();
        assert_eq!(names, vec![("Anual", 1), ("Mensal", 2)]);
    }

    #[test]
    fn test_status_distribution_omits_zero() {
        let (sales, _) = scenario();
        let dist = status_distribution(&sales);
        let names: Vec<_> = dist.iter().map(|e| (e.name.as_str(), e.count)).collect();
        assert_eq!(names, vec![("Vendido Pago", 1), ("Em Aberto", 1)]);
    }

    #[test]
    fn test_seller_ranking() {
        let sales = vec![
            sale("1", 1000.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, Some("JANAINA")),
            sale("2", 3000.0, Periodicity::Monthly, "Essencial", SalesStatus::SoldPaid, Some("DAVI")),
            sale("3", 2000.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, Some("JANAINA")),
            sale("4", 9000.0, Periodicity::Monthly, "Essencial", SalesStatus::Open, Some("GIKA")),
            sale("5", 500.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None),
            sale("6", 500.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, Some("LUCAS")),
        ];
        let ranking = seller_ranking(&sales);
        let pairs: Vec<_> = ranking.iter().map(|r| (r.name.as_str(), r.revenue)).collect();
        assert_eq!(
            pairs,
            vec![
                ("JANAINA", 3000.0),
                ("DAVI", 3000.0),
                ("Desconhecido", 500.0),
                ("LUCAS", 500.0),
            ]
        );

        assert!(compute_metrics(&sales, false).seller_ranking.is_empty());
        assert_eq!(compute_metrics(&sales, true).seller_ranking, ranking);
    }

    #[test]
    fn test_sub_cent_difference_ranks_as_tie() {
        let sales = vec![
            sale("1", 1000.001, Periodicity::Monthly, "Essencial", SalesStatus::Sold, Some("LUCAS")),
            sale("2", 1000.004, Periodicity::Monthly, "Essencial", SalesStatus::Sold, Some("DAVI")),
        ];
        let ranking = seller_ranking(&sales);
        assert_eq!(ranking[0].name, "LUCAS");
        assert_eq!(ranking[0].revenue, 1000.0);
        assert_eq!(ranking[1].revenue, 1000.0);

        let reversed: Vec<Sale> = sales.iter().rev().cloned().collect();
        assert_eq!(seller_ranking(&reversed)[0].name, "DAVI");
    }

    #[test]
    fn test_overachieved_kpi_is_good() {
        let sales: Vec<Sale> = (0..4)
            .map(|i| sale(&i.to_string(), 100.0, Periodicity::Monthly, "Essencial", SalesStatus::Sold, None))
            .collect();
        let targets = KpiTargets {
            mrr: 200.0,
            revenue: 200.0,
            conversion_rate: 0.5,
            deals_closed: 2,
        };
        let kpis = compute_kpis(&compute_metrics(&sales, false), &targets);
        assert_eq!(kpis[1].achievement, 200.0);
        assert_eq!(kpis[2].achievement, 200.0);
        assert!(kpis[1..].iter().all(|k| k.status == IndicatorStatus::Good));
    }
}
