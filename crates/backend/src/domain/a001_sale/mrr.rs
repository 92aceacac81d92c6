//! MRR auto-calculation for the sale edit buffer.
//!
//! Called explicitly whenever revenue, periodicity or plan changes in the
//! buffer, and once more before the buffer is turned into a stored `Sale`.
//! Stored records are never recomputed afterwards.

use contracts::domain::a001_sale::{Periodicity, SaleDto, CERTIFICATE_PLAN};

/// Differences at or below this are not reported as a change.
pub const MRR_EPSILON: f64 = 0.01;

/// Months covered by one payment; a missing periodicity counts as monthly.
pub fn periodicity_divisor(periodicity: Option<Periodicity>) -> f64 {
    periodicity.map(|p| p.months()).unwrap_or(1) as f64
}

/// Round half away from zero to cents
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// MRR for a (revenue, periodicity, plan) triple.
///
/// The certificate plan has no recurring value and always yields 0,
/// whatever the revenue or periodicity.
pub fn derive_mrr(revenue: f64, periodicity: Option<Periodicity>, plan: &str) -> f64 {
    if plan == CERTIFICATE_PLAN {
        return 0.0;
    }
    let revenue = if revenue.is_finite() { revenue.max(0.0) } else { 0.0 };
    round_money(revenue / periodicity_divisor(periodicity))
}

/// Apply the rule to an edit buffer.
///
/// The buffer always ends up holding the derived value. The return value
/// tells the caller whether that value moved by more than [`MRR_EPSILON`],
/// so an event-driven UI can skip redundant refreshes.
pub fn apply_mrr_rule(dto: &mut SaleDto) -> bool {
    let plan = dto.plan.as_deref().unwrap_or_default();
    let derived = derive_mrr(dto.revenue.unwrap_or(0.0), dto.periodicity, plan);

    let changed = match dto.mrr {
        Some(current) => (current - derived).abs() > MRR_EPSILON,
        None => true,
    };
    dto.mrr = Some(derived);
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(revenue: f64, periodicity: Periodicity, plan: &str) -> SaleDto {
        SaleDto {
            revenue: Some(revenue),
            periodicity: Some(periodicity),
            plan: Some(plan.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_quarterly_essential() {
        assert_eq!(derive_mrr(3600.0, Some(Periodicity::Quarterly), "Essencial"), 1200.0);
    }

    #[test]
    fn test_certificate_is_always_zero() {
        assert_eq!(derive_mrr(5000.0, Some(Periodicity::Annual), "Certificado"), 0.0);
        for p in [
            Periodicity::Monthly,
            Periodicity::Quarterly,
            Periodicity::Semiannual,
            Periodicity::Annual,
        ] {
            for revenue in [0.0, 1.0, 999.99, 123456.78] {
                assert_eq!(derive_mrr(revenue, Some(p), CERTIFICATE_PLAN), 0.0);
            }
        }
    }

    #[test]
    fn test_divisors_and_rounding() {
        assert_eq!(derive_mrr(1500.0, Some(Periodicity::Monthly), "Controle"), 1500.0);
        assert_eq!(derive_mrr(1000.0, Some(Periodicity::Quarterly), "Controle"), 333.33);
        assert_eq!(derive_mrr(1000.0, Some(Periodicity::Semiannual), "Completo"), 166.67);
        assert_eq!(derive_mrr(5000.0, Some(Periodicity::Annual), "Essencial"), 416.67);
        assert_eq!(derive_mrr(250.0, None, "Essencial"), 250.0);
    }

    #[test]
    fn test_negative_revenue_never_yields_negative_mrr() {
        assert_eq!(derive_mrr(-100.0, Some(Periodicity::Monthly), "Essencial"), 0.0);
    }

    #[test]
    fn test_apply_rule_reports_change_once() {
        let mut dto = buffer(3600.0, Periodicity::Quarterly, "Essencial");
        assert!(apply_mrr_rule(&mut dto));
        assert_eq!(dto.mrr, Some(1200.0));

        assert!(!apply_mrr_rule(&mut dto));
        assert_eq!(dto.mrr, Some(1200.0));
    }

    #[test]
    fn test_switching_to_certificate_clears_mrr() {
        let mut dto = buffer(5000.0, Periodicity::Annual, "Essencial");
        apply_mrr_rule(&mut dto);
        assert_eq!(dto.mrr, Some(416.67));

        dto.plan = Some(CERTIFICATE_PLAN.to_string());
        assert!(apply_mrr_rule(&mut dto));
        assert_eq!(dto.mrr, Some(0.0));
    }

    #[test]
    fn test_change_below_epsilon_is_not_reported() {
        let mut dto = buffer(1000.0, Periodicity::Quarterly, "Essencial");
        dto.mrr = Some(333.335);
        assert!(!apply_mrr_rule(&mut dto));
        assert_eq!(dto.mrr, Some(333.33));
    }
}
