use contracts::domain::a002_kpi_targets::KpiTargets;

use crate::shared::validation::{non_negative, ValidationError};

pub fn validate(targets: &KpiTargets) -> Result<(), ValidationError> {
    non_negative(targets.mrr, "mrr")?;
    non_negative(targets.revenue, "revenue")?;
    if !(0.0..=1.0).contains(&targets.conversion_rate) {
        return Err(ValidationError::ConversionRateOutOfRange);
    }
    Ok(())
}

/// The settings form takes the conversion target as a percentage (65 means 0.65)
pub fn with_conversion_percent(targets: KpiTargets, percent: f64) -> KpiTargets {
    KpiTargets {
        conversion_rate: percent / 100.0,
        ..targets
    }
}
