use serde::{Deserialize, Serialize};

/// Target configuration of one seller (or the synthesized team aggregate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiTargets {
    pub mrr: f64,
    pub revenue: f64,
    /// Fraction in [0, 1], not a percentage
    pub conversion_rate: f64,
    pub deals_closed: u32,
}

impl Default for KpiTargets {
    fn default() -> Self {
        Self {
            mrr: 7200.0,
            revenue: 44200.0,
            conversion_rate: 0.65,
            deals_closed: 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{"mrr":7200,"revenue":44200,"conversionRate":0.65,"dealsClosed":34}"#;
        let targets: KpiTargets = serde_json::from_str(json).unwrap();
        assert_eq!(targets, KpiTargets::default());
    }
}
