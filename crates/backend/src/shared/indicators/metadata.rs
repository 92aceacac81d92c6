use contracts::shared::indicators::*;

/// Well-known KPI IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn opportunities() -> IndicatorId {
        IndicatorId::new("opportunities")
    }
    pub fn deals_closed() -> IndicatorId {
        IndicatorId::new("deals_closed")
    }
    pub fn conversion_rate() -> IndicatorId {
        IndicatorId::new("conversion_rate")
    }
    pub fn revenue() -> IndicatorId {
        IndicatorId::new("revenue")
    }
    pub fn mrr() -> IndicatorId {
        IndicatorId::new("mrr")
    }
}

/// Card label and value format of a KPI
pub fn label_of(id: &IndicatorId) -> (&'static str, ValueFormat) {
    match id.0.as_str() {
        "opportunities" => ("Oportunidades", ValueFormat::Integer),
        "deals_closed" => ("Vendas Fechadas", ValueFormat::Integer),
        "conversion_rate" => ("Conversão Global", ValueFormat::Percent),
        "revenue" => ("Faturamento Total", ValueFormat::Money),
        "mrr" => ("MRR", ValueFormat::Money),
        _ => ("?", ValueFormat::Integer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_a_label() {
        for id in [
            ids::opportunities(),
            ids::deals_closed(),
            ids::conversion_rate(),
            ids::revenue(),
            ids::mrr(),
        ] {
            assert_ne!(label_of(&id).0, "?");
        }
        assert_eq!(label_of(&ids::revenue()).1, ValueFormat::Money);
    }
}
