//! Narrative sales insights.
//!
//! The numbers are computed here; only the wording is delegated to the
//! text-generation provider. Any provider failure degrades to a fixed
//! message and never reaches the caller as an error.

use contracts::dashboards::d400_sales_summary::InsightSummary;
use contracts::domain::a001_sale::Sale;
use contracts::domain::a002_kpi_targets::KpiTargets;
use std::sync::Arc;
use std::time::Duration;

use super::types::{ChatMessage, LlmError, LlmProvider};
use crate::shared::indicators::compute_metrics;

pub const EMPTY_ANSWER_MESSAGE: &str = "Sem dados suficientes para análise numérica.";

/// Role preamble sent as the system message
pub const ANALYST_ROLE: &str = r#"Atue como um Analista de Performance de Vendas da equipe "Sharks". Sua resposta deve ser puramente baseada em MATEMÁTICA e ESTRATÉGIA NUMÉRICA."#;

fn per_sale(total: f64, count: usize) -> f64 {
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// Sales of `average` size needed to close `gap`; 0 unless both are positive
fn sales_to_close(gap: f64, average: f64) -> u64 {
    if average > 0.0 && gap > 0.0 {
        (gap / average).ceil() as u64
    } else {
        0
    }
}

/// Numeric brief for the current sale list and targets
pub fn summarize(sales: &[Sale], targets: &KpiTargets) -> InsightSummary {
    let m = compute_metrics(sales, false);

    let revenue_gap = targets.revenue - m.total_revenue;
    let mrr_gap = targets.mrr - m.total_mrr;
    let average_ticket = per_sale(m.total_revenue, m.closed_count);
    let average_mrr = per_sale(m.total_mrr, m.closed_count);

    // Whichever target is further away drives the estimate
    let sales_needed = sales_to_close(revenue_gap, average_ticket)
        .max(sales_to_close(mrr_gap, average_mrr));

    InsightSummary {
        total_opportunities: m.total_opportunities,
        closed_count: m.closed_count,
        open_count: m.open_count,
        cancelled_count: m.cancelled_count,
        conversion_rate: m.conversion_rate,
        conversion_rate_target: targets.conversion_rate,
        total_revenue: m.total_revenue,
        revenue_target: targets.revenue,
        revenue_gap,
        total_mrr: m.total_mrr,
        mrr_target: targets.mrr,
        mrr_gap,
        average_ticket,
        average_mrr,
        sales_needed,
    }
}

/// Numeric brief sent as the user message
pub fn build_prompt(s: &InsightSummary) -> String {
    format!(
        r#"DADOS DO CENÁRIO ATUAL:
- Oportunidades Recebidas (Leads Totais): {total}
- Vendas Fechadas (Vendido + Vendido Pago): {closed}
- Em Aberto (Pipeline): {open}
- Canceladas/Perdidas: {cancelled}
- Taxa de Conversão Real: {conversion:.1}% (Meta: {conversion_target:.1}%)

FINANCEIRO:
- Faturamento Atual: R$ {revenue:.2} (Meta: R$ {revenue_target:.2})
- Gap (Falta): R$ {revenue_gap:.2}
- MRR Atual: R$ {mrr:.2} (Meta: R$ {mrr_target:.2})
- Ticket Médio Atual: R$ {ticket:.2}

PROJEÇÃO MATEMÁTICA:
Para bater a meta financeira, faltam aproximadamente R$ {revenue_gap:.2}.
Com o ticket médio atual, isso significa que precisamos de mais {needed} vendas.

INSTRUÇÕES DE RESPOSTA (EM PORTUGUÊS):
1. Comece DIRETAMENTE com o número mágico: "Para bater a meta, você precisa de X vendas."
2. Analise o Funil: Cite quantas oportunidades entraram vs quantas fecharam. Se a conversão estiver baixa, aponte isso numericamente.
3. Dê uma tática numérica para o Pipeline em Aberto.
4. Seja breve, analítico e use bullet points."#,
        total = s.total_opportunities,
        closed = s.closed_count,
        open = s.open_count,
        cancelled = s.cancelled_count,
        conversion = s.conversion_rate * 100.0,
        conversion_target = s.conversion_rate_target * 100.0,
        revenue = s.total_revenue,
        revenue_target = s.revenue_target,
        revenue_gap = s.revenue_gap,
        mrr = s.total_mrr,
        mrr_target = s.mrr_target,
        ticket = s.average_ticket,
        needed = s.sales_needed,
    )
}

/// Wraps a provider with a timeout and the fallback policy
pub struct InsightGenerator {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    fallback_message: String,
}

impl InsightGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration, fallback_message: String) -> Self {
        Self {
            provider,
            timeout,
            fallback_message,
        }
    }

    /// One attempt, surfacing the failure
    pub async fn try_generate(&self, summary: &InsightSummary) -> Result<String, LlmError> {
        let messages = vec![
            ChatMessage::system(ANALYST_ROLE),
            ChatMessage::user(build_prompt(summary)),
        ];
        let response = tokio::time::timeout(self.timeout, self.provider.chat_completion(messages))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))??;

        tracing::debug!(
            "Insight generated by {} ({}), tokens: {:?}",
            self.provider.provider_name(),
            response.model,
            response.tokens_used
        );

        let text = response.content.trim();
        if text.is_empty() {
            Ok(EMPTY_ANSWER_MESSAGE.to_string())
        } else {
            Ok(text.to_string())
        }
    }

    /// Always yields displayable text
    pub async fn generate_insights(&self, sales: &[Sale], targets: &KpiTargets) -> String {
        let summary = summarize(sales, targets);
        match self.try_generate(&summary).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Insight generation failed: {}", e);
                self.fallback_message.clone()
            }
        }
    }
}
