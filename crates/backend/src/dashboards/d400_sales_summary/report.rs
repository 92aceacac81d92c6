//! Printable plain-text report.

use chrono::NaiveDateTime;
use contracts::dashboards::d400_sales_summary::DashboardResponse;
use contracts::domain::a001_sale::Sale;
use contracts::shared::indicators::{DistributionEntry, ValueFormat};
use std::fmt::Write;

use crate::shared::format::{format_decimal, format_money, format_number, format_percent};

const WIDTH: usize = 100;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "| {}", title.to_uppercase());
    let _ = writeln!(out, "{}", "-".repeat(WIDTH));
}

/// Cut to `width` characters, marking the cut with `~`
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn distribution(out: &mut String, entries: &[DistributionEntry]) {
    if entries.is_empty() {
        let _ = writeln!(out, "  (sem vendas fechadas)");
        return;
    }
    let total: usize = entries.iter().map(|e| e.count).sum();
    for e in entries {
        let _ = writeln!(
            out,
            "  {:<24} {:>6}  {:>7}",
            fit(&e.name, 24),
            format_number(e.count),
            format_percent(share(e.count, total))
        );
    }
}

pub fn render_report(
    dashboard: &DashboardResponse,
    sales: &[Sale],
    generated_at: NaiveDateTime,
) -> String {
    let m = &dashboard.metrics;
    let mut out = String::new();

    // Header
    let _ = writeln!(out, "{}", "=".repeat(WIDTH));
    let _ = writeln!(out, "RELATÓRIO SHARKS");
    let subtitle = if dashboard.is_admin {
        "Relatório Gerencial de Equipe"
    } else {
        "Performance Comercial & Análise de Vendas"
    };
    let _ = writeln!(out, "{}", subtitle);
    let _ = writeln!(
        out,
        "{} | {}",
        dashboard.user_name,
        generated_at.format("%d/%m/%Y às %H:%M:%S")
    );
    let _ = writeln!(out, "{}", "=".repeat(WIDTH));

    section(&mut out, "Resumo Executivo");
    let _ = writeln!(out, "  Oportunidades: {} (total na base)", format_number(m.total_opportunities));
    let _ = writeln!(
        out,
        "  Fechamentos:   {} (conversão: {})",
        format_number(m.closed_count),
        format_percent(m.conversion_rate)
    );
    let _ = writeln!(out, "  Em aberto:     {}", format_number(m.open_count));
    let _ = writeln!(out, "  Cancelados:    {}", format_number(m.cancelled_count));
    let _ = writeln!(out, "  Faturamento:   {}", format_money(m.total_revenue));
    let _ = writeln!(out, "  MRR:           {}", format_money(m.total_mrr));

    section(&mut out, "Metas");
    for kpi in &dashboard.kpis {
        if kpi.target <= 0.0 {
            continue;
        }
        let (actual, target) = match kpi.format {
            ValueFormat::Money => {
                (format_money(kpi.actual), format_money(kpi.target))
            }
            ValueFormat::Percent => {
                (format_percent(kpi.actual), format_percent(kpi.target))
            }
            ValueFormat::Integer => (
                format_number(kpi.actual.max(0.0) as usize),
                format_number(kpi.target.max(0.0) as usize),
            ),
        };
        let _ = writeln!(
            out,
            "  {:<22} {:>16} / {:<16} {:>8}%",
            fit(&kpi.label, 22),
            actual,
            target,
            format_decimal(kpi.achievement, 1)
        );
    }

    section(&mut out, "Mix de Planos (Vendidos)");
    distribution(&mut out, &m.plan_distribution);

    section(&mut out, "Periodicidade");
    distribution(&mut out, &m.periodicity_distribution);

    if dashboard.is_admin {
        section(&mut out, "Ranking de Vendas");
        if m.seller_ranking.is_empty() {
            let _ = writeln!(out, "  (sem vendas fechadas)");
        }
        for (pos, entry) in m.seller_ranking.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {:<24} {:>16}",
                pos + 1,
                fit(&entry.name, 24),
                format_money(entry.revenue)
            );
        }
    }

    section(&mut out, "Base de Vendas Detalhada");
    if sales.is_empty() {
        let _ = writeln!(out, "  Nenhuma venda registrada.");
    } else {
        let _ = writeln!(
            out,
            "  {:<10} {:<22} {:<16} {:<11} {:>14} {:>12} {:<12}",
            "Data", "Cliente", "Plano", "Period.", "Faturamento", "MRR", "Status"
        );
        for s in sales {
            let _ = write!(
                out,
                "  {:<10} {:<22} {:<16} {:<11} {:>14} {:>12} {:<12}",
                s.date.format("%d/%m/%Y"),
                fit(&s.customer_name, 22),
                fit(&s.plan, 16),
                s.periodicity.label(),
                format_money(s.revenue),
                format_money(s.mrr),
                s.status.label()
            );
            if dashboard.is_admin {
                let _ = write!(out, " {}", s.seller_label());
            }
            let _ = writeln!(out);
        }
    }

    out
}
