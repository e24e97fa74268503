//! Report formatting.
//!
//! Turns the derived dashboard structures into display strings: pt-BR currency, chart
//! axis ticks, ranking lines with bar shares, the sales table, and a plain-text summary
//! of a whole view.
//! All functions are framework-agnostic.

use crate::core::{
    aggregate::{ClientStat, KpiSummary, RankingKind, SectorStat},
    pipeline::DashboardView,
    sale::Sale,
};
use std::fmt::Write as _;

/// Formats an amount as Brazilian reais: `R$ 1.234,56`.
#[must_use]
pub fn format_brl(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{sign}R$ {},{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a value-axis tick of the profit chart: `R$500`, `R$2k`.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("R${:.0}k", value / 1000.0)
    } else {
        format!("R${value}")
    }
}

/// Share of `value` relative to `max`, as a percentage for bar widths.
///
/// Returns 0 when `max` is not positive.
#[must_use]
pub fn bar_share(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }

    (value / max) * 100.0
}

/// Generates a text bar like `[████████░░]` for a share between 0 and 100.
#[must_use]
pub fn format_share_bar(share_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = share_percent.clamp(0.0, 100.0);

    // Cast safety: clamped ∈ [0, 100] and length is small, so the result is in [0, length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Formats a sale count: `1 venda`, `3 vendas`.
#[must_use]
pub fn format_sales_count(count: usize) -> String {
    if count == 1 {
        "1 venda".to_string()
    } else {
        format!("{count} vendas")
    }
}

/// One line per sector, with a bar scaled to the ranking's first entry.
#[must_use]
pub fn format_sector_ranking(ranking: &[SectorStat], kind: RankingKind) -> Vec<String> {
    let max = ranking.first().map_or(0.0, |top| kind.measure(top));

    ranking
        .iter()
        .enumerate()
        .map(|(idx, stat)| {
            let value = match kind {
                RankingKind::Profit => format_brl(stat.profit),
                RankingKind::Volume => format_sales_count(stat.sales),
            };
            let bar = format_share_bar(bar_share(kind.measure(stat), max), None);
            format!("{:>2}. {} {bar} {value}", idx + 1, stat.sector)
        })
        .collect()
}

/// One line per recurring client, with a bar scaled to the top spender.
#[must_use]
pub fn format_top_clients(clients: &[ClientStat]) -> Vec<String> {
    let max = clients.first().map_or(0.0, |top| top.total_spent);

    clients
        .iter()
        .enumerate()
        .map(|(idx, client)| {
            let bar = format_share_bar(bar_share(client.total_spent, max), None);
            format!(
                "{}º {} {bar} {} ({} compras)",
                idx + 1,
                client.name,
                format_brl(client.total_spent),
                client.purchases
            )
        })
        .collect()
}

/// The five KPI cards as `(title, value)` pairs.
#[must_use]
pub fn kpi_cards(kpis: &KpiSummary) -> [(&'static str, String); 5] {
    [
        ("Lucro Total", format_brl(kpis.total_profit)),
        ("Custo Total", format_brl(kpis.total_cost)),
        ("Ingressos Vendidos", kpis.tickets.to_string()),
        ("Clientes", kpis.clients.to_string()),
        ("Ticket Médio", format_brl(kpis.average_ticket)),
    ]
}

/// Column headings of the sales table, in display order.
pub const SALES_TABLE_HEADERS: [&str; 11] = [
    "CONTA",
    "SETOR",
    "CUSTO SETOR",
    "CUSTO PLANO",
    "VALOR VENDA",
    "LUCRO",
    "NOME (PIX)",
    "FACIAL",
    "CONTATO",
    "PAGAMENTO",
    "DATA",
];

/// One sales table row, matching [`SALES_TABLE_HEADERS`]. A blank account shows as `-`.
#[must_use]
pub fn format_sale_row(sale: &Sale) -> [String; 11] {
    let account = if sale.account.trim().is_empty() {
        "-".to_string()
    } else {
        sale.account.clone()
    };

    [
        account,
        sale.sector.clone(),
        format_brl(sale.sector_cost()),
        format_brl(sale.plan_cost()),
        format_brl(sale.sale_price()),
        format_brl(sale.profit()),
        sale.buyer_name.clone(),
        sale.status.to_string(),
        sale.contact.clone(),
        sale.payment_method.clone(),
        sale.event_date.clone(),
    ]
}

/// The sales table as text lines: a heading line, then one line per sale.
#[must_use]
pub fn format_sales_table(sales: &[Sale]) -> Vec<String> {
    std::iter::once(SALES_TABLE_HEADERS.join(" | "))
        .chain(sales.iter().map(|sale| format_sale_row(sale).join(" | ")))
        .collect()
}

/// Plain-text rendering of a whole dashboard view.
#[must_use]
pub fn render_summary(view: &DashboardView) -> String {
    let mut out = String::new();

    for (title, value) in kpi_cards(view.kpis()) {
        let _ = writeln!(out, "{title}: {value}");
    }

    for (heading, kind) in [
        ("Ranking por Lucro", RankingKind::Profit),
        ("Ranking por Vendas", RankingKind::Volume),
    ] {
        let _ = writeln!(out, "\n{heading}");
        for line in format_sector_ranking(view.sector_ranking(kind), kind) {
            let _ = writeln!(out, "{line}");
        }
    }

    let _ = writeln!(out, "\nTop 5 Clientes Recorrentes");
    if view.top_clients().is_empty() {
        let _ = writeln!(out, "(nenhum cliente com mais de uma compra)");
    }
    for line in format_top_clients(view.top_clients()) {
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "\nVendas ({})", view.sales.len());
    if view.sales.is_empty() {
        let _ = writeln!(out, "(nenhuma venda encontrada)");
    } else {
        for line in format_sales_table(&view.sales) {
            let _ = writeln!(out, "{line}");
        }
    }

    out
}
