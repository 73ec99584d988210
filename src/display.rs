use analytics::palette::{self, RunwayTone};
use analytics::{AnalyticsReport, DistributionEntry, InsightKind, InsightReport, RiskCounts};
use analytics::charts::MetricPoint;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::{CompanyRecord, RiskLevel};
use rust_decimal::{Decimal, RoundingStrategy};

// ==============================================================================
// Number Formatting
// ==============================================================================

/// Whole dollars with thousands separators, e.g. `$33,136,312`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&rounded.abs().trunc().to_string()))
}

/// Millions with one decimal, e.g. `$33.1M`.
pub fn format_millions(amount: Decimal) -> String {
    let millions = (amount / Decimal::from(1_000_000)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("${millions:.1}M")
}

/// Thousands without decimals, e.g. `$271K`.
pub fn format_thousands(amount: Decimal) -> String {
    let thousands = (amount / Decimal::from(1_000)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("${thousands}K")
}

pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

pub fn format_months(value: Decimal) -> String {
    format!("{} months", value.normalize())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ==============================================================================
// Colours
// ==============================================================================

/// Converts a `#RRGGBB` palette entry into a terminal colour.
pub fn hex_color(hex: &str) -> Color {
    let channel = |range: std::ops::Range<usize>| {
        hex.trim_start_matches('#')
            .get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb { r, g, b },
        _ => Color::Reset,
    }
}

fn risk_cell(level: RiskLevel) -> Cell {
    Cell::new(level.label()).fg(hex_color(palette::risk_color(level)))
}

fn runway_cell(months: Decimal) -> Cell {
    let color = match RunwayTone::of(months) {
        RunwayTone::Critical => Color::Red,
        RunwayTone::Caution => Color::Yellow,
        RunwayTone::Healthy => Color::Green,
    };
    Cell::new(format_months(months)).fg(color)
}

fn growth_cell(growth: Decimal) -> Cell {
    let color = if growth < Decimal::ZERO { Color::Red } else { Color::Green };
    let sign = if growth > Decimal::ZERO { "+" } else { "" };
    Cell::new(format!("{sign}{}", format_percent(growth))).fg(color)
}

fn new_table<T: Into<comfy_table::Row>>(header: T) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn heading(title: &str) -> String {
    format!("\n{title}\n{}", "=".repeat(title.len()))
}

// ==============================================================================
// Company List
// ==============================================================================

/// The four summary cards above the company list.
pub fn summary_table(risk: &RiskCounts) -> Table {
    let mut table = new_table(vec!["Total Companies", "Low Risk", "Medium Risk", "High Risk"]);
    table.add_row(vec![
        Cell::new(risk.total()).add_attribute(Attribute::Bold),
        Cell::new(risk.low).fg(hex_color(palette::risk_color(RiskLevel::Low))),
        Cell::new(risk.medium).fg(hex_color(palette::risk_color(RiskLevel::Medium))),
        Cell::new(risk.high).fg(hex_color(palette::risk_color(RiskLevel::High))),
    ]);
    table
}

pub fn company_table(companies: &[&CompanyRecord]) -> Table {
    let mut table = new_table(vec![
        "Company", "Sector", "Stage", "ARR", "Growth", "Margin", "Headcount", "Runway", "Risk", "Partner",
    ]);
    for company in companies {
        let name = if company.has_alert() {
            format!("{} ⚠", company.name)
        } else {
            company.name.clone()
        };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(&company.sector).fg(hex_color(palette::sector_color(&company.sector))),
            Cell::new(&company.stage),
            Cell::new(format_currency(company.arr)).set_alignment(CellAlignment::Right),
            growth_cell(company.arr_growth),
            Cell::new(format_percent(company.gross_margin)),
            Cell::new(format!("{} ({:+})", company.headcount, company.headcount_change)),
            runway_cell(company.cash_runway),
            risk_cell(company.risk_level),
            Cell::new(&company.partner),
        ]);
    }
    table
}

/// AI alerts of the listed companies, one line each.
pub fn alert_lines(companies: &[&CompanyRecord]) -> Vec<String> {
    companies
        .iter()
        .filter(|c| c.has_alert())
        .filter_map(|c| c.ai_alert.as_deref().map(|alert| format!("⚠ {}: {}", c.name, alert.trim())))
        .collect()
}

// ==============================================================================
// Insights Panel
// ==============================================================================

pub fn render_insights(report: &InsightReport) -> String {
    let mut out = Vec::new();

    out.push(heading("AI Insights"));
    let mut cards = new_table(vec!["Insight", "Details"]);
    for card in &report.insights {
        let color = match card.kind {
            InsightKind::Warning => Color::Yellow,
            InsightKind::Risk => Color::Red,
            InsightKind::Attention => Color::Magenta,
        };
        cards.add_row(vec![
            Cell::new(&card.title).fg(color).add_attribute(Attribute::Bold),
            Cell::new(&card.description),
        ]);
    }
    out.push(cards.to_string());

    out.push(heading("Top Performers"));
    if report.top_performers.is_empty() {
        out.push(format!(
            "No companies growing faster than {}.",
            format_percent(report.thresholds.top_performer_growth_pct)
        ));
    } else {
        let mut table = new_table(vec!["Company", "Sector", "ARR Growth"]);
        for company in &report.top_performers {
            table.add_row(vec![
                Cell::new(&company.name),
                Cell::new(&company.sector),
                growth_cell(company.arr_growth),
            ]);
        }
        out.push(table.to_string());
    }

    out.push(heading("Watchlist"));
    if report.watchlist.is_empty() {
        out.push("Nothing on the watchlist.".to_string());
    } else {
        let mut table = new_table(vec!["Company", "Risk", "Reason"]);
        for entry in &report.watchlist {
            table.add_row(vec![
                Cell::new(&entry.name),
                risk_cell(entry.risk_level),
                Cell::new(&entry.detail),
            ]);
        }
        out.push(table.to_string());
    }

    out.push(heading("Portfolio Summary"));
    let totals = &report.totals;
    let mut summary = new_table(vec!["Total ARR", "Avg Gross Margin", "Total Headcount"]);
    summary.add_row(vec![
        Cell::new(format_currency(totals.total_arr)),
        Cell::new(format_percent(totals.avg_gross_margin)),
        Cell::new(totals.total_headcount),
    ]);
    out.push(summary.to_string());

    out.join("\n")
}

// ==============================================================================
// Analytics Charts
// ==============================================================================

fn distribution_table(entries: &[DistributionEntry]) -> Table {
    let total: usize = entries.iter().map(|e| e.value).sum();
    let mut table = new_table(vec!["Name", "Companies", "Share"]);
    for entry in entries {
        let share = if total == 0 { 0 } else { entry.value * 100 / total };
        table.add_row(vec![
            Cell::new(&entry.name).fg(hex_color(entry.color)),
            Cell::new(entry.value),
            Cell::new(format!("{share}%")),
        ]);
    }
    table
}

fn metric_table(points: &[MetricPoint], value_header: &str) -> Table {
    let mut table = new_table(vec!["Company", "Sector", value_header]);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.name),
            Cell::new(&point.sector).fg(hex_color(palette::sector_color(&point.sector))),
            Cell::new(format_percent(point.value)),
        ]);
    }
    table
}

pub fn render_analytics(report: &AnalyticsReport) -> String {
    let mut out = Vec::new();

    out.push(heading("Portfolio Trend"));
    let mut trend = new_table(vec!["Quarter", "Total ARR", "Avg Margin", "Total Headcount"]);
    for point in &report.trend {
        trend.add_row(vec![
            Cell::new(point.quarter),
            Cell::new(format_millions(point.total_arr)),
            Cell::new(format_percent(point.avg_margin)),
            Cell::new(point.total_headcount),
        ]);
    }
    out.push(trend.to_string());

    out.push(heading("Risk Distribution"));
    out.push(distribution_table(&report.risk_distribution).to_string());
    out.push(heading("Sector Distribution"));
    out.push(distribution_table(&report.sector_distribution).to_string());
    out.push(heading("Stage Distribution"));
    out.push(distribution_table(&report.stage_distribution).to_string());

    out.push(heading("Top ARR Growth"));
    out.push(metric_table(&report.top_growth, "ARR Growth").to_string());
    out.push(heading("Top Gross Margin"));
    out.push(metric_table(&report.top_margin, "Gross Margin").to_string());

    out.push(heading("Negative Growth"));
    if report.negative_growth.is_empty() {
        out.push("No companies with negative ARR growth.".to_string());
    } else {
        out.push(metric_table(&report.negative_growth, "ARR Growth").to_string());
    }

    out.push(heading("Burn Rate vs Runway"));
    let mut burn = new_table(vec!["Company", "Monthly Burn", "Runway", "Risk"]);
    for point in &report.burn_vs_runway {
        burn.add_row(vec![
            Cell::new(&point.name),
            Cell::new(point.burn_rate.map_or_else(|| "n/a".to_string(), format_thousands)),
            runway_cell(point.runway),
            risk_cell(point.risk),
        ]);
    }
    out.push(burn.to_string());

    out.push(heading("Cash Runway"));
    let mut runway = new_table(vec!["Company", "Runway", "Risk"]);
    for bar in &report.runway_distribution {
        runway.add_row(vec![
            Cell::new(&bar.name).fg(hex_color(bar.color)),
            runway_cell(bar.runway),
            risk_cell(bar.risk),
        ]);
    }
    out.push(runway.to_string());

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_is_grouped_and_rounded() {
        assert_eq!(format_currency(dec!(33136312)), "$33,136,312");
        assert_eq!(format_currency(dec!(999.5)), "$1,000");
        assert_eq!(format_currency(dec!(0)), "$0");
        assert_eq!(format_currency(dec!(-1234)), "-$1,234");
    }

    #[test]
    fn compact_currency_units() {
        assert_eq!(format_millions(dec!(33136312)), "$33.1M");
        assert_eq!(format_thousands(dec!(271359)), "$271K");
    }

    #[test]
    fn percentages_drop_trailing_zeros() {
        assert_eq!(format_percent(dec!(80.40)), "80.4%");
        assert_eq!(format_months(dec!(11.0)), "11 months");
    }

    #[test]
    fn blank_alerts_are_not_flagged() {
        let blank = CompanyRecord::new("1", "Acme").with_alert("   ");
        let real = CompanyRecord::new("2", "Beta").with_alert(" Burn up 40% ");
        let companies = vec![&blank, &real];

        assert_eq!(alert_lines(&companies), vec!["⚠ Beta: Burn up 40%".to_string()]);
        let table = company_table(&companies).to_string();
        assert!(table.contains("Beta ⚠"));
        assert!(!table.contains("Acme ⚠"));
    }

    #[test]
    fn summary_total_is_the_sum_of_risk_counts() {
        let risk = RiskCounts { low: 7, medium: 2, high: 1 };
        let table = summary_table(&risk).to_string();
        assert!(table.contains("10"));
    }

    #[test]
    fn palette_hex_becomes_rgb() {
        assert_eq!(hex_color("#EF4444"), Color::Rgb { r: 0xEF, g: 0x44, b: 0x44 });
        assert_eq!(hex_color("nope"), Color::Reset);
    }
}
