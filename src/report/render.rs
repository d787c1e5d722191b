use crate::report::Report;
use crate::utils::format_report_date;
use html_escape::encode_text;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::ASCII_FULL_CONDENSED, presets::UTF8_FULL, Attribute, Cell,
    CellAlignment, ContentArrangement, Table,
};

pub const HEADERS: [&str; 4] = ["Symbol", "Weekly change", "Status", "3-day streak"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Box-drawing borders, sized to the terminal.
    Terminal,
    /// Plain ASCII, fixed layout for monospace message blocks.
    Ascii,
}

/// Display cells of one row, in `HEADERS` order.
pub fn row_cells(row: &crate::model::SymbolResult) -> [String; 4] {
    [
        row.symbol.clone(),
        row.pct_display(),
        row.status_label(),
        if row.has_streak { "yes" } else { "no" }.to_string(),
    ]
}

pub fn heading(report: &Report) -> String {
    format!("{} - {}", report.title, format_report_date(report.generated_at))
}

pub fn render_table(report: &Report, style: TableStyle) -> String {
    let mut table = Table::new();
    match style {
        TableStyle::Terminal => {
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
        }
        TableStyle::Ascii => {
            table
                .load_preset(ASCII_FULL_CONDENSED)
                .force_no_tty()
                .set_content_arrangement(ContentArrangement::Disabled);
        }
    }

    table.set_header(
        HEADERS
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for row in &report.rows {
        let [symbol, change, status, streak] = row_cells(row);
        table.add_row(vec![
            Cell::new(symbol),
            Cell::new(change).set_alignment(CellAlignment::Right),
            Cell::new(status),
            Cell::new(streak).set_alignment(CellAlignment::Center),
        ]);
    }

    table.to_string()
}

/// Telegram HTML body: bold heading plus the table in a `<pre>` block.
pub fn render_telegram_html(report: &Report) -> String {
    let heading = encode_text(&heading(report)).into_owned();
    if report.is_empty() {
        return format!("<b>{}</b>\nNo symbols to report.", heading);
    }
    format!(
        "<b>{}</b>\n<pre>{}</pre>",
        heading,
        encode_text(&render_table(report, TableStyle::Ascii))
    )
}

/// Email body: a bordered HTML table, one `<tr>` per row.
pub fn render_email_html(report: &Report) -> String {
    let mut html = String::new();
    html.push_str("<html>\n  <body>\n");
    html.push_str(&format!("    <h2>{}</h2>\n", encode_text(&heading(report))));

    if report.is_empty() {
        html.push_str("    <p>No symbols to report.</p>\n");
    } else {
        html.push_str("    <table border=\"1\" style=\"border-collapse: collapse; text-align: center\">\n");
        html.push_str("      <thead><tr>");
        for header in HEADERS {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr></thead>\n      <tbody>\n");
        for row in &report.rows {
            html.push_str("        <tr>");
            for cell in row_cells(row) {
                html.push_str(&format!("<td>{}</td>", encode_text(&cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("      </tbody>\n    </table>\n");
    }

    html.push_str("    <p>Generated automatically by weekly-screener.</p>\n  </body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SymbolResult, Trend};
    use chrono::{TimeZone, Utc};

    fn report() -> Report {
        Report {
            title: "Weekly".into(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 7, 18, 0, 0).unwrap(),
            rows: vec![
                SymbolResult {
                    symbol: "TEVA".into(),
                    pct_change: 20.0,
                    trend: Trend::Up,
                    has_streak: false,
                },
                SymbolResult {
                    symbol: "LUMI".into(),
                    pct_change: -1.234,
                    trend: Trend::Neutral,
                    has_streak: true,
                },
            ],
        }
    }

    #[test]
    fn cells_follow_display_rules() {
        let r = report();
        assert_eq!(row_cells(&r.rows[0]), ["TEVA", "20.00%", "up >5%", "no"]);
        assert_eq!(
            row_cells(&r.rows[1]),
            ["LUMI", "-1.23%", "neutral | 3-day up streak", "yes"]
        );
    }

    #[test]
    fn table_lists_rows_in_order() {
        let text = render_table(&report(), TableStyle::Ascii);
        for header in HEADERS {
            assert!(text.contains(header));
        }
        let teva = text.find("TEVA").unwrap();
        let lumi = text.find("LUMI").unwrap();
        assert!(teva < lumi);
        assert!(text.contains("20.00%"));
    }

    #[test]
    fn telegram_body_is_escaped() {
        let html = render_telegram_html(&report());
        assert!(html.starts_with("<b>Weekly - 07/03/2024</b>"));
        assert!(html.contains("up &gt;5%"));
        assert!(!html.contains("up >5%"));
    }

    #[test]
    fn email_body_has_one_table_row_per_symbol() {
        let html = render_email_html(&report());
        assert!(html.contains("<h2>Weekly - 07/03/2024</h2>"));
        assert!(html.contains("<th>Weekly change</th>"));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains(
            "<tr><td>TEVA</td><td>20.00%</td><td>up &gt;5%</td><td>no</td></tr>"
        ));
        assert!(html.contains(
            "<tr><td>LUMI</td><td>-1.23%</td><td>neutral | 3-day up streak</td><td>yes</td></tr>"
        ));
        assert!(html.find("TEVA").unwrap() < html.find("LUMI").unwrap());
    }

    #[test]
    fn email_body_for_empty_report() {
        let mut r = report();
        r.rows.clear();
        let html = render_email_html(&r);
        assert!(!html.contains("<table"));
        assert!(html.contains("No symbols to report."));
    }

    #[test]
    fn telegram_body_for_empty_report() {
        let mut r = report();
        r.rows.clear();
        assert!(render_telegram_html(&r).ends_with("No symbols to report."));
    }
}
