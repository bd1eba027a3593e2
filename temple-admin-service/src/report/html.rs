use super::labels::Labels;
use super::model::Report;
use super::table::{filter_line, format_amount, Table};

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone printable HTML page.
pub fn render(report: &Report, labels: &Labels) -> String {
    let table = Table::from_report(report, labels);
    let title = labels.title(report.kind());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(
        "<style>\
         body{font-family:'Noto Sans Devanagari',Arial,sans-serif;margin:24px}\
         table{border-collapse:collapse;width:100%}\
         th,td{border:1px solid #999;padding:4px 8px}\
         th{background:#f3e2c7}\
         tr:nth-child(even) td{background:#faf6ef}\
         td.num{text-align:right}\
         </style>\n</head>\n<body>\n",
    );
    html.push_str(&format!("<h1>{}</h1>\n", escape(labels.organisation)));
    html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
    html.push_str(&format!(
        "<p>{}: {}</p>\n<p>{}: {}</p>\n",
        escape(labels.filters),
        escape(&filter_line(report, labels)),
        escape(labels.generated),
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
    ));

    html.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            if table.numeric.contains(&i) {
                html.push_str(&format!("<td class=\"num\">{}</td>", escape(cell)));
            } else {
                html.push_str(&format!("<td>{}</td>", escape(cell)));
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str(&format!(
        "<p><strong>{}:</strong> {} &nbsp; <strong>{}:</strong> {} &nbsp; <strong>{}:</strong> {}</p>\n",
        escape(labels.total_income),
        format_amount(report.summary.total_income),
        escape(labels.total_expense),
        format_amount(report.summary.total_expense),
        escape(labels.net),
        format_amount(report.summary.net),
    ));
    html.push_str("</body>\n</html>\n");
    html
}
