//! A4 PDF rendering with builtin Helvetica. Builtin fonts only cover Latin
//! text, so PDF output always uses English labels and non-ASCII characters
//! in data are replaced.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use std::io::BufWriter;
use temple_admin_api::{ApiError, ApiResult, ReportKind};

use super::labels::{Labels, ENGLISH};
use super::model::Report;
use super::table::{filter_line, format_amount, Table};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const BOTTOM_MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.0;
const FONT_SIZE: f32 = 8.0;
/// Approximate Helvetica advance at `FONT_SIZE`, in mm.
const CHAR_WIDTH: f32 = 1.45;

const LETTERHEAD_ADDRESS: &str = "Temple Road, Maharashtra";

const HEADER_FILL: (f32, f32, f32) = (0.93, 0.80, 0.60);
const BAND_FILLS: [(f32, f32, f32); 2] = [(1.0, 1.0, 1.0), (0.98, 0.95, 0.90)];

fn column_widths(kind: ReportKind) -> &'static [f32] {
    match kind {
        ReportKind::Transactions => &[19.0, 24.0, 19.0, 22.0, 20.0, 30.0, 26.0, 20.0],
        ReportKind::Summary => &[120.0, 60.0],
        ReportKind::Category => &[110.0, 30.0, 40.0],
        ReportKind::Monthly => &[40.0, 40.0, 40.0, 40.0, 20.0],
    }
}

fn pdf_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::InternalError(format!("Failed to render PDF: {e}"))
}

/// Non-ASCII characters become `?`.
fn pdf_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

fn fit(value: &str, width: f32) -> String {
    let max = ((width - 2.0) / CHAR_WIDTH).max(1.0) as usize;
    let safe = pdf_safe(value);
    if safe.chars().count() <= max {
        safe
    } else {
        let kept: String = safe.chars().take(max.saturating_sub(2)).collect();
        format!("{kept}..")
    }
}

fn fill(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let points = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![points],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Current page plus the vertical write position.
struct Pen<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    font: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Pen<'_> {
    fn text(&self, value: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(pdf_safe(value), size, Mm(x), Mm(self.y), font);
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn row(&mut self, cells: &[String], widths: &[f32], numeric: &[usize], band: (f32, f32, f32), bold: bool) {
        let top = self.y;
        fill(&self.layer, band);
        rect(&self.layer, MARGIN, top - ROW_HEIGHT, widths.iter().sum(), ROW_HEIGHT);
        fill(&self.layer, (0.0, 0.0, 0.0));

        self.y = top - ROW_HEIGHT + 1.8;
        let mut x = MARGIN;
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            let text = fit(cell, *width);
            let text_x = if numeric.contains(&i) {
                x + width - 1.0 - text.chars().count() as f32 * CHAR_WIDTH
            } else {
                x + 1.0
            };
            self.text(&text, FONT_SIZE, text_x, bold);
            x += width;
        }
        self.y = top - ROW_HEIGHT;
    }
}

fn letterhead(pen: &mut Pen<'_>, labels: &Labels, title: &str, filters: &str, generated: &str) {
    pen.text(labels.organisation, 16.0, MARGIN, true);
    pen.y -= 6.0;
    pen.text(LETTERHEAD_ADDRESS, 9.0, MARGIN, false);
    pen.y -= 4.0;
    rule(&pen.layer, pen.y);
    pen.y -= 8.0;
    pen.text(title, 13.0, MARGIN, true);
    pen.y -= 6.0;
    pen.text(&format!("{}: {}", labels.filters, filters), 9.0, MARGIN, false);
    pen.y -= 5.0;
    pen.text(&format!("{}: {}", labels.generated, generated), 9.0, MARGIN, false);
    pen.y -= 6.0;
}

pub fn render(report: &Report) -> ApiResult<Vec<u8>> {
    let labels = &ENGLISH;
    let kind = report.kind();
    let table = Table::from_report(report, labels);
    let widths = column_widths(kind);
    let title = labels.title(kind);

    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
    let mut pen = Pen {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - MARGIN,
        font,
        bold,
    };

    let generated = report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string();
    letterhead(&mut pen, labels, title, &filter_line(report, labels), &generated);

    pen.row(&table.headers, widths, &[], HEADER_FILL, true);
    for (i, row) in table.rows.iter().enumerate() {
        if pen.y - ROW_HEIGHT < BOTTOM_MARGIN {
            pen.new_page();
            pen.row(&table.headers, widths, &[], HEADER_FILL, true);
        }
        pen.row(row, widths, &table.numeric, BAND_FILLS[i % 2], false);
    }

    if pen.y - 3.0 * ROW_HEIGHT < BOTTOM_MARGIN {
        pen.new_page();
    }
    pen.y -= 8.0;
    let totals = format!(
        "{}: {}    {}: {}    {}: {}",
        labels.total_income,
        format_amount(report.summary.total_income),
        labels.total_expense,
        format_amount(report.summary.total_expense),
        labels.net,
        format_amount(report.summary.net),
    );
    pen.text(&totals, 10.0, MARGIN, true);
    drop(pen);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(pdf_error)?;
    writer.into_inner().map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use temple_admin_api::{ReportFilter, TransactionType};
    use temple_admin_db::models::ledger::TransactionModel;

    fn rows(count: usize) -> Vec<TransactionModel> {
        (0..count)
            .map(|i| {
                let mut tx = TransactionModel::new(
                    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    TransactionType::Donation,
                    "Annadan",
                    "Prasad",
                    Decimal::new(100 + i as i64, 0),
                );
                tx.donor_name = Some("श्री. पाटील".to_string());
                tx
            })
            .collect()
    }

    #[test]
    fn test_every_kind_renders_a_pdf() {
        for kind in [
            ReportKind::Transactions,
            ReportKind::Summary,
            ReportKind::Category,
            ReportKind::Monthly,
        ] {
            let report = Report::build(kind, ReportFilter::default(), rows(3));
            let bytes = render(&report).unwrap();
            assert!(bytes.starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_long_report_spans_pages() {
        let report = Report::build(ReportKind::Transactions, ReportFilter::default(), rows(120));
        let bytes = render(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_fit_truncates_and_sanitizes() {
        assert_eq!(pdf_safe("पाटील A"), "????? A");
        assert_eq!(fit("short", 20.0), "short");
        let long = fit("a very long description that will not fit", 20.0);
        assert!(long.ends_with(".."));
        assert!(long.chars().count() <= 12);
    }
}
