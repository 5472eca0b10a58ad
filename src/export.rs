//! P&L statement PDF export.
//!
//! Renders the flat statement lines as a multi-page A4 table with the
//! header repeated on every page, an income/expenses/net totals block,
//! and a page-numbered footer. Net is income minus expenses, computed
//! from the rows' type tags.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::PortalError;
use crate::formatters::format_currency;
use crate::types::{LineKind, StatementLine};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const ROW_STEP_MM: f32 = 6.0;

// Column x positions (mm from the left edge).
const X_DATE: f32 = 14.0;
const X_DESCRIPTION: f32 = 44.0;
const X_CATEGORY: f32 = 104.0;
const X_AMOUNT: f32 = 146.0;
const X_TYPE: f32 = 178.0;

/// Rows on the first page (below title + generated line) and on each
/// continuation page.
pub const ROWS_FIRST_PAGE: usize = 34;
pub const ROWS_PER_PAGE: usize = 40;

pub const EXPORT_FILENAME: &str = "profit_and_loss_statement.pdf";

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
}

/// Sum the statement lines by their type tag. Net is exactly
/// income minus expenses.
pub fn compute_totals(lines: &[StatementLine]) -> ExportTotals {
    let total_income: f64 = lines
        .iter()
        .filter(|l| l.kind == LineKind::Income)
        .map(|l| l.amount)
        .sum();
    let total_expenses: f64 = lines
        .iter()
        .filter(|l| l.kind == LineKind::Expense)
        .map(|l| l.amount)
        .sum();

    ExportTotals {
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
    }
}

/// Split a line count into per-page chunks. Always yields at least one
/// page so an empty statement still produces a titled document.
pub fn plan_pages(line_count: usize) -> Vec<usize> {
    if line_count <= ROWS_FIRST_PAGE {
        return vec![line_count];
    }
    let mut pages = vec![ROWS_FIRST_PAGE];
    let mut remaining = line_count - ROWS_FIRST_PAGE;
    while remaining > 0 {
        let take = remaining.min(ROWS_PER_PAGE);
        pages.push(take);
        remaining -= take;
    }
    pages
}

fn draw_table_header(layer: &PdfLayerReference, font_bold: &IndirectFontRef, y: f32) {
    layer.use_text("Date", 9.0, Mm(X_DATE), Mm(y), font_bold);
    layer.use_text("Description", 9.0, Mm(X_DESCRIPTION), Mm(y), font_bold);
    layer.use_text("Category", 9.0, Mm(X_CATEGORY), Mm(y), font_bold);
    layer.use_text("Amount", 9.0, Mm(X_AMOUNT), Mm(y), font_bold);
    layer.use_text("Type", 9.0, Mm(X_TYPE), Mm(y), font_bold);

    let rule_y = y - 2.0;
    layer.add_line(printpdf::Line {
        points: vec![
            (printpdf::Point::new(Mm(X_DATE), Mm(rule_y)), false),
            (printpdf::Point::new(Mm(196.0), Mm(rule_y)), false),
        ],
        is_closed: false,
    });
}

fn line_kind_label(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Income => "Income",
        LineKind::Expense => "Expense",
    }
}

/// Render the statement to PDF bytes.
pub fn render_statement_pdf(
    lines: &[StatementLine],
    generated_on: &str,
) -> Result<Vec<u8>, PortalError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Profit & Loss Statement",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PortalError::ExportFailure(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PortalError::ExportFailure(e.to_string()))?;

    let mut pages = vec![(first_page, first_layer)];

    // Title block, first page only.
    {
        let layer = doc.get_page(first_page).get_layer(first_layer);
        layer.use_text(
            "Profit & Loss Statement",
            20.0,
            Mm(X_DATE),
            Mm(277.0),
            &font_bold,
        );
        layer.use_text(
            format!("Generated on: {}", generated_on),
            11.0,
            Mm(X_DATE),
            Mm(268.0),
            &font,
        );
    }

    let plan = plan_pages(lines.len());
    let mut cursor = 0usize;
    let mut final_y = 0.0f32;

    for (page_no, &chunk) in plan.iter().enumerate() {
        let (page_idx, layer_idx) = if page_no == 0 {
            pages[0]
        } else {
            let added = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            pages.push(added);
            added
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        let header_y = if page_no == 0 { 256.0 } else { 280.0 };
        draw_table_header(&layer, &font_bold, header_y);

        let mut y = header_y - ROW_STEP_MM;
        for line in &lines[cursor..cursor + chunk] {
            layer.use_text(&line.date, 9.0, Mm(X_DATE), Mm(y), &font);
            layer.use_text(&line.description, 9.0, Mm(X_DESCRIPTION), Mm(y), &font);
            layer.use_text(&line.category, 9.0, Mm(X_CATEGORY), Mm(y), &font);
            layer.use_text(format_currency(line.amount), 9.0, Mm(X_AMOUNT), Mm(y), &font);
            layer.use_text(line_kind_label(line.kind), 9.0, Mm(X_TYPE), Mm(y), &font);
            y -= ROW_STEP_MM;
        }
        cursor += chunk;
        final_y = y;
    }

    // Totals block, after the last row. Spill to a fresh page if the
    // remaining space can't fit all three lines.
    let totals = compute_totals(lines);
    let (totals_page, totals_layer) = if final_y < 40.0 {
        let added = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        pages.push(added);
        (added.0, added.1)
    } else {
        let last = pages[pages.len() - 1];
        (last.0, last.1)
    };
    {
        let layer = doc.get_page(totals_page).get_layer(totals_layer);
        let base_y = if final_y < 40.0 { 280.0 } else { final_y - 4.0 };
        layer.use_text(
            format!("Total Income: {}", format_currency(totals.total_income)),
            10.0,
            Mm(X_DATE),
            Mm(base_y),
            &font,
        );
        layer.use_text(
            format!("Total Expenses: {}", format_currency(totals.total_expenses)),
            10.0,
            Mm(X_DATE),
            Mm(base_y - 6.0),
            &font,
        );
        layer.use_text(
            format!("Net Income: {}", format_currency(totals.net_income)),
            10.0,
            Mm(X_DATE),
            Mm(base_y - 12.0),
            &font_bold,
        );
    }

    // Footer pass, once the page count is known.
    let page_count = pages.len();
    for (i, (page_idx, layer_idx)) in pages.iter().enumerate() {
        let layer = doc.get_page(*page_idx).get_layer(*layer_idx);
        let text = format!("Page {} of {}", i + 1, page_count);
        let x = PAGE_WIDTH_MM / 2.0 - text.len() as f32 * 0.75;
        layer.use_text(text, 8.0, Mm(x), Mm(10.0), &font);
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| PortalError::ExportFailure(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| PortalError::ExportFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    fn line(amount: f64, kind: LineKind) -> StatementLine {
        StatementLine {
            date: "2024-03-31".into(),
            description: "Line".into(),
            category: "Test".into(),
            amount,
            kind,
        }
    }

    #[test]
    fn test_totals_net_is_income_minus_expenses() {
        let lines = vec![
            line(1000.0, LineKind::Income),
            line(250.0, LineKind::Income),
            line(400.0, LineKind::Expense),
        ];
        let totals = compute_totals(&lines);
        assert_eq!(totals.total_income, 1250.0);
        assert_eq!(totals.total_expenses, 400.0);
        assert_eq!(totals.net_income, 850.0);
    }

    #[test]
    fn test_dataset_totals_match_reported_net_profit() {
        let totals = compute_totals(&dataset::statement_lines());
        assert_eq!(totals.total_income, 524_790.0);
        assert_eq!(totals.total_expenses, 394_590.0);
        assert_eq!(totals.net_income, 130_200.0);
    }

    #[test]
    fn test_plan_pages_single_page() {
        assert_eq!(plan_pages(0), vec![0]);
        assert_eq!(plan_pages(7), vec![7]);
        assert_eq!(plan_pages(ROWS_FIRST_PAGE), vec![ROWS_FIRST_PAGE]);
    }

    #[test]
    fn test_plan_pages_overflow() {
        let plan = plan_pages(ROWS_FIRST_PAGE + 1);
        assert_eq!(plan, vec![ROWS_FIRST_PAGE, 1]);

        let plan = plan_pages(ROWS_FIRST_PAGE + ROWS_PER_PAGE + 5);
        assert_eq!(plan, vec![ROWS_FIRST_PAGE, ROWS_PER_PAGE, 5]);
        assert_eq!(
            plan.iter().sum::<usize>(),
            ROWS_FIRST_PAGE + ROWS_PER_PAGE + 5
        );
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_statement_pdf(&dataset::statement_lines(), "Mar 31, 2024").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_multi_page_statement() {
        let lines: Vec<StatementLine> = (0..100)
            .map(|i| {
                line(
                    100.0 + i as f64,
                    if i % 2 == 0 {
                        LineKind::Income
                    } else {
                        LineKind::Expense
                    },
                )
            })
            .collect();
        assert_eq!(plan_pages(lines.len()).len(), 3);
        let bytes = render_statement_pdf(&lines, "Mar 31, 2024").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // Three row pages; the totals block still fits the final one.
        assert!(bytes.len() > 2000);
    }

    #[test]
    fn test_render_empty_statement_is_valid() {
        let bytes = render_statement_pdf(&[], "Mar 31, 2024").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
