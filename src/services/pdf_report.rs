use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::ops::Range;

use chrono::NaiveDate;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use thiserror::Error;

use crate::domain::budget::BudgetParameters;
use crate::domain::chart::ChartPoint;
use crate::services::budget_chart::{chart_points, write_budget_chart_png, ChartError, CHART_SIZE};
use crate::services::metrics::{aggregate, BudgetMetrics};
use crate::services::money::format_currency;
use crate::services::state_store::AppState;

// Landscape A4, in millimetres.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 6.0;
const TABLE_HEADER_HEIGHT: f32 = 10.0;
const TABLE_COLUMNS: [(&str, f32); 5] = [
    ("Point", 15.0),
    ("Iteration Cost", 60.0),
    ("Cumulative Standard", 115.0),
    ("Cumulative Actual", 175.0),
    ("Budget Cap", 235.0),
];

#[derive(Error, Debug)]
pub enum PdfReportError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("failed to access file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to embed chart image: {0}")]
    Image(String),
    #[error("failed to write pdf: {0}")]
    Pdf(String),
}

/// Writes a landscape A4 report: summary and chart on the first page, then
/// the cost table over as many pages as it needs. The chart image is kept
/// next to the PDF; its path is returned.
pub async fn write_budget_report_pdf(
    output_path: &str,
    state: &AppState,
    export_date: NaiveDate,
) -> Result<String, PdfReportError> {
    let points = chart_points(state)?;
    let chart_path = format!("{output_path}.png");
    write_budget_chart_png(&chart_path, state).await?;

    let metrics = aggregate(state.plan.recorded_through_current(), &state.params);
    let params = state.params.clone();
    let output = output_path.to_string();
    let image_path = chart_path.clone();
    tokio::task::spawn_blocking(move || {
        render_pdf(&output, &image_path, &params, &metrics, &points, export_date)
    })
    .await
    .map_err(|e| PdfReportError::Pdf(e.to_string()))??;

    tracing::debug!(path = output_path, "budget report pdf written");
    Ok(chart_path)
}

/// Splits table rows into page-sized chunks.
pub fn paginate(row_count: usize) -> Vec<Range<usize>> {
    let usable_height = PAGE_HEIGHT - 2.0 * MARGIN - TABLE_HEADER_HEIGHT;
    let rows_per_page = ((usable_height / ROW_HEIGHT).floor() as usize).max(1);
    (0..row_count)
        .step_by(rows_per_page)
        .map(|start| start..(start + rows_per_page).min(row_count))
        .collect()
}

fn render_pdf(
    output_path: &str,
    chart_path: &str,
    params: &BudgetParameters,
    metrics: &BudgetMetrics,
    points: &[ChartPoint],
    export_date: NaiveDate,
) -> Result<(), PdfReportError> {
    let (doc, page, layer) =
        PdfDocument::new("Budget Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Summary");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfReportError::Pdf(format!("{e:?}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfReportError::Pdf(format!("{e:?}")))?;

    let summary_layer = doc.get_page(page).get_layer(layer);
    let chart_top = write_summary(&summary_layer, &font, &bold, params, metrics, export_date);
    embed_chart(&summary_layer, chart_path, chart_top)?;

    write_cost_table(&doc, &font, &bold, points, &params.currency);

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| PdfReportError::Pdf(format!("{e:?}")))?;
    Ok(())
}

/// Returns the vertical position below the summary block.
fn write_summary(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    params: &BudgetParameters,
    metrics: &BudgetMetrics,
    export_date: NaiveDate,
) -> f32 {
    let currency = params.currency.as_str();
    let mut y = PAGE_HEIGHT - MARGIN;
    layer.use_text("Budget Report", 18.0, Mm(MARGIN), Mm(y), bold);
    y -= 7.0;
    layer.use_text(
        format!("Exported {}", export_date.format("%Y-%m-%d")),
        10.0,
        Mm(MARGIN),
        Mm(y),
        font,
    );
    y -= 10.0;

    let parameters = [
        format!("Cost per hour: {:.2} {currency}", params.cost_per_hour),
        format!("Team size: {}", params.team_size),
        format!("Working days per iteration: {}", params.working_days_per_iteration),
        format!(
            "Standard iteration cost: {}",
            format_currency(params.standard_iteration_cost(), currency)
        ),
    ];
    let summary = [
        format!("Total budget: {}", format_currency(metrics.total_budget, currency)),
        format!(
            "Consumed budget: {}",
            format_currency(metrics.consumed_budget, currency)
        ),
        format!("Consumption rate: {:.1}%", metrics.consumption_rate),
        format!(
            "Remaining budget: {}",
            format_currency(metrics.remaining_budget(), currency)
        ),
    ];

    layer.use_text("Parameters", 12.0, Mm(MARGIN), Mm(y), bold);
    layer.use_text("Metrics", 12.0, Mm(PAGE_WIDTH / 2.0), Mm(y), bold);
    y -= ROW_HEIGHT + 1.0;
    for (left, right) in parameters.iter().zip(summary.iter()) {
        layer.use_text(left.as_str(), 10.0, Mm(MARGIN), Mm(y), font);
        layer.use_text(right.as_str(), 10.0, Mm(PAGE_WIDTH / 2.0), Mm(y), font);
        y -= ROW_HEIGHT;
    }
    y - 4.0
}

/// Scales the chart to fit between `top` and the bottom margin, centred.
fn embed_chart(layer: &PdfLayerReference, chart_path: &str, top: f32) -> Result<(), PdfReportError> {
    let file = File::open(chart_path)?;
    let decoder =
        PngDecoder::new(BufReader::new(file)).map_err(|e| PdfReportError::Image(e.to_string()))?;
    let image = Image::try_from(decoder).map_err(|e| PdfReportError::Image(format!("{e:?}")))?;

    let (width_px, height_px) = (CHART_SIZE.0 as f32, CHART_SIZE.1 as f32);
    let available_width = PAGE_WIDTH - 2.0 * MARGIN;
    let available_height = (top - MARGIN).max(10.0);
    let width_mm = available_width.min(available_height * width_px / height_px);
    let height_mm = width_mm * height_px / width_px;
    let dpi = width_px * 25.4 / width_mm;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_WIDTH - width_mm) / 2.0)),
            translate_y: Some(Mm(top - height_mm)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}

fn write_cost_table(
    doc: &PdfDocumentReference,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    points: &[ChartPoint],
    currency: &str,
) {
    for (page_number, rows) in paginate(points.len()).into_iter().enumerate() {
        let (page, layer) = doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Cost table {}", page_number + 1),
        );
        let layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT - MARGIN;
        for (title, x) in TABLE_COLUMNS {
            layer.use_text(title, 11.0, Mm(x), Mm(y), bold);
        }
        y -= TABLE_HEADER_HEIGHT;

        for point in &points[rows] {
            let cells = [
                point.label.clone(),
                format_currency(point.iteration_cost, currency),
                format_currency(point.cumulative_standard, currency),
                format_currency(point.cumulative_actual, currency),
                format_currency(point.budget_cap, currency),
            ];
            for (cell, (_, x)) in cells.into_iter().zip(TABLE_COLUMNS) {
                layer.use_text(cell, 10.0, Mm(x), Mm(y), font);
            }
            y -= ROW_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::iteration::IterationPlan;
    use crate::test_support::{build_iteration, build_params};

    #[test]
    fn paginate_splits_rows_into_full_pages() {
        // (210 - 30 - 10) / 6 => 28 rows per page.
        assert!(paginate(0).is_empty());
        assert_eq!(paginate(5), vec![0..5]);
        assert_eq!(paginate(28), vec![0..28]);
        assert_eq!(paginate(60), vec![0..28, 28..56, 56..60]);
    }

    #[tokio::test]
    async fn write_budget_report_pdf_rejects_empty_plan() {
        let dir = assert_fs::TempDir::new().unwrap();
        let output = dir.path().join("report.pdf");
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let error = write_budget_report_pdf(output.to_str().unwrap(), &AppState::default(), date)
            .await
            .expect_err("expected missing chart");

        assert!(matches!(
            error,
            PdfReportError::Chart(ChartError::NothingToRender)
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn write_budget_report_pdf_writes_document_and_chart() {
        let dir = assert_fs::TempDir::new().unwrap();
        let output = dir.path().join("report.pdf");
        let rows = (1..=40).map(|n| (build_iteration(n, 10.0), n == 12)).collect();
        let state = AppState {
            params: build_params(50.0, 100_000.0),
            plan: IterationPlan::from_flagged(rows),
            ..AppState::default()
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let chart_path = write_budget_report_pdf(output.to_str().unwrap(), &state, date)
            .await
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(std::fs::metadata(chart_path).unwrap().len() > 0);
    }
}
