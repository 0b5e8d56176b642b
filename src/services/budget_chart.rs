use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use thiserror::Error;

use crate::domain::chart::{ChartPoint, ChartVisibility};
use crate::services::money::format_currency;
use crate::services::projection::project;
use crate::services::state_store::AppState;

pub const CHART_SIZE: (u32, u32) = (1200, 700);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart not available: no iterations recorded")]
    NothingToRender,
    #[error("failed to render budget chart: {0}")]
    Render(String),
}

/// Projects the chart timeline for the stored state. There is no chart to
/// export until at least one iteration is recorded.
pub fn chart_points(state: &AppState) -> Result<Vec<ChartPoint>, ChartError> {
    if state.plan.is_empty() {
        return Err(ChartError::NothingToRender);
    }
    Ok(project(
        state.plan.iterations(),
        &state.params,
        state.plan.boundary_index(),
    ))
}

pub async fn write_budget_chart_png(
    output_path: &str,
    state: &AppState,
) -> Result<(), ChartError> {
    let points = chart_points(state)?;
    let output_path = output_path.to_string();
    let visibility = state.visibility;
    let currency = state.params.currency.clone();
    tokio::task::spawn_blocking(move || {
        render_chart_png(&output_path, &points, visibility, &currency)
    })
    .await
    .map_err(|e| ChartError::Render(e.to_string()))??;
    Ok(())
}

fn render_chart_png(
    output_path: &str,
    points: &[ChartPoint],
    visibility: ChartVisibility,
    currency: &str,
) -> Result<(), ChartError> {
    let max_value = points
        .iter()
        .flat_map(|p| {
            [
                p.iteration_cost,
                p.cumulative_standard,
                p.cumulative_actual,
                p.budget_cap,
            ]
        })
        .fold(0.0_f64, f64::max);
    let max_y = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };
    let max_x = points.len() as f64 - 0.5;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Budget Consumption", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5_f64..max_x, 0.0_f64..max_y)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let label_count = points.len().min(12).max(2);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Iteration")
        .y_desc(format!("Cost ({currency})"))
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 20))
        .x_labels(label_count)
        .x_label_formatter(&|x| label_at(points, *x))
        .y_label_formatter(&|y| format_currency(*y, currency))
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    if visibility.iteration_cost {
        let bar_color = RGBColor(59, 130, 246);
        chart
            .draw_series(points.iter().enumerate().map(|(idx, point)| {
                let x = idx as f64;
                Rectangle::new(
                    [(x - 0.3, 0.0), (x + 0.3, point.iteration_cost)],
                    bar_color.filled(),
                )
            }))
            .map_err(|e| ChartError::Render(e.to_string()))?
            .label("Iteration Cost")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], bar_color.filled()));
    }

    if visibility.cumulative_standard {
        let line_color = RGBColor(16, 185, 129);
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .enumerate()
                    .map(|(idx, point)| (idx as f64, point.cumulative_standard)),
                line_color.stroke_width(2),
            ))
            .map_err(|e| ChartError::Render(e.to_string()))?
            .label("Cumulative Standard")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2))
            });
    }

    if visibility.cumulative_actual {
        let line_color = RGBColor(245, 158, 11);
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .enumerate()
                    .map(|(idx, point)| (idx as f64, point.cumulative_actual)),
                line_color.stroke_width(2),
            ))
            .map_err(|e| ChartError::Render(e.to_string()))?
            .label("Cumulative Actual")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2))
            });
    }

    let cap_color = RGBColor(239, 68, 68);
    let budget_cap = points[0].budget_cap;
    chart
        .draw_series(DashedLineSeries::new(
            vec![(-0.5, budget_cap), (max_x, budget_cap)],
            10,
            6,
            cap_color.stroke_width(2),
        ))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Budget Cap")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], cap_color.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    tracing::debug!(path = output_path, points = points.len(), "budget chart rendered");
    Ok(())
}

/// Axis ticks land on arbitrary values; only whole positions get a label.
fn label_at(points: &[ChartPoint], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 0.01 {
        return String::new();
    }
    points
        .get(index as usize)
        .map(|point| point.label.clone())
        .unwrap_or_default()
}
