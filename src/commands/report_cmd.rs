use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_budget_report;
use crate::domain::chart::ChartSeries;
use crate::services::metrics::aggregate;
use crate::services::projection::project;
use crate::services::state_store::StateStore;

pub async fn report_command(cmd: Commands, store: &StateStore) {
    if let Commands::Report = cmd {
        let state = store.load().await;
        let metrics = aggregate(state.plan.recorded_through_current(), &state.params);
        let points = project(
            state.plan.iterations(),
            &state.params,
            state.plan.boundary_index(),
        );
        println!("{}", format_budget_report(&state.params, &metrics, &points));
    }
}

pub async fn toggle_series_command(cmd: Commands, store: &StateStore) {
    if let Commands::ToggleSeries { series } = cmd {
        let mut state = store.load().await;
        let visible = state.visibility.toggle(series);
        if let Err(e) = store.save(&state).await {
            eprintln!("Failed to save chart visibility: {e:?}");
            return;
        }
        let status = if visible { "shown" } else { "hidden" };
        println!("{} series {status}", series_name(series));
    }
}

fn series_name(series: ChartSeries) -> &'static str {
    match series {
        ChartSeries::IterationCost => "Iteration Cost",
        ChartSeries::CumulativeStandard => "Cumulative Standard",
        ChartSeries::CumulativeActual => "Cumulative Actual",
    }
}
