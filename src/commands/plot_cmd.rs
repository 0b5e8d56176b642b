use chrono::{Local, NaiveDate};

use crate::commands::base_commands::Commands;
use crate::services::budget_chart::write_budget_chart_png;
use crate::services::pdf_report::write_budget_report_pdf;
use crate::services::state_store::StateStore;

pub async fn plot_command(cmd: Commands, store: &StateStore) {
    if let Commands::Plot { output } = cmd {
        let output = output.unwrap_or_else(|| default_export_name(today(), "png"));
        let state = store.load().await;
        match write_budget_chart_png(&output, &state).await {
            Ok(()) => println!("Budget chart written to {output}"),
            Err(e) => eprintln!("Failed to export chart as PNG: {e:?}"),
        }
    }
}

pub async fn export_pdf_command(cmd: Commands, store: &StateStore) {
    if let Commands::ExportPdf { output } = cmd {
        let export_date = today();
        let output = output.unwrap_or_else(|| default_export_name(export_date, "pdf"));
        let state = store.load().await;
        match write_budget_report_pdf(&output, &state, export_date).await {
            Ok(chart_path) => {
                println!("Budget report written to {output}");
                println!("Budget chart written to {chart_path}");
            }
            Err(e) => eprintln!("Failed to export chart as PDF: {e:?}"),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_export_name(date: NaiveDate, extension: &str) -> String {
    format!("budget-chart-{}.{extension}", date.format("%Y-%m-%d"))
}
