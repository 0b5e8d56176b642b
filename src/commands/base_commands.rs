use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::chart::ChartSeries;
use crate::services::state_store::DEFAULT_STATE_FILE;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Path to the saved budget state (JSON)
    #[arg(long, global = true, env = "BUDGET_ANALYST_STATE", default_value = DEFAULT_STATE_FILE)]
    pub state: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the budget parameters
    ShowParams,
    /// Change budget parameters; unparseable numbers are stored as 0
    SetParams {
        /// Cost per hour
        #[arg(long, allow_hyphen_values = true)]
        cost_per_hour: Option<String>,
        /// Total budget cap
        #[arg(long, allow_hyphen_values = true)]
        budget_size: Option<String>,
        /// Team size
        #[arg(long, allow_hyphen_values = true)]
        team_size: Option<String>,
        /// Standard working days per iteration
        #[arg(long, allow_hyphen_values = true)]
        working_days: Option<String>,
        /// Currency code, e.g. USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Replace budget parameters with the contents of a YAML file
    LoadParams {
        /// Parameters YAML file
        #[arg(short, long)]
        input: String,
    },
    /// Export budget parameters to CSV
    ExportParams {
        /// Output CSV file
        #[arg(short, long, default_value = "budget-parameters.csv")]
        output: String,
    },
    /// Import budget parameters from CSV
    ImportParams {
        /// Parameters CSV file
        #[arg(short, long)]
        input: String,
    },
    /// Append an iteration at the standard rate
    AddIteration,
    /// Replace all iterations with enough standard iterations to use the budget
    GenerateIterations,
    /// Edit a recorded iteration; unparseable numbers are stored as 0
    EditIteration {
        /// Iteration number
        #[arg(short, long)]
        number: u32,
        /// Days worked
        #[arg(long, allow_hyphen_values = true)]
        days: Option<String>,
        /// Team size for this iteration
        #[arg(long, allow_hyphen_values = true)]
        team_size: Option<String>,
        /// Total hours consumed
        #[arg(long, allow_hyphen_values = true)]
        total_hours: Option<String>,
    },
    /// Delete an iteration and renumber the rest
    DeleteIteration {
        /// Iteration number
        #[arg(short, long)]
        number: u32,
    },
    /// Mark an iteration as the current one
    SetCurrent {
        /// Iteration number
        #[arg(short, long)]
        number: u32,
    },
    /// Remove the current iteration marker
    ClearCurrent,
    /// Print all recorded iterations
    ListIterations,
    /// Export iterations to CSV
    ExportIterations {
        /// Output CSV file
        #[arg(short, long, default_value = "iterations.csv")]
        output: String,
    },
    /// Import iterations from CSV, replacing the current ones
    ImportIterations {
        /// Iterations CSV file
        #[arg(short, long)]
        input: String,
    },
    /// Print budget metrics and the projected cost table
    Report,
    /// Show or hide a chart series
    ToggleSeries {
        /// Series to toggle
        #[arg(value_enum)]
        series: ChartSeries,
    },
    /// Render the budget chart to a PNG file
    Plot {
        /// Output PNG file (defaults to budget-chart-<date>.png)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export a PDF report with chart, metrics and cost table
    ExportPdf {
        /// Output PDF file (defaults to budget-chart-<date>.pdf)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
