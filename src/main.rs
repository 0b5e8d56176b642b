use budget_analyst::commands::base_commands::{CliArgs, Commands};
use budget_analyst::commands::iterations_cmd::iterations_command;
use budget_analyst::commands::params_cmd::params_command;
use budget_analyst::commands::plot_cmd::{export_pdf_command, plot_command};
use budget_analyst::commands::report_cmd::{report_command, toggle_series_command};
use budget_analyst::services::state_store::StateStore;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let store = StateStore::new(&args.state);
    tracing::debug!(state = %args.state, "using budget state file");

    match args.command {
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
        cmd @ (Commands::ShowParams
        | Commands::SetParams { .. }
        | Commands::LoadParams { .. }
        | Commands::ExportParams { .. }
        | Commands::ImportParams { .. }) => params_command(cmd, &store).await,
        cmd @ (Commands::AddIteration
        | Commands::GenerateIterations
        | Commands::EditIteration { .. }
        | Commands::DeleteIteration { .. }
        | Commands::SetCurrent { .. }
        | Commands::ClearCurrent
        | Commands::ListIterations
        | Commands::ExportIterations { .. }
        | Commands::ImportIterations { .. }) => iterations_command(cmd, &store).await,
        cmd @ Commands::Report => report_command(cmd, &store).await,
        cmd @ Commands::ToggleSeries { .. } => toggle_series_command(cmd, &store).await,
        cmd @ Commands::Plot { .. } => plot_command(cmd, &store).await,
        cmd @ Commands::ExportPdf { .. } => export_pdf_command(cmd, &store).await,
    }
}
