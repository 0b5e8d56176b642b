use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_iteration_table;
use crate::domain::iteration::IterationEdit;
use crate::services::form_input::{coerce_f64, coerce_u32};
use crate::services::iterations_csv::{
    export_iterations_to_csv_file, import_iterations_from_csv_file,
};
use crate::services::state_store::{AppState, StateStore};

pub async fn iterations_command(cmd: Commands, store: &StateStore) {
    let mut state = store.load().await;
    let message = match cmd {
        Commands::ListIterations => {
            println!("{}", format_iteration_table(&state.plan, &state.params));
            return;
        }
        Commands::ExportIterations { output } => {
            match export_iterations_to_csv_file(&output, &state.plan).await {
                Ok(()) => println!("Iterations written to {output}"),
                Err(e) => eprintln!("Failed to export iterations: {e:?}"),
            }
            return;
        }
        Commands::ImportIterations { input } => {
            match import_iterations_from_csv_file(&input).await {
                Ok(plan) => {
                    state.plan = plan;
                    format!("Imported {} iterations", state.plan.len())
                }
                Err(e) => {
                    eprintln!("Failed to import iterations: {e:?}");
                    return;
                }
            }
        }
        cmd => match edit_plan(&mut state, cmd) {
            Ok(Some(message)) => message,
            Ok(None) => return,
            Err(e) => {
                eprintln!("Failed to update iterations: {e:?}");
                return;
            }
        },
    };

    if let Err(e) = store.save(&state).await {
        eprintln!("Failed to save iterations: {e:?}");
    } else {
        println!("{message}");
    }
}

/// Applies one editing command to the plan and describes what changed.
pub fn edit_plan(
    state: &mut AppState,
    cmd: Commands,
) -> Result<Option<String>, crate::domain::iteration::PlanError> {
    let message = match cmd {
        Commands::AddIteration => {
            let added = state.plan.add_standard(&state.params)?;
            format!("Added iteration {}", added.number)
        }
        Commands::GenerateIterations => {
            state.plan.generate_to_reach_budget(&state.params);
            format!("Generated {} iterations", state.plan.len())
        }
        Commands::EditIteration {
            number,
            days,
            team_size,
            total_hours,
        } => {
            let edit = IterationEdit {
                days: days.as_deref().map(coerce_u32),
                team_size: team_size.as_deref().map(coerce_u32),
                total_hours: total_hours.as_deref().map(coerce_f64),
            };
            state.plan.update(number, edit)?;
            format!("Updated iteration {number}")
        }
        Commands::DeleteIteration { number } => {
            state.plan.delete(number)?;
            format!("Deleted iteration {number}")
        }
        Commands::SetCurrent { number } => {
            state.plan.set_current(number)?;
            format!("Iteration {number} marked as current")
        }
        Commands::ClearCurrent => {
            state.plan.clear_current();
            "Current iteration cleared".to_string()
        }
        _ => return Ok(None),
    };
    Ok(Some(message))
}
