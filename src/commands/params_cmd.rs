use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_params;
use crate::domain::budget::BudgetParameters;
use crate::services::form_input::{coerce_f64, coerce_u32};
use crate::services::params_csv::{export_params_to_csv_file, import_params_from_csv_file};
use crate::services::params_yaml::load_params_from_yaml_file;
use crate::services::state_store::StateStore;

#[derive(Debug, Default)]
pub struct ParamEdits {
    pub cost_per_hour: Option<String>,
    pub budget_size: Option<String>,
    pub team_size: Option<String>,
    pub working_days: Option<String>,
    pub currency: Option<String>,
}

pub async fn params_command(cmd: Commands, store: &StateStore) {
    match cmd {
        Commands::ShowParams => {
            let state = store.load().await;
            println!("{}", format_params(&state.params));
        }
        Commands::SetParams {
            cost_per_hour,
            budget_size,
            team_size,
            working_days,
            currency,
        } => {
            let mut state = store.load().await;
            apply_param_edits(
                &mut state.params,
                ParamEdits {
                    cost_per_hour,
                    budget_size,
                    team_size,
                    working_days,
                    currency,
                },
            );
            if let Err(e) = store.save(&state).await {
                eprintln!("Failed to save budget parameters: {e:?}");
                return;
            }
            println!("{}", format_params(&state.params));
        }
        Commands::LoadParams { input } => {
            let params = match load_params_from_yaml_file(&input).await {
                Ok(params) => params,
                Err(e) => {
                    eprintln!("Failed to load budget parameters: {e:?}");
                    return;
                }
            };
            let mut state = store.load().await;
            state.params = params;
            if let Err(e) = store.save(&state).await {
                eprintln!("Failed to save budget parameters: {e:?}");
            } else {
                println!("Budget parameters loaded from {input}");
            }
        }
        Commands::ExportParams { output } => {
            let state = store.load().await;
            match export_params_to_csv_file(&output, &state.params).await {
                Ok(()) => println!("Budget parameters written to {output}"),
                Err(e) => eprintln!("Failed to export budget parameters: {e:?}"),
            }
        }
        Commands::ImportParams { input } => {
            let params = match import_params_from_csv_file(&input).await {
                Ok(params) => params,
                Err(e) => {
                    eprintln!("Failed to import budget parameters: {e:?}");
                    return;
                }
            };
            let mut state = store.load().await;
            state.params = params;
            if let Err(e) = store.save(&state).await {
                eprintln!("Failed to save budget parameters: {e:?}");
            } else {
                println!("Budget parameters imported successfully");
            }
        }
        _ => {}
    }
}

/// Applies typed-in values; anything that is not a valid number becomes 0.
pub fn apply_param_edits(params: &mut BudgetParameters, edits: ParamEdits) {
    if let Some(value) = edits.cost_per_hour {
        params.cost_per_hour = coerce_f64(&value);
    }
    if let Some(value) = edits.budget_size {
        params.budget_size = coerce_f64(&value);
    }
    if let Some(value) = edits.team_size {
        params.team_size = coerce_u32(&value);
    }
    if let Some(value) = edits.working_days {
        params.working_days_per_iteration = coerce_u32(&value);
    }
    if let Some(value) = edits.currency {
        params.currency = value.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_param_edits_coerces_garbage_to_zero() {
        let mut params = BudgetParameters::default();

        apply_param_edits(
            &mut params,
            ParamEdits {
                cost_per_hour: Some("abc".to_string()),
                budget_size: Some("2500.5".to_string()),
                team_size: Some("-2".to_string()),
                ..ParamEdits::default()
            },
        );

        assert_eq!(params.cost_per_hour, 0.0);
        assert_eq!(params.budget_size, 2500.5);
        assert_eq!(params.team_size, 0);
        assert_eq!(params.working_days_per_iteration, 10);
        assert_eq!(params.currency, "USD");
    }

    #[test]
    fn apply_param_edits_replaces_currency() {
        let mut params = BudgetParameters::default();
        apply_param_edits(
            &mut params,
            ParamEdits {
                currency: Some(" EUR ".to_string()),
                ..ParamEdits::default()
            },
        );
        assert_eq!(params.currency, "EUR");
    }
}
