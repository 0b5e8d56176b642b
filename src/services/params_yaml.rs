use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::budget::{BudgetParameters, ParamsError};

#[derive(Error, Debug)]
pub enum ParamsYamlError {
    #[error("failed to read parameters yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse parameters yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid budget parameters: {0}")]
    Invalid(#[from] ParamsError),
}

#[derive(Debug, Deserialize)]
struct ParamsRecord {
    cost_per_hour: Option<f64>,
    budget_size: Option<f64>,
    team_size: Option<u32>,
    working_days_per_iteration: Option<u32>,
    currency: Option<String>,
}

/// Reads budget parameters from a YAML file. Fields left out keep their
/// default values.
pub async fn load_params_from_yaml_file(path: &str) -> Result<BudgetParameters, ParamsYamlError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_params_from_yaml_str(&contents)
}

pub fn deserialize_params_from_yaml_str(input: &str) -> Result<BudgetParameters, ParamsYamlError> {
    let record: ParamsRecord = serde_yaml::from_str(input)?;
    let defaults = BudgetParameters::default();
    let params = BudgetParameters {
        cost_per_hour: record.cost_per_hour.unwrap_or(defaults.cost_per_hour),
        budget_size: record.budget_size.unwrap_or(defaults.budget_size),
        team_size: record.team_size.unwrap_or(defaults.team_size),
        working_days_per_iteration: record
            .working_days_per_iteration
            .unwrap_or(defaults.working_days_per_iteration),
        currency: record.currency.unwrap_or(defaults.currency),
    };
    params.validate()?;
    Ok(params)
}
