use std::io;

use thiserror::Error;

use crate::domain::budget::{BudgetParameters, ParamsError};

const COST_PER_HOUR: &str = "Cost per Hour";
const BUDGET_SIZE: &str = "Budget Size";
const TEAM_SIZE: &str = "Team Size";
const WORKING_DAYS: &str = "Working Days per Iteration";
const CURRENCY: &str = "Currency";

#[derive(Error, Debug)]
pub enum ParamsCsvError {
    #[error("failed to read parameters csv: {0}")]
    Read(#[from] io::Error),
    #[error("failed to write parameters csv: {0}")]
    Write(#[source] io::Error),
    #[error("failed to parse parameters csv: {0}")]
    Parse(#[from] csv::Error),
    #[error("invalid csv format, missing required parameters: {0}")]
    MissingParameters(String),
    #[error("invalid budget parameters: {0}")]
    Invalid(#[from] ParamsError),
}

pub async fn export_params_to_csv_file(
    path: &str,
    params: &BudgetParameters,
) -> Result<(), ParamsCsvError> {
    let csv = serialize_params_to_csv(params)?;
    tokio::fs::write(path, csv)
        .await
        .map_err(ParamsCsvError::Write)?;
    Ok(())
}

pub async fn import_params_from_csv_file(path: &str) -> Result<BudgetParameters, ParamsCsvError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_params_from_csv_str(&contents)
}

pub fn serialize_params_to_csv(params: &BudgetParameters) -> Result<String, ParamsCsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Parameter", "Value"])?;
    let rows = [
        (COST_PER_HOUR, params.cost_per_hour.to_string()),
        (BUDGET_SIZE, params.budget_size.to_string()),
        (TEAM_SIZE, params.team_size.to_string()),
        (WORKING_DAYS, params.working_days_per_iteration.to_string()),
        (CURRENCY, params.currency.clone()),
    ];
    for (key, value) in &rows {
        writer.write_record([*key, value.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ParamsCsvError::Write(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// All five parameters must be present and parseable; unknown keys and
/// blank rows are ignored.
pub fn deserialize_params_from_csv_str(input: &str) -> Result<BudgetParameters, ParamsCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut cost_per_hour = None;
    let mut budget_size = None;
    let mut team_size = None;
    let mut working_days = None;
    let mut currency = None;

    for record in reader.records() {
        let record = record?;
        let key = record.get(0).unwrap_or("").trim();
        let value = record.get(1).unwrap_or("").trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        match key {
            COST_PER_HOUR => cost_per_hour = value.parse::<f64>().ok(),
            BUDGET_SIZE => budget_size = value.parse::<f64>().ok(),
            TEAM_SIZE => team_size = value.parse::<u32>().ok(),
            WORKING_DAYS => working_days = value.parse::<u32>().ok(),
            CURRENCY => currency = Some(value.to_string()),
            _ => {}
        }
    }

    let mut missing = Vec::new();
    if cost_per_hour.is_none() {
        missing.push(COST_PER_HOUR);
    }
    if budget_size.is_none() {
        missing.push(BUDGET_SIZE);
    }
    if team_size.is_none() {
        missing.push(TEAM_SIZE);
    }
    if working_days.is_none() {
        missing.push(WORKING_DAYS);
    }
    if currency.is_none() {
        missing.push(CURRENCY);
    }

    match (cost_per_hour, budget_size, team_size, working_days, currency) {
        (
            Some(cost_per_hour),
            Some(budget_size),
            Some(team_size),
            Some(working_days_per_iteration),
            Some(currency),
        ) => {
            let params = BudgetParameters {
                cost_per_hour,
                budget_size,
                team_size,
                working_days_per_iteration,
                currency,
            };
            params.validate()?;
            Ok(params)
        }
        _ => Err(ParamsCsvError::MissingParameters(missing.join(", "))),
    }
}
