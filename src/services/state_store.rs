use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::budget::BudgetParameters;
use crate::domain::chart::ChartVisibility;
use crate::domain::iteration::{Iteration, IterationPlan};

pub const DEFAULT_STATE_FILE: &str = "budget-analyst-state.json";

#[derive(Error, Debug)]
pub enum StateStoreError {
    #[error("failed to read state file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write state file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse state file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the user edits. Chart points are derived from it, never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub params: BudgetParameters,
    pub plan: IterationPlan,
    pub visibility: ChartVisibility,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    budget_params: BudgetParameters,
    iterations: Vec<IterationRecord>,
    #[serde(default)]
    chart_visibility: Option<ChartVisibility>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IterationRecord {
    iteration_number: u32,
    iteration_days: u32,
    team_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_hours: Option<f64>,
    #[serde(default)]
    is_current: bool,
}

/// Single JSON snapshot file, rewritten in full after every change.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the snapshot, falling back to defaults when it is missing or corrupt.
    pub async fn load(&self) -> AppState {
        match self.try_load().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no saved state, using defaults");
                AppState::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load saved state: {e}");
                AppState::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Option<AppState>, StateStoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StateStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Ok(Some(deserialize_state_from_json_str(&contents)?))
    }

    pub async fn save(&self, state: &AppState) -> Result<(), StateStoreError> {
        let json = serialize_state_to_json(state)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StateStoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

pub fn serialize_state_to_json(state: &AppState) -> Result<String, serde_json::Error> {
    let record = SnapshotRecord {
        budget_params: state.params.clone(),
        iterations: state
            .plan
            .flagged()
            .map(|(iteration, is_current)| IterationRecord {
                iteration_number: iteration.number,
                iteration_days: iteration.days,
                team_size: iteration.team_size,
                total_hours: iteration.total_hours,
                is_current,
            })
            .collect(),
        chart_visibility: Some(state.visibility),
    };
    serde_json::to_string_pretty(&record)
}

pub fn deserialize_state_from_json_str(input: &str) -> Result<AppState, serde_json::Error> {
    let record: SnapshotRecord = serde_json::from_str(input)?;
    let rows = record
        .iterations
        .into_iter()
        .map(|row| {
            (
                Iteration {
                    number: row.iteration_number,
                    days: row.iteration_days,
                    team_size: row.team_size,
                    total_hours: row.total_hours,
                },
                row.is_current,
            )
        })
        .collect();

    Ok(AppState {
        params: record.budget_params,
        plan: IterationPlan::from_flagged(rows),
        visibility: record.chart_visibility.unwrap_or_default(),
    })
}
