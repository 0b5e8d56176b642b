use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Working hours per person per day used for every standard cost figure.
pub const HOURS_PER_DAY: u32 = 8;

#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("invalid cost per hour: {0}")]
    CostPerHour(f64),
    #[error("invalid budget size: {0}")]
    BudgetSize(f64),
    #[error("team size must be at least 1")]
    TeamSize,
    #[error("working days per iteration must be at least 1")]
    WorkingDays,
    #[error("currency must not be empty")]
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetParameters {
    pub cost_per_hour: f64,
    pub budget_size: f64,
    pub team_size: u32,
    pub working_days_per_iteration: u32,
    pub currency: String,
}

impl Default for BudgetParameters {
    fn default() -> Self {
        Self {
            cost_per_hour: 50.0,
            budget_size: 100_000.0,
            team_size: 5,
            working_days_per_iteration: 10,
            currency: "USD".to_string(),
        }
    }
}

impl BudgetParameters {
    pub fn standard_iteration_hours(&self) -> f64 {
        self.working_days_per_iteration as f64 * self.team_size as f64 * HOURS_PER_DAY as f64
    }

    /// Idealized cost of one full iteration at the global team size and rate.
    pub fn standard_iteration_cost(&self) -> f64 {
        self.standard_iteration_hours() * self.cost_per_hour
    }

    /// Reports the first violated invariant, if any.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.cost_per_hour.is_finite() || self.cost_per_hour < 0.0 {
            return Err(ParamsError::CostPerHour(self.cost_per_hour));
        }
        if !self.budget_size.is_finite() || self.budget_size < 0.0 {
            return Err(ParamsError::BudgetSize(self.budget_size));
        }
        if self.team_size == 0 {
            return Err(ParamsError::TeamSize);
        }
        if self.working_days_per_iteration == 0 {
            return Err(ParamsError::WorkingDays);
        }
        if self.currency.trim().is_empty() {
            return Err(ParamsError::Currency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_iteration_cost_uses_eight_hour_days() {
        let params = BudgetParameters {
            cost_per_hour: 50.0,
            budget_size: 10_000.0,
            team_size: 2,
            working_days_per_iteration: 5,
            currency: "USD".to_string(),
        };

        assert_eq!(params.standard_iteration_hours(), 80.0);
        assert_eq!(params.standard_iteration_cost(), 4000.0);
    }

    #[test]
    fn default_parameters_are_valid() {
        assert!(BudgetParameters::default().validate().is_ok());
    }

    #[test]
    fn validate_reports_first_violated_invariant() {
        let mut params = BudgetParameters::default();
        params.team_size = 0;
        assert_eq!(params.validate(), Err(ParamsError::TeamSize));

        let mut params = BudgetParameters::default();
        params.cost_per_hour = -1.0;
        assert_eq!(params.validate(), Err(ParamsError::CostPerHour(-1.0)));

        let mut params = BudgetParameters::default();
        params.budget_size = f64::NAN;
        assert!(matches!(params.validate(), Err(ParamsError::BudgetSize(_))));

        let mut params = BudgetParameters::default();
        params.currency = "  ".to_string();
        assert_eq!(params.validate(), Err(ParamsError::Currency));
    }
}
