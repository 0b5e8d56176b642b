use crate::domain::budget::BudgetParameters;
use crate::domain::iteration::Iteration;

// Team of 2 working 5 days per iteration: one standard iteration is 80 hours.
pub fn build_params(cost_per_hour: f64, budget_size: f64) -> BudgetParameters {
    BudgetParameters {
        cost_per_hour,
        budget_size,
        team_size: 2,
        working_days_per_iteration: 5,
        currency: "USD".to_string(),
    }
}

pub fn build_iteration(number: u32, total_hours: f64) -> Iteration {
    Iteration {
        number,
        days: 5,
        team_size: 2,
        total_hours: Some(total_hours),
    }
}
