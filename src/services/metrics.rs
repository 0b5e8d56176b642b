use crate::domain::budget::BudgetParameters;
use crate::domain::iteration::Iteration;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetMetrics {
    pub total_budget: f64,
    pub consumed_budget: f64,
    pub consumption_rate: f64,
}

impl BudgetMetrics {
    /// Negative once the budget is overrun.
    pub fn remaining_budget(&self) -> f64 {
        self.total_budget - self.consumed_budget
    }
}

/// Sums the cost of the given iterations. The caller decides which
/// iterations count as consumed; the current marker is not consulted here.
pub fn aggregate(iterations: &[Iteration], params: &BudgetParameters) -> BudgetMetrics {
    let consumed_budget: f64 = iterations
        .iter()
        .map(|iteration| iteration.cost(params.cost_per_hour))
        .sum();
    let total_budget = params.budget_size;
    let consumption_rate = if total_budget > 0.0 {
        consumed_budget / total_budget * 100.0
    } else {
        0.0
    };

    BudgetMetrics {
        total_budget,
        consumed_budget,
        consumption_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_iteration, build_params};

    #[test]
    fn single_iteration_consumes_half_the_budget() {
        let params = build_params(50.0, 10_000.0);
        let metrics = aggregate(&[build_iteration(1, 100.0)], &params);

        assert_eq!(metrics.total_budget, 10_000.0);
        assert_eq!(metrics.consumed_budget, 5000.0);
        assert_eq!(metrics.consumption_rate, 50.0);
        assert_eq!(metrics.remaining_budget(), 5000.0);
    }

    #[test]
    fn zero_budget_reports_zero_rate() {
        let params = build_params(50.0, 0.0);
        let metrics = aggregate(&[build_iteration(1, 100.0)], &params);

        assert_eq!(metrics.consumed_budget, 5000.0);
        assert_eq!(metrics.consumption_rate, 0.0);
    }

    #[test]
    fn no_iterations_consume_nothing() {
        let metrics = aggregate(&[], &build_params(50.0, 10_000.0));
        assert_eq!(metrics.consumed_budget, 0.0);
        assert_eq!(metrics.consumption_rate, 0.0);
    }

    #[test]
    fn rate_is_not_rounded() {
        let params = build_params(1.0, 3.0);
        let metrics = aggregate(&[build_iteration(1, 1.0)], &params);
        assert_eq!(metrics.consumption_rate, 1.0 / 3.0 * 100.0);
    }
}
