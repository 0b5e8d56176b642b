use crate::domain::budget::BudgetParameters;
use crate::domain::chart::ChartPoint;
use crate::domain::iteration::Iteration;

/// Total iterations (recorded plus projected) after which projection stops
/// even if the budget cap was never reached.
pub const MAX_PROJECTED_ITERATIONS: usize = 200;

/// Builds the chart timeline: a "Start" point, one point per recorded
/// iteration, then projected iterations at the standard rate until both
/// cumulative totals reach the budget cap.
///
/// Iterations after `current_index` are projected at the standard cost rather
/// than their own recorded hours. `None` means nothing counts as incurred.
pub fn project(
    iterations: &[Iteration],
    params: &BudgetParameters,
    current_index: Option<usize>,
) -> Vec<ChartPoint> {
    let standard_cost = params.standard_iteration_cost();
    let budget_cap = params.budget_size;
    let is_incurred = |index: usize| current_index.is_some_and(|current| index <= current);

    let mut points = Vec::with_capacity(iterations.len() + 1);
    points.push(ChartPoint {
        label: "Start".to_string(),
        iteration_cost: 0.0,
        cumulative_standard: 0.0,
        cumulative_actual: 0.0,
        budget_cap,
    });

    let mut cumulative_standard = 0.0;
    let mut cumulative_actual = 0.0;
    for (index, iteration) in iterations.iter().enumerate() {
        let incurred = is_incurred(index);
        let actual_cost = iteration.cost(params.cost_per_hour);

        cumulative_standard += standard_cost;
        cumulative_actual += if incurred { actual_cost } else { standard_cost };

        points.push(ChartPoint {
            label: format!("IT {}", iteration.number),
            iteration_cost: if incurred { actual_cost } else { 0.0 },
            cumulative_standard,
            cumulative_actual,
            budget_cap,
        });
    }

    let reached_cap = |standard: f64, actual: f64| standard >= budget_cap && actual >= budget_cap;
    if reached_cap(cumulative_standard, cumulative_actual) {
        return points;
    }

    let mut number = iterations.len() + 1;
    while number <= MAX_PROJECTED_ITERATIONS {
        cumulative_standard += standard_cost;
        cumulative_actual += standard_cost;
        points.push(ChartPoint {
            label: format!("IT {number}"),
            iteration_cost: 0.0,
            cumulative_standard,
            cumulative_actual,
            budget_cap,
        });
        number += 1;

        if reached_cap(cumulative_standard, cumulative_actual) {
            break;
        }
    }

    tracing::debug!(
        recorded = iterations.len(),
        points = points.len(),
        "projected budget timeline"
    );
    points
}
