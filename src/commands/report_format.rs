use crate::domain::budget::BudgetParameters;
use crate::domain::chart::ChartPoint;
use crate::domain::iteration::IterationPlan;
use crate::services::metrics::BudgetMetrics;
use crate::services::money::format_currency;

pub fn format_params(params: &BudgetParameters) -> String {
    let mut lines = Vec::new();
    lines.push("Budget Parameters".to_string());
    lines.push(format!("Cost per hour: {:.2}", params.cost_per_hour));
    lines.push(format!(
        "Budget size: {}",
        format_currency(params.budget_size, &params.currency)
    ));
    lines.push(format!("Team size: {}", params.team_size));
    lines.push(format!(
        "Working days per iteration: {}",
        params.working_days_per_iteration
    ));
    lines.push(format!("Currency: {}", params.currency));
    lines.push(format!(
        "Standard iteration cost: {}",
        format_currency(params.standard_iteration_cost(), &params.currency)
    ));
    lines.join("\n")
}

pub fn format_metrics(metrics: &BudgetMetrics, currency: &str) -> String {
    let mut lines = Vec::new();
    lines.push("Budget Metrics".to_string());
    lines.push(format!(
        "Total budget: {}",
        format_currency(metrics.total_budget, currency)
    ));
    lines.push(format!(
        "Consumed budget: {}",
        format_currency(metrics.consumed_budget, currency)
    ));
    lines.push(format!("Consumption rate: {:.1}%", metrics.consumption_rate));
    lines.push(format!(
        "Remaining budget: {}",
        format_currency(metrics.remaining_budget(), currency)
    ));
    lines.join("\n")
}

pub fn format_chart_table(points: &[ChartPoint], currency: &str) -> String {
    let mut lines = Vec::new();
    lines.push("Point | Iteration Cost | Cumulative Standard | Cumulative Actual | Budget Cap".to_string());
    lines.push("------|----------------|---------------------|-------------------|-----------".to_string());
    for point in points {
        lines.push(format!(
            "{} | {} | {} | {} | {}",
            point.label,
            format_currency(point.iteration_cost, currency),
            format_currency(point.cumulative_standard, currency),
            format_currency(point.cumulative_actual, currency),
            format_currency(point.budget_cap, currency),
        ));
    }
    lines.join("\n")
}

pub fn format_iteration_table(plan: &IterationPlan, params: &BudgetParameters) -> String {
    if plan.is_empty() {
        return "No iterations recorded".to_string();
    }

    let mut lines = Vec::new();
    lines.push("Iteration | Days | Team Size | Total Hours | Cost | Current".to_string());
    lines.push("----------|------|-----------|-------------|------|--------".to_string());
    for (iteration, is_current) in plan.flagged() {
        lines.push(format!(
            "{} | {} | {} | {} | {} | {}",
            iteration.number,
            iteration.days,
            iteration.team_size,
            iteration.hours(),
            format_currency(iteration.cost(params.cost_per_hour), &params.currency),
            if is_current { "yes" } else { "" },
        ));
    }
    lines.join("\n")
}

pub fn format_budget_report(
    params: &BudgetParameters,
    metrics: &BudgetMetrics,
    points: &[ChartPoint],
) -> String {
    [
        "Budget Report".to_string(),
        String::new(),
        format_params(params),
        String::new(),
        format_metrics(metrics, &params.currency),
        String::new(),
        format_chart_table(points, &params.currency),
    ]
    .join("\n")
}
