use thiserror::Error;

use crate::domain::budget::{BudgetParameters, HOURS_PER_DAY};

/// Upper bound on recorded iterations a plan accepts from editing and generation.
pub const MAX_PLANNED_ITERATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    pub number: u32,
    pub days: u32,
    pub team_size: u32,
    pub total_hours: Option<f64>,
}

impl Iteration {
    pub fn hours(&self) -> f64 {
        self.total_hours.unwrap_or(0.0)
    }

    pub fn cost(&self, cost_per_hour: f64) -> f64 {
        self.hours() * cost_per_hour
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationEdit {
    pub days: Option<u32>,
    pub team_size: Option<u32>,
    pub total_hours: Option<f64>,
}

#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    #[error("maximum {0} iterations allowed")]
    TooManyIterations(usize),
    #[error("iteration {0} not found")]
    UnknownIteration(u32),
}

/// Ordered iterations with at most one marked as current.
///
/// Ordinals are kept dense and 1-based: every mutation that changes the
/// sequence renumbers it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationPlan {
    iterations: Vec<Iteration>,
    current: Option<usize>,
}

impl IterationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from rows that carry their own "is current" flag.
    /// The first flagged row wins.
    pub fn from_flagged(rows: Vec<(Iteration, bool)>) -> Self {
        let current = rows.iter().position(|(_, is_current)| *is_current);
        let iterations = rows.into_iter().map(|(iteration, _)| iteration).collect();
        let mut plan = Self {
            iterations,
            current,
        };
        plan.renumber();
        plan
    }

    pub fn flagged(&self) -> impl Iterator<Item = (&Iteration, bool)> {
        self.iterations
            .iter()
            .enumerate()
            .map(|(index, iteration)| (iteration, Some(index) == self.current))
    }

    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Last index whose cost counts as actually incurred: the current
    /// iteration, or the last recorded one when none is marked.
    pub fn boundary_index(&self) -> Option<usize> {
        self.current.or_else(|| self.iterations.len().checked_sub(1))
    }

    /// Iterations up to and including the current one, or all of them when
    /// none is marked.
    pub fn recorded_through_current(&self) -> &[Iteration] {
        match self.current {
            Some(index) => &self.iterations[..=index],
            None => &self.iterations,
        }
    }

    pub fn add_standard(&mut self, params: &BudgetParameters) -> Result<&Iteration, PlanError> {
        if self.iterations.len() >= MAX_PLANNED_ITERATIONS {
            return Err(PlanError::TooManyIterations(MAX_PLANNED_ITERATIONS));
        }
        self.iterations.push(Iteration {
            number: self.iterations.len() as u32 + 1,
            days: params.working_days_per_iteration,
            team_size: params.team_size,
            total_hours: Some(params.standard_iteration_hours()),
        });
        Ok(&self.iterations[self.iterations.len() - 1])
    }

    /// Replaces the plan with standard iterations until the budget is used up.
    /// The last iteration is shortened to whatever budget remains.
    pub fn generate_to_reach_budget(&mut self, params: &BudgetParameters) {
        let standard_hours = params.standard_iteration_hours();
        let standard_cost = params.standard_iteration_cost();
        let mut generated: Vec<Iteration> = Vec::new();
        let mut total_cost = 0.0;

        while total_cost < params.budget_size && generated.len() < MAX_PLANNED_ITERATIONS {
            let number = generated.len() as u32 + 1;

            // Only reachable with a positive standard cost, so both divisors are non-zero.
            if total_cost + standard_cost > params.budget_size {
                let remaining_hours = (params.budget_size - total_cost) / params.cost_per_hour;
                let team_hours_per_day = params.team_size as f64 * HOURS_PER_DAY as f64;
                let days = (remaining_hours / team_hours_per_day).ceil().max(1.0) as u32;
                generated.push(Iteration {
                    number,
                    days,
                    team_size: params.team_size,
                    total_hours: Some(remaining_hours),
                });
                break;
            }

            generated.push(Iteration {
                number,
                days: params.working_days_per_iteration,
                team_size: params.team_size,
                total_hours: Some(standard_hours),
            });
            total_cost += standard_cost;
        }

        self.iterations = generated;
        self.current = None;
    }

    pub fn update(&mut self, number: u32, edit: IterationEdit) -> Result<&Iteration, PlanError> {
        let index = self.index_of(number)?;
        let iteration = &mut self.iterations[index];
        if let Some(days) = edit.days {
            iteration.days = days;
        }
        if let Some(team_size) = edit.team_size {
            iteration.team_size = team_size;
        }
        if let Some(total_hours) = edit.total_hours {
            iteration.total_hours = Some(total_hours);
        }
        Ok(&self.iterations[index])
    }

    pub fn delete(&mut self, number: u32) -> Result<Iteration, PlanError> {
        let index = self.index_of(number)?;
        let removed = self.iterations.remove(index);
        self.current = match self.current {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        self.renumber();
        Ok(removed)
    }

    pub fn set_current(&mut self, number: u32) -> Result<(), PlanError> {
        self.current = Some(self.index_of(number)?);
        Ok(())
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    fn index_of(&self, number: u32) -> Result<usize, PlanError> {
        self.iterations
            .iter()
            .position(|iteration| iteration.number == number)
            .ok_or(PlanError::UnknownIteration(number))
    }

    fn renumber(&mut self) {
        for (index, iteration) in self.iterations.iter_mut().enumerate() {
            iteration.number = index as u32 + 1;
        }
    }
}
