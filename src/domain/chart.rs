use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One position on the budget timeline. Derived on every render, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub iteration_cost: f64,
    pub cumulative_standard: f64,
    pub cumulative_actual: f64,
    pub budget_cap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartSeries {
    IterationCost,
    CumulativeStandard,
    CumulativeActual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartVisibility {
    pub iteration_cost: bool,
    pub cumulative_standard: bool,
    pub cumulative_actual: bool,
}

impl Default for ChartVisibility {
    fn default() -> Self {
        Self {
            iteration_cost: true,
            cumulative_standard: true,
            cumulative_actual: true,
        }
    }
}

impl ChartVisibility {
    pub fn is_visible(&self, series: ChartSeries) -> bool {
        match series {
            ChartSeries::IterationCost => self.iteration_cost,
            ChartSeries::CumulativeStandard => self.cumulative_standard,
            ChartSeries::CumulativeActual => self.cumulative_actual,
        }
    }

    /// Flips one series and returns its new visibility.
    pub fn toggle(&mut self, series: ChartSeries) -> bool {
        let flag = match series {
            ChartSeries::IterationCost => &mut self.iteration_cost,
            ChartSeries::CumulativeStandard => &mut self.cumulative_standard,
            ChartSeries::CumulativeActual => &mut self.cumulative_actual,
        };
        *flag = !*flag;
        *flag
    }
}
