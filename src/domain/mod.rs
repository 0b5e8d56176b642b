pub mod budget;
pub mod chart;
pub mod iteration;
