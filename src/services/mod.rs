pub mod budget_chart;
pub mod form_input;
pub mod iterations_csv;
pub mod metrics;
pub mod money;
pub mod params_csv;
pub mod params_yaml;
pub mod pdf_report;
pub mod projection;
pub mod state_store;
