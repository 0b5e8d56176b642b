pub mod base_commands;
pub mod iterations_cmd;
pub mod params_cmd;
pub mod plot_cmd;
pub mod report_cmd;
pub mod report_format;
