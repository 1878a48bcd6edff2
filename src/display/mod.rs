//! Display formatting for terminal output

pub mod variables;

pub use variables::format_variable_list;
