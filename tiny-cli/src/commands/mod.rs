//! Command implementations for the tiny CLI

pub mod check;
pub mod config;
pub mod eval;
pub mod parse;
pub mod repl;

// Re-export command functions
pub use check::check_command;
pub use config::config_command;
pub use eval::eval_command;
pub use parse::parse_command;
pub use repl::repl_command;
