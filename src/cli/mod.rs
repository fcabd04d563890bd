//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, FilterArgs};
pub use output::{format_categories, format_count, format_totals, format_transaction_list};
