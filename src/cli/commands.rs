//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finbook")]
#[command(about = "Personal finance ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// View-narrowing options shared by `list` and `totals`
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Only this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// income, expense or all
    #[arg(short = 't', long = "type", default_value = "all")]
    pub kind: String,

    /// Category label, or all
    #[arg(short, long, default_value = "all")]
    pub category: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new ledger
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Currency code used when printing amounts
        #[arg(short, long, default_value = "BRL")]
        currency: String,
    },

    /// Record a new transaction
    Add {
        /// What the money was for
        description: String,

        /// Positive amount
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Category label (default: Uncategorized)
        #[arg(short, long, default_value = "")]
        category: String,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change fields of an existing transaction
    Edit {
        /// Transaction id
        id: String,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<String>,

        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Remove {
        /// Transaction id
        id: String,
    },

    /// List transactions, newest first
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum number of rows to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show income, expense and balance
    Totals {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List category filter choices
    Categories,

    /// Write the full ledger to <export_name>.json and <export_name>.txt
    Export {
        /// Output directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Import transactions from a JSON file
    Import {
        /// File holding a transaction list or an export document
        file: PathBuf,

        /// merge or replace (asks when omitted)
        #[arg(short, long)]
        mode: Option<String>,

        /// Confirm without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every transaction
    Clear {
        /// Confirm without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
