//! Command-line parsing for the income-statement viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data-pipeline code.

use clap::{Parser, Subcommand};

use crate::domain::{Period, SortKey};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fin", version, about = "Income-Statement Table Viewer (FMP-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch statements, apply filter/sort flags, and print the table.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `fin show`, plus the
    /// modal filter form and sortable column headers.
    Tui(ShowArgs),
}

/// Common options for both front-ends.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Company ticker symbol.
    #[arg(short = 's', long, default_value = "AAPL")]
    pub symbol: String,

    /// Reporting period.
    #[arg(long, value_enum, default_value_t = Period::Annual)]
    pub period: Period,

    /// Maximum number of statements to request.
    #[arg(short = 'n', long, default_value_t = 40)]
    pub limit: usize,

    /// Sort column (date, revenue, net-income).
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,

    /// Starting fiscal year for the date filter (pairs with --year-to).
    #[arg(long)]
    pub year_from: Option<String>,

    /// Ending fiscal year for the date filter.
    #[arg(long)]
    pub year_to: Option<String>,

    /// Minimum revenue; grouping commas are allowed when quoted.
    #[arg(long)]
    pub revenue_min: Option<String>,

    /// Maximum revenue.
    #[arg(long)]
    pub revenue_max: Option<String>,

    /// Minimum net income.
    #[arg(long)]
    pub net_income_min: Option<String>,

    /// Maximum net income.
    #[arg(long)]
    pub net_income_max: Option<String>,
}
