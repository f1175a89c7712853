//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches the statement series
//! - reconciles filter flags into the criteria store
//! - derives the visible rows and prints them, or hands off to the TUI

use clap::Parser;

use crate::cli::{Command, ShowArgs};
use crate::data::FmpClient;
use crate::domain::{FilterCriteria, SortDirection, SortSpec, ViewConfig};
use crate::error::AppError;
use crate::form::{SubmittedFieldSet, apply_submission, numeric};

pub mod pipeline;

/// Entry point for the `fin` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fin` and `fin -s MSFT` to behave like `fin tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args);
    let client = FmpClient::from_env()?;
    let snapshot = client.fetch_income_statements(&config.symbol, config.period, config.limit)?;

    let mut criteria = FilterCriteria::default();
    apply_submission(&mut criteria, &submitted_from_args(&args)?);

    let sort = sort_spec_from_args(&args);
    let rows = pipeline::derive_rows(&snapshot.records, &criteria, sort);

    print!(
        "{}",
        crate::report::format_run_summary(&snapshot, &criteria, sort, rows.len())
    );
    print!("{}", crate::report::format_table(&rows, sort));

    Ok(())
}

pub fn view_config_from_args(args: &ShowArgs) -> ViewConfig {
    ViewConfig {
        symbol: args.symbol.clone(),
        period: args.period,
        limit: args.limit,
    }
}

fn sort_spec_from_args(args: &ShowArgs) -> SortSpec {
    let mut spec = SortSpec::default();
    if let Some(key) = args.sort {
        spec.key = key;
    }
    if args.desc {
        spec.direction = SortDirection::Descending;
    }
    spec
}

/// Map the filter flags onto a submitted field-set so the CLI goes
/// through the same reconciliation (and precedence) as the modal form.
fn submitted_from_args(args: &ShowArgs) -> Result<SubmittedFieldSet, AppError> {
    Ok(SubmittedFieldSet {
        starting_year: flag_value("--year-from", &args.year_from)?,
        ending_year: flag_value("--year-to", &args.year_to)?,
        net_income_min: flag_value("--net-income-min", &args.net_income_min)?,
        net_income_max: flag_value("--net-income-max", &args.net_income_max)?,
        revenue_min: flag_value("--revenue-min", &args.revenue_min)?,
        revenue_max: flag_value("--revenue-max", &args.revenue_max)?,
    })
}

fn flag_value(flag: &str, raw: &Option<String>) -> Result<Option<String>, AppError> {
    match raw {
        None => Ok(None),
        Some(text) => match numeric::normalize(text) {
            Some(value) => Ok(Some(value)),
            None => Err(AppError::new(
                2,
                format!("Invalid numeric value for {flag}: '{text}'"),
            )),
        },
    }
}

/// Rewrite argv so `fin` defaults to `fin tui`.
///
/// Rules:
/// - `fin`                      -> `fin tui`
/// - `fin -s MSFT ...`          -> `fin tui -s MSFT ...`
/// - `fin --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["fin"])), argv(&["fin", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["fin", "-s", "MSFT"])),
            argv(&["fin", "tui", "-s", "MSFT"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["fin", "show", "--desc"])),
            argv(&["fin", "show", "--desc"])
        );
        assert_eq!(rewrite_args(argv(&["fin", "--help"])), argv(&["fin", "--help"]));
    }

    #[test]
    fn invalid_flag_text_is_a_usage_error() {
        let err = flag_value("--revenue-min", &Some("12a".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let ok = flag_value("--revenue-min", &Some("1,000".to_string())).unwrap();
        assert_eq!(ok.as_deref(), Some("1000"));
    }
}
