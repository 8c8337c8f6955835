//! Command-line interface for `itr`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use tracing::debug;

use crate::config::{CliOverrides, Config};
use crate::logging;
use commands::Context;

/// `itr` - read-only analytics over an issue/employee snapshot.
#[derive(Parser, Debug)]
#[command(name = "itr")]
#[command(
    author,
    version,
    about = "Read-only issue analytics over an employee/issue CSV snapshot",
    long_about = None,
    after_help = "All date-relative queries use the configured reference date, not the clock."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Config file (default: .issue-tracker/config.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding employees.csv and issues.csv
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Treat this date (yyyy-mm-dd) as today
    #[arg(long, global = true, value_name = "DATE")]
    pub reference_date: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count closed issues
    Closed,

    /// Show one issue by ID (case-insensitive)
    Show(IdArgs),

    /// Show the employee assigned to an issue
    Assignee(IdArgs),

    /// List issues with a given status (OPEN or CLOSED)
    Status(StatusArgs),

    /// Open issue IDs, earliest expected resolution first
    ByResolution,

    /// Open issues by priority (descending, lexical), then expected resolution
    ByPriority,

    /// Employees with open issues more than 7 days past expected resolution
    Delayed,

    /// Assignee employee ID for each open HIGH priority issue
    Owners,

    /// Open issues grouped by raw priority value
    Groups(GroupsArgs),

    /// Open issue IDs grouped by assignee location
    Locations,

    /// Days open for each open HIGH/MEDIUM issue
    Durations,

    /// List loaded employees
    Employees,

    /// Check the dataset for duplicates, unknown values and load problems
    Check,

    /// Show the resolved configuration
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct IdArgs {
    /// Issue ID
    pub id: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {
    /// Status to filter by (OPEN or CLOSED, any case)
    pub status: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GroupsArgs {
    /// Print only the number of issues per priority
    #[arg(long)]
    pub count: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let Some(command) = cli.command else {
        println!("itr - issue analytics. Use --help for usage.");
        return Ok(());
    };
    debug!(command = command.name(), "Dispatching");

    let overrides = CliOverrides {
        config_path: cli.config,
        data_dir: cli.data_dir,
        reference_date: cli.reference_date,
    };
    let config = Config::load(&overrides)?;

    match command {
        Commands::Config => commands::config::execute(&config, cli.json)?,
        Commands::Completions(args) => commands::completions::execute(&args),
        command => {
            let ctx = Context::open(config, cli.json)?;
            dispatch(&command, &ctx)?;
        }
    }

    Ok(())
}

fn dispatch(command: &Commands, ctx: &Context) -> crate::error::Result<()> {
    match command {
        Commands::Closed => commands::closed::execute(ctx),
        Commands::Show(args) => commands::show::execute(args, ctx),
        Commands::Assignee(args) => commands::assignee::execute(args, ctx),
        Commands::Status(args) => commands::status::execute(args, ctx),
        Commands::ByResolution => commands::ordered::execute_by_resolution(ctx),
        Commands::ByPriority => commands::ordered::execute_by_priority(ctx),
        Commands::Delayed => commands::delayed::execute(ctx),
        Commands::Owners => commands::owners::execute(ctx),
        Commands::Groups(args) => commands::groups::execute(args, ctx),
        Commands::Locations => commands::locations::execute(ctx),
        Commands::Durations => commands::durations::execute(ctx),
        Commands::Employees => commands::employees::execute(ctx),
        Commands::Check => commands::check::execute(ctx),
        Commands::Config | Commands::Completions(_) => Ok(()),
    }
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Show(_) => "show",
            Self::Assignee(_) => "assignee",
            Self::Status(_) => "status",
            Self::ByResolution => "by-resolution",
            Self::ByPriority => "by-priority",
            Self::Delayed => "delayed",
            Self::Owners => "owners",
            Self::Groups(groups) => {
                if groups.count {
                    "groups --count"
                } else {
                    "groups"
                }
            }
            Self::Locations => "locations",
            Self::Durations => "durations",
            Self::Employees => "employees",
            Self::Check => "check",
            Self::Config => "config",
            Self::Completions(_) => "completions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "itr",
            "delayed",
            "--json",
            "--reference-date",
            "2019-06-01",
            "--data-dir",
            "fixtures",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.reference_date.as_deref(), Some("2019-06-01"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("fixtures")));
        assert!(matches!(cli.command, Some(Commands::Delayed)));
    }

    #[test]
    fn test_parse_groups_count() {
        let cli = Cli::try_parse_from(["itr", "groups", "--count"]).unwrap();
        let command = cli.command.unwrap();
        assert_eq!(command.name(), "groups --count");
    }

    #[test]
    fn test_show_requires_id() {
        assert!(Cli::try_parse_from(["itr", "show"]).is_err());
    }
}
