use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    BudgetCommands, ClientsArgs, DraftCommands, EmployeeCommands, GeneralCommands, TeamCommands,
    WbsCommands, WizardCommands,
};

/// Guided drafting of project records
///
/// A draft moves through four steps (general information, work breakdown,
/// team, budget) and is submitted at the end. Every command loads the draft
/// from the database, applies one change and saves it again, so a session can
/// be picked up at any time.
#[derive(Parser)]
#[command(version, about, name = "charter")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/charter/charter.db
    #[arg(long, global = true, env = "CHARTER_DATABASE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Re-check every step's gate on submit, not only the active one
    #[arg(long, global = true)]
    pub strict_submit: bool,

    /// Register an additional currency, e.g. SEK="Swedish Krona". Repeatable.
    #[arg(long = "extra-currency", global = true, value_name = "CODE=NAME", value_parser = parse_currency)]
    pub extra_currencies: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command, drafts are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Create, list, inspect and export drafts
    #[command(alias = "d")]
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Edit general information (step 1)
    #[command(alias = "g")]
    General {
        #[command(subcommand)]
        command: GeneralCommands,
    },
    /// Edit the work breakdown structure (step 2)
    #[command(alias = "w")]
    Wbs {
        #[command(subcommand)]
        command: WbsCommands,
    },
    /// Edit the team roster (step 3)
    #[command(alias = "t")]
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },
    /// Edit budget lines (step 4)
    #[command(alias = "b")]
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },
    /// Navigate between steps, save and submit
    #[command(alias = "z")]
    Wizard {
        #[command(subcommand)]
        command: WizardCommands,
    },
    /// List clients from the directory
    Clients(ClientsArgs),
    /// List supported currencies
    Currencies,
    /// Maintain the employee directory
    Employees {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
}

fn parse_currency(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((code, name)) if !code.trim().is_empty() && !name.trim().is_empty() => {
            Ok((code.trim().to_string(), name.trim().to_string()))
        }
        _ => Err(format!("expected CODE=NAME, got '{value}'")),
    }
}
