//! Charter CLI
//!
//! Command-line front end for the project drafting wizard.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use charter_core::{DraftFilter, GatewayBuilder, SubmitPolicy};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        strict_submit,
        extra_currencies,
        command,
    } = Args::parse();

    let gateway = extra_currencies
        .into_iter()
        .fold(
            GatewayBuilder::new().with_database_path(database_file),
            |builder, (code, name)| builder.with_currency(code, name),
        )
        .build()
        .await
        .context("Failed to open the draft database")?;
    info!("Using database {}", gateway.database_path().display());

    let policy = if strict_submit {
        SubmitPolicy::AllSteps
    } else {
        SubmitPolicy::ActiveStep
    };
    let cli = Cli::new(gateway, TerminalRenderer::new(!no_color), policy);

    match command {
        Some(Draft { command }) => cli.handle_draft_command(command).await,
        Some(General { command }) => cli.handle_general_command(command).await,
        Some(Wbs { command }) => cli.handle_wbs_command(command).await,
        Some(Team { command }) => cli.handle_team_command(command).await,
        Some(Budget { command }) => cli.handle_budget_command(command).await,
        Some(Wizard { command }) => cli.handle_wizard_command(command).await,
        Some(Clients(args)) => cli.handle_clients(args).await,
        Some(Currencies) => cli.list_currencies().await,
        Some(Employees { command }) => cli.handle_employee_command(command).await,
        None => cli.list_drafts(&DraftFilter::default()).await,
    }
}
