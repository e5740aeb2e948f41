mod cli;
mod client;
mod commands;
mod config;
mod editor;
mod error;
mod logging;
mod output;
mod queries;
mod responses;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{
    Cli, Commands, CycleCommands, IssueCommands, LabelCommands, OutputFormat, ProjectCommands,
    TeamCommands, UserCommands,
};
use client::LinearClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Lists default to a table, single lookups to the detail view.
    let list_format = cli.output_format(OutputFormat::Table);
    let one_format = cli.output_format(OutputFormat::Detail);

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "linear", &mut io::stdout());
        }
        Commands::Init => commands::init::run()?,
        command => {
            let config = Config::load()?;
            let client = LinearClient::new(config.api_key(cli.api_key.as_deref())?)?;

            match command {
                Commands::Issues { action } => match action {
                    IssueCommands::List(args) => {
                        commands::issues::list(&client, &config, args, list_format).await?;
                    }
                    IssueCommands::Search(args) => {
                        commands::issues::search(&client, args, list_format).await?;
                    }
                    IssueCommands::Get { id } => {
                        commands::issues::get(&client, &id, one_format).await?;
                    }
                    IssueCommands::Edit { id } => {
                        commands::issues::edit(&client, &config, &id).await?;
                    }
                },
                Commands::Projects { action } => match action {
                    ProjectCommands::List(args) => {
                        commands::projects::list(&client, &config, args, list_format).await?;
                    }
                    ProjectCommands::Get { id } => {
                        commands::projects::get(&client, &id, one_format).await?;
                    }
                },
                Commands::Teams { action } => match action {
                    TeamCommands::List(page) => {
                        commands::teams::list(&client, page, list_format).await?;
                    }
                    TeamCommands::Get { id } => {
                        commands::teams::get(&client, &id, one_format).await?;
                    }
                },
                Commands::Cycles { action } => match action {
                    CycleCommands::List(args) => {
                        commands::cycles::list(&client, &config, args, list_format).await?;
                    }
                    CycleCommands::Get { id } => {
                        commands::cycles::get(&client, &id, one_format).await?;
                    }
                },
                Commands::Users { action } => match action {
                    UserCommands::List(args) => {
                        commands::users::list(&client, args, list_format).await?;
                    }
                    UserCommands::Get { id } => {
                        commands::users::get(&client, &id, one_format).await?;
                    }
                },
                Commands::Labels { action } => match action {
                    LabelCommands::List(args) => {
                        commands::labels::list(&client, &config, args, list_format).await?;
                    }
                },
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
