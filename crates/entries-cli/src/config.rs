use clap::{Parser, Subcommand};

use crate::commands::{create::CreateCmd, delete::DeleteCmd, list::ListCmd};

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "CLI for demo entries - lists, creates and deletes entries through the record service."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all entries, newest first
    List(ListCmd),
    /// Create new entry and list all entries
    Create(CreateCmd),
    /// Delete entry by id and list remaining entries
    Delete(DeleteCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::List(cmd) => cmd.run().await,
            Command::Create(cmd) => cmd.run().await,
            Command::Delete(cmd) => cmd.run().await,
        }
    }
}
