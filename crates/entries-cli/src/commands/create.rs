use clap::Parser;
use entries_client::{EntriesApi, EntriesView};
use tracing::debug;

use crate::commands::{finish, Executor, ServiceConfig};

#[derive(Parser, Debug)]
pub struct CreateCmd {
    #[command(flatten)]
    pub service: ServiceConfig,
    #[arg(short, long, help = "Title of the entry, must not be blank")]
    pub title: String,
    #[arg(short, long, help = "Optional description of the entry")]
    pub description: Option<String>,
}

/// Successful submit re-lists entries, so view needs no initial load
pub async fn create_entry<A: EntriesApi>(
    view: &EntriesView<A>,
    title: String,
    description: Option<String>,
) -> anyhow::Result<()> {
    view.set_title(title);
    view.set_description(description.unwrap_or_default());
    let outcome = view.submit().await;
    debug!("Submit finished: {outcome:?}");
    finish(view)
}

impl Executor for CreateCmd {
    async fn run(self) -> anyhow::Result<()> {
        let view = self.service.view();
        create_entry(&view, self.title, self.description).await
    }
}
