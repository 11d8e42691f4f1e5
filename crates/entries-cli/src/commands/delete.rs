use clap::Parser;
use entries_client::{EntriesApi, EntriesView};

use crate::commands::{finish, Executor, ServiceConfig};

#[derive(Parser, Debug)]
pub struct DeleteCmd {
    #[command(flatten)]
    pub service: ServiceConfig,
    #[arg(long, help = "Id of the entry to delete")]
    pub id: i64,
}

pub async fn delete_entry<A: EntriesApi>(view: &EntriesView<A>, id: i64) -> anyhow::Result<()> {
    view.delete(id).await;
    finish(view)
}

impl Executor for DeleteCmd {
    async fn run(self) -> anyhow::Result<()> {
        let view = self.service.view();
        delete_entry(&view, self.id).await
    }
}
