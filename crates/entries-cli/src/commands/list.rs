use clap::Parser;

use crate::commands::{finish, Executor, ServiceConfig};

#[derive(Parser, Debug)]
pub struct ListCmd {
    #[command(flatten)]
    pub service: ServiceConfig,
}

impl Executor for ListCmd {
    async fn run(self) -> anyhow::Result<()> {
        let view = self.service.view();
        view.mount().await;
        finish(&view)
    }
}
