pub mod create;
pub mod delete;
pub mod list;

use clap::Args;
use entries_client::{api::DEFAULT_ENDPOINT, EntriesApi, EntriesView, RecordClient};
use url::Url;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

#[derive(Args, Debug)]
pub struct ServiceConfig {
    #[arg(
        long,
        env = "ENTRIES_API_URL",
        default_value = DEFAULT_ENDPOINT,
        help = "URL of entries endpoint of the record service"
    )]
    pub url: Url,
}

impl ServiceConfig {
    pub fn view(&self) -> EntriesView<RecordClient> {
        EntriesView::new(RecordClient::new(self.url.clone()))
    }
}

/// Prints the view and its notices, fails if any notice is an error
pub fn finish<A: EntriesApi>(view: &EntriesView<A>) -> anyhow::Result<()> {
    let notices = view.take_notices();
    for notice in &notices {
        eprintln!("{}", notice.message);
    }
    print!("{}", view.render());

    let failures = notices.iter().filter(|n| n.is_error()).count();
    if failures > 0 {
        anyhow::bail!("{failures} operation(s) failed");
    }
    Ok(())
}
