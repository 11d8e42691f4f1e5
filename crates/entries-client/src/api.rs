use entries_dal::entry::{CreateEntry, Entry};
use reqwest::Response;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/entries";

/// Operations of the record service
#[allow(async_fn_in_trait)]
pub trait EntriesApi {
    async fn list(&self) -> Result<Vec<Entry>>;
    async fn create(&self, payload: &CreateEntry) -> Result<Entry>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct EntryList {
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct RecordClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl RecordClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        RecordClient { client, endpoint }
    }

    pub fn from_url(endpoint: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(endpoint)?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn delete_url(&self, id: i64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("id", &id.to_string());
        url
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    debug!(status = status.as_u16(), "Request rejected: {message}");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

impl EntriesApi for RecordClient {
    async fn list(&self) -> Result<Vec<Entry>> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let list: EntryList = check_status(response).await?.json().await?;
        Ok(list.entries)
    }

    async fn create(&self, payload: &CreateEntry) -> Result<Entry> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let entry = check_status(response).await?.json().await?;
        Ok(entry)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let response = self.client.delete(self.delete_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
