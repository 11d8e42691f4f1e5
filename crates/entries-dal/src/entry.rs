use crate::error::Result;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use time::OffsetDateTime;
use tracing::debug;

pub const MAX_TITLE_LENGTH: usize = 255;

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        Err(garde::Error::new("must not be blank"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEntry {
    #[garde(length(chars, min = 1, max = 255), custom(not_blank))]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateEntry {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub type EntryRepository = EntryRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct EntryRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> EntryRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateEntry) -> Result<Entry> {
        payload.validate()?;
        let entry = sqlx::query_as::<_, Entry>(
            "INSERT INTO demo_entries (title, description) VALUES (?, ?) \
             RETURNING id, title, description, created_at",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .fetch_one(&self.executor)
        .await?;

        debug!(id = entry.id, "Created entry");
        Ok(entry)
    }

    /// All entries, newest first.
    pub async fn list(&self) -> Result<Vec<Entry>> {
        let records = sqlx::query_as::<_, Entry>(
            "SELECT id, title, description, created_at FROM demo_entries \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.executor)
        .await?;
        Ok(records)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Entry>> {
        let record = sqlx::query_as::<_, Entry>(
            "SELECT id, title, description, created_at FROM demo_entries WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.executor)
        .await?;
        Ok(record)
    }

    /// Deletes entry if it exists, returns whether a row was removed.
    /// Deleting a missing entry is not an error.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM demo_entries WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        let removed = res.rows_affected() > 0;
        if !removed {
            debug!(id, "Entry to delete does not exist");
        }
        Ok(removed)
    }
}
