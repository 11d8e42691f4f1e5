use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use entries_dal::entry::{CreateEntry, Entry};
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::api::EntriesApi;

/// State of the creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Entry),
    /// Blank title, nothing was sent
    Rejected,
    /// Previous submission still in flight
    Busy,
    Failed,
}

#[derive(Debug, Default)]
struct ViewState {
    entries: Vec<Entry>,
    title: String,
    description: String,
    form: FormState,
    notices: Vec<Notice>,
}

/// Keeps only what the last successful list returned plus form inputs.
/// Every successful mutation is followed by a full re-list.
///
/// Actions take `&self`, so several of them can be in flight at once.
/// The lock is never held across an await.
pub struct EntriesView<A> {
    api: A,
    state: Mutex<ViewState>,
}

impl<A: EntriesApi> EntriesView<A> {
    pub fn new(api: A) -> Self {
        EntriesView {
            api,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, kind: NoticeKind, message: String) {
        if kind == NoticeKind::Error {
            warn!("{message}");
        }
        self.state().notices.push(Notice { kind, message });
    }

    pub async fn mount(&self) -> bool {
        self.refresh().await
    }

    async fn refresh(&self) -> bool {
        match self.api.list().await {
            Ok(entries) => {
                debug!("Loaded {} entries", entries.len());
                self.state().entries = entries;
                true
            }
            Err(e) => {
                self.notify(NoticeKind::Error, format!("Failed to load entries: {e}"));
                false
            }
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state().title = title.into();
    }

    /// Empty description is sent as absent
    pub fn set_description(&self, description: impl Into<String>) {
        self.state().description = description.into();
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.state();
            if state.form == FormState::Submitting {
                return SubmitOutcome::Busy;
            }
            if state.title.trim().is_empty() {
                state.notices.push(Notice {
                    kind: NoticeKind::Error,
                    message: "Title is required".to_string(),
                });
                return SubmitOutcome::Rejected;
            }
            state.form = FormState::Submitting;
            let description = Some(state.description.clone()).filter(|d| !d.is_empty());
            CreateEntry::new(state.title.clone(), description)
        };

        let outcome = match self.api.create(&payload).await {
            Ok(entry) => {
                {
                    let mut state = self.state();
                    state.title.clear();
                    state.description.clear();
                }
                self.notify(NoticeKind::Success, "Entry created".to_string());
                self.refresh().await;
                SubmitOutcome::Created(entry)
            }
            Err(e) => {
                self.notify(NoticeKind::Error, format!("Failed to create entry: {e}"));
                SubmitOutcome::Failed
            }
        };

        self.state().form = FormState::Idle;
        outcome
    }

    /// Row is removed from view only by re-listing after successful delete
    pub async fn delete(&self, id: i64) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.notify(NoticeKind::Success, format!("Entry {id} deleted"));
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notify(
                    NoticeKind::Error,
                    format!("Failed to delete entry {id}: {e}"),
                );
                false
            }
        }
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.state().entries.clone()
    }

    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    pub fn description(&self) -> String {
        self.state().description.clone()
    }

    pub fn form_state(&self) -> FormState {
        self.state().form
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state().notices)
    }

    pub fn render(&self) -> String {
        let state = self.state();
        let mut out = String::new();
        let badge = match state.entries.len() {
            0 => "no entries".to_string(),
            1 => "1 entry".to_string(),
            n => format!("{n} entries"),
        };
        let _ = writeln!(out, "Entries [{badge}]");
        for entry in &state.entries {
            let created = entry
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| entry.created_at.to_string());
            let _ = writeln!(out, "#{:<5} {}  {}", entry.id, created, entry.title);
            if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = writeln!(out, "       {description}");
            }
        }
        out
    }
}
