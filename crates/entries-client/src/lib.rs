//! Client side of demo entries: HTTP access to the record service and
//! a view model that keeps the last listed entries and the creation form.

pub mod api;
pub mod error;
pub mod view;

pub use api::{EntriesApi, RecordClient};
pub use error::{ClientError, Result};
pub use view::{EntriesView, FormState, Notice, NoticeKind, SubmitOutcome};
