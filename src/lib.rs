//! Client library for the STX Next intranet hour entries API.
//!
//! The crate is organized into:
//!
//! - `intranet::http`: the session client that carries the session cookie
//! - `intranet::hours`: list, get, create, update and delete of hour entries
//! - `intranet::error`: error types
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use intranet_client::{CreateHourEntry, SessionClient};
//!
//! # async fn run() -> intranet_client::Result<()> {
//! let client = SessionClient::from_env()?;
//! let date = NaiveDate::from_ymd_opt(2022, 7, 1).expect("valid date");
//!
//! let created = client
//!     .create_hour_entry(&CreateHourEntry {
//!         date,
//!         description: "Working on feature A".to_string(),
//!         project_id: 123,
//!         ticket_id: Some("ABC123".to_string()),
//!         time: 0.5,
//!     })
//!     .await?;
//!
//! // The API has no single-entry endpoint: `get` lists the entries of the
//! // given day and scans them, so the date must be the entry's own date.
//! let entry = client.get_hour_entry(created.id, created.date).await?;
//! client.delete_hour_entry(entry.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod intranet;

pub use intranet::{
    error::{IntranetError, Result},
    hours::{CreateHourEntry, EntryId, HourEntry, Project, UpdateHourEntry},
    http::{
        DEFAULT_BASE_URL, RawResponse, SessionClient, SessionClientBuilder, BASE_URL_ENV_VAR,
        SESSION_ID_ENV_VAR,
    },
};
