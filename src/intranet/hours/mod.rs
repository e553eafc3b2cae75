//! Hour entry operations.
//!
//! Each module adds one operation to [`SessionClient`]:
//! - `list`: entries logged on a given day
//! - `get`: one entry, found by listing its day
//! - `create`, `update`, `delete`: writes against `/intranet4/user_times`
//!
//! All of them return entries as [`HourEntry`], whatever shape the endpoint
//! answered with.
//!
//! [`SessionClient`]: crate::intranet::http::SessionClient

mod create;
mod delete;
mod entry;
mod get;
mod list;
mod update;

use serde::{Serialize, Serializer, de::DeserializeOwned};

use crate::intranet::{
    error::{IntranetError, Result},
    http::{RawResponse, StatusCode},
};

pub use entry::{EntryId, HourEntry, Project};
pub use create::CreateHourEntry;
pub use update::UpdateHourEntry;

const HOURS_PATH: &str = "/intranet4/hours";
const USER_TIMES_PATH: &str = "/intranet4/user_times";

/// Fails with `UnexpectedStatus` unless the response status is one of `accepted`.
fn expect_status(response: &RawResponse, accepted: &[StatusCode]) -> Result<()> {
    if accepted.contains(&response.status) {
        Ok(())
    } else {
        Err(IntranetError::UnexpectedStatus(response.status.as_u16()))
    }
}

fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

fn validate_fields(description: &str, time: f64) -> Result<()> {
    if description.trim().is_empty() {
        return Err(IntranetError::InvalidParams(
            "description cannot be empty.".to_string(),
        ));
    }
    if !time.is_finite() || time <= 0.0 {
        return Err(IntranetError::InvalidParams(format!(
            "time must be a positive number of hours, got {time}."
        )));
    }
    Ok(())
}

// The write endpoints expect an empty string rather than null for "no ticket".
#[allow(clippy::ref_option)]
fn serialize_ticket<S: Serializer>(
    ticket: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    ticket.as_deref().unwrap_or_default().serialize(serializer)
}

fn serialize_date<S: Serializer>(
    date: &chrono::NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&entry::format_date(*date))
}
