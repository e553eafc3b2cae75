//! Updating hour entries.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::{
    USER_TIMES_PATH, decode,
    entry::{EntryId, HourEntry, MutationResponse},
    expect_status, serialize_date, serialize_ticket, validate_fields,
};
use crate::intranet::{
    error::Result,
    http::{Method, SessionClient, StatusCode},
};

/// Replacement fields for an existing hour entry. Every field is sent, so
/// the entry ends up exactly as described here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHourEntry {
    #[serde(rename = "timeEntryId")]
    pub id: EntryId,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub description: String,
    pub project_id: u64,
    #[serde(serialize_with = "serialize_ticket")]
    pub ticket_id: Option<String>,
    pub time: f64,
}

impl SessionClient {
    /// Overwrites the entry `input.id` and returns it as stored by the intranet.
    ///
    /// Moving an entry to another day is allowed; look it up on the new
    /// `date` afterwards.
    ///
    /// # Errors
    /// `InvalidParams` for a blank description or a non-positive time.
    /// `UnexpectedStatus` for anything but 200, `Serialization` for an
    /// unexpected body, and transport errors.
    pub async fn update_hour_entry(&self, input: &UpdateHourEntry) -> Result<HourEntry> {
        validate_fields(&input.description, input.time)?;

        let body = serde_json::to_vec(input)?;
        let response = self
            .send(Method::PUT, USER_TIMES_PATH, Some(body))
            .await?;
        expect_status(&response, &[StatusCode::OK])?;

        let updated: MutationResponse = decode(&response)?;
        let entry = updated.into_entry(input.project_id);

        info!(id = %entry.id, date = %entry.date, "updated hour entry");
        Ok(entry)
    }
}
