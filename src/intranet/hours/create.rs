//! Creating hour entries.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::{
    USER_TIMES_PATH, decode,
    entry::{HourEntry, MutationResponse},
    expect_status, serialize_date, serialize_ticket, validate_fields,
};
use crate::intranet::{
    error::Result,
    http::{Method, SessionClient, StatusCode},
};

/// A new hour entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHourEntry {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub description: String,
    pub project_id: u64,
    #[serde(serialize_with = "serialize_ticket")]
    pub ticket_id: Option<String>,
    /// Hours, fractions included.
    pub time: f64,
}

impl SessionClient {
    /// Logs a new hour entry and returns it as stored by the intranet.
    ///
    /// Not idempotent: each call creates a separate entry with a new id.
    ///
    /// # Errors
    /// `InvalidParams` for a blank description or a non-positive time, checked
    /// before anything is sent. `UnexpectedStatus` for anything but 201 or
    /// 200, `Serialization` for an unexpected body, and transport errors.
    pub async fn create_hour_entry(&self, input: &CreateHourEntry) -> Result<HourEntry> {
        validate_fields(&input.description, input.time)?;

        let body = serde_json::to_vec(input)?;
        let response = self
            .send(Method::POST, USER_TIMES_PATH, Some(body))
            .await?;
        // Older intranet releases answer 200 instead of 201.
        expect_status(&response, &[StatusCode::CREATED, StatusCode::OK])?;

        let created: MutationResponse = decode(&response)?;
        let entry = created.into_entry(input.project_id);

        info!(id = %entry.id, date = %entry.date, time = entry.time, "created hour entry");
        Ok(entry)
    }
}
