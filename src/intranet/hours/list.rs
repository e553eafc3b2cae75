//! Listing the hour entries of one day.

use chrono::NaiveDate;
use tracing::debug;

use super::{
    HOURS_PATH, decode,
    entry::{HourEntry, ListResponse, format_date},
    expect_status,
};
use crate::intranet::{
    error::Result,
    http::{Method, SessionClient, StatusCode},
};

impl SessionClient {
    /// Hour entries logged on `date`, in the order the intranet returns them.
    ///
    /// # Errors
    /// `UnexpectedStatus` for anything but 200 (302 when the session is not
    /// authenticated), `Serialization` if the body is not an hours listing,
    /// and transport errors from [`SessionClient::send`].
    pub async fn list_hour_entries(&self, date: NaiveDate) -> Result<Vec<HourEntry>> {
        let path = format!("{HOURS_PATH}?date={}", format_date(date));
        let response = self.send(Method::GET, &path, None).await?;
        expect_status(&response, &[StatusCode::OK])?;

        let listing: ListResponse = decode(&response)?;
        let entries: Vec<HourEntry> = listing
            .entries
            .into_iter()
            .map(|entry| entry.into_entry(date))
            .collect();

        debug!(%date, count = entries.len(), "listed hour entries");
        Ok(entries)
    }
}
