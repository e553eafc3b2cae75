//! Looking up a single hour entry.
//!
//! The intranet has no endpoint for one entry, so the lookup lists the
//! entries of the given day and scans them for the id. An entry logged on a
//! different day is reported as not found.

use chrono::NaiveDate;

use super::entry::{EntryId, HourEntry};
use crate::intranet::{
    error::{IntranetError, Result},
    http::SessionClient,
};

impl SessionClient {
    /// The entry with `id`, searched among the entries logged on `date`.
    ///
    /// `date` must be the day the entry is logged on. With any other date
    /// this returns `EntryNotFound`, even though the entry exists.
    ///
    /// # Errors
    /// `EntryNotFound` if no entry of that day has `id`, otherwise the errors
    /// of [`SessionClient::list_hour_entries`].
    pub async fn get_hour_entry(&self, id: EntryId, date: NaiveDate) -> Result<HourEntry> {
        self.list_hour_entries(date)
            .await?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or(IntranetError::EntryNotFound { id, date })
    }
}
