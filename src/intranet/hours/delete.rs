//! Deleting hour entries.

use serde_json::json;
use tracing::info;

use super::{USER_TIMES_PATH, entry::EntryId, expect_status};
use crate::intranet::{
    error::Result,
    http::{Method, SessionClient, StatusCode},
};

impl SessionClient {
    /// Removes the entry `id`.
    ///
    /// # Errors
    /// `UnexpectedStatus` for anything but 204 or 200, and transport errors.
    pub async fn delete_hour_entry(&self, id: EntryId) -> Result<()> {
        let body = serde_json::to_vec(&json!({ "id": id }))?;
        let response = self
            .send(Method::DELETE, USER_TIMES_PATH, Some(body))
            .await?;
        // Older intranet releases answer 200 instead of 204.
        expect_status(&response, &[StatusCode::NO_CONTENT, StatusCode::OK])?;

        info!(%id, "deleted hour entry");
        Ok(())
    }
}
