//! Error types for the intranet client.
//!
//! `IntranetError` covers every way an operation can fail:
//! - configuration and input validation problems caught before any request
//! - transport failures from `reqwest` and the middleware stack
//! - bodies that do not match the expected JSON shape
//! - status codes outside the operation's success set
//! - entries missing from the day they were looked up on

use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;

use crate::intranet::hours::EntryId;

pub type Result<T> = std::result::Result<T, IntranetError>;

#[derive(Error, Debug)]
pub enum IntranetError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Client configuration that is missing or unusable: an explicitly empty
    /// session id, a session id that cannot go into a cookie header, or a base
    /// URL that does not parse.
    #[error("Missing or invalid configuration: {0}")]
    MissingConfig(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The intranet answered with a status outside the operation's success set.
    /// Unauthenticated sessions show up here as a redirect to the login page.
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),

    #[error("hour entry {id} not found on {date}")]
    EntryNotFound { id: EntryId, date: NaiveDate },
}

impl IntranetError {
    /// True when the intranet redirected the request, which is how it rejects
    /// a missing or expired session.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::UnexpectedStatus(code)
            if StatusCode::from_u16(*code).is_ok_and(|status| status.is_redirection()))
    }

    /// True for transport level failures (connect, DNS, timeout).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpMiddleware(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_names_the_code() {
        let err = IntranetError::UnexpectedStatus(302);
        assert_eq!(err.to_string(), "unexpected response status: 302");
    }

    #[test]
    fn redirects_count_as_unauthenticated() {
        assert!(IntranetError::UnexpectedStatus(302).is_unauthenticated());
        assert!(IntranetError::UnexpectedStatus(303).is_unauthenticated());
        assert!(!IntranetError::UnexpectedStatus(500).is_unauthenticated());
        assert!(!IntranetError::InvalidParams("x".to_string()).is_unauthenticated());
    }

    #[test]
    fn not_found_mentions_id_and_date() {
        let err = IntranetError::EntryNotFound {
            id: EntryId::new(2_177_998),
            date: NaiveDate::from_ymd_opt(2022, 7, 2).unwrap(),
        };
        assert_eq!(err.to_string(), "hour entry 2177998 not found on 2022-07-02");
    }
}
