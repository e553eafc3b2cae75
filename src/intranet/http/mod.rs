//! HTTP layer for the intranet API.
//!
//! Owns the session cookie and the transport. Knows nothing about hour
//! entries; status codes and bodies are returned uninterpreted.

mod client;

pub use client::{
    BASE_URL_ENV_VAR, DEFAULT_BASE_URL, RawResponse, SESSION_ID_ENV_VAR, SessionClient,
    SessionClientBuilder,
};

// Re-export types used in our public API
pub use reqwest::{Method, StatusCode};
