//! STX Next intranet API client.
//!
//! - `error`: error types
//! - `http`: session client and transport
//! - `hours`: hour entry operations, added to `SessionClient` as methods
//!
//! The intranet does not return 401 for a missing or expired session. It
//! redirects to its login page, and since the transport never follows
//! redirects that shows up as `IntranetError::UnexpectedStatus(302)`.

pub mod error;
pub mod hours;
pub mod http;
