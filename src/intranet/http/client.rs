//! Session client for the intranet API.
//!
//! This module provides:
//! - Environment-based configuration (base URL, session id)
//! - A shared HTTP client with a bounded timeout that never follows redirects
//! - Tracing spans for every request
//! - The `send` call every hour entry operation is built on

use std::{env, fmt, time::Duration};

use dotenv::dotenv;
use http::Extensions;
use reqwest::{
    Method, Request, Response, StatusCode, Url,
    header::{CONTENT_TYPE, COOKIE, HeaderValue},
    redirect,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Result as MiddlewareResult};
use reqwest_tracing::{
    ReqwestOtelSpanBackend, TracingMiddleware, default_on_request_end, reqwest_otel_span,
};
use tracing::{Span, debug, warn};

use crate::intranet::error::{IntranetError, Result};

pub const DEFAULT_BASE_URL: &str = "https://intranet.stxnext.pl/api";
pub const SESSION_ID_ENV_VAR: &str = "INTRANET_SESSION_ID";
pub const BASE_URL_ENV_VAR: &str = "INTRANET_BASE_URL";

const SESSION_COOKIE: &str = "beaker.session.id";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Span backend for the tracing middleware. Headers are left out of the span
// because the Cookie header carries the session id.
#[allow(dead_code)]
struct IntranetTracing;

impl ReqwestOtelSpanBackend for IntranetTracing {
    fn on_request_start(req: &Request, _extension: &mut Extensions) -> Span {
        reqwest_otel_span!(
            name = "intranet-api-request",
            req,
            request_body = req.body().and_then(|b| b.as_bytes()).map(String::from_utf8_lossy).as_deref(),
        )
    }

    fn on_request_end(
        span: &Span,
        outcome: &MiddlewareResult<Response>,
        _extension: &mut Extensions,
    ) {
        default_on_request_end(span, outcome);
    }
}

/// Status code and body of a response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Authenticated client for the intranet API.
///
/// Holds the base URL, the session cookie and a transport configured with a
/// timeout and redirects disabled. The intranet answers unauthenticated
/// requests with a redirect to its login page, so redirects are handed back
/// to the caller instead of being followed.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct SessionClient {
    base_url: String,
    cookie: HeaderValue,
    http: ClientWithMiddleware,
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.base_url)
            .field("cookie", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    #[must_use]
    pub fn builder() -> SessionClientBuilder {
        SessionClientBuilder::default()
    }

    /// Client for the production intranet with an explicit session id.
    ///
    /// # Errors
    /// `MissingConfig` if `session_id` is empty.
    pub fn new(session_id: impl Into<String>) -> Result<Self> {
        Self::builder().session_id(session_id).build()
    }

    /// Client configured from the environment.
    ///
    /// Loads a `.env` file if one exists, then reads `INTRANET_SESSION_ID`
    /// and the optional `INTRANET_BASE_URL` override.
    ///
    /// # Errors
    /// `MissingConfig` if `INTRANET_BASE_URL` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let mut builder = Self::builder();
        if let Ok(base_url) = env::var(BASE_URL_ENV_VAR) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request with the session cookie attached.
    ///
    /// `path` is appended to the base URL. Any status code, redirects
    /// included, is returned as a `RawResponse`; only transport failures
    /// (connect, DNS, timeout, body read) are errors. Nothing is retried.
    ///
    /// # Errors
    /// `Http` or `HttpMiddleware` when the round trip does not complete.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "sending intranet request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(COOKIE, self.cookie.clone());

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!(%method, %url, %status, bytes = body.len(), "received intranet response");
        Ok(RawResponse { status, body })
    }
}

/// Builder for [`SessionClient`].
#[derive(Default)]
pub struct SessionClientBuilder {
    base_url: Option<String>,
    session_id: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for SessionClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClientBuilder")
            .field("base_url", &self.base_url)
            .field("session_id", &self.session_id.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SessionClientBuilder {
    /// Overrides the API root. Defaults to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the session id explicitly instead of reading `INTRANET_SESSION_ID`.
    #[must_use]
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Overrides the request timeout. Defaults to 10 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// Without an explicit session id the value of `INTRANET_SESSION_ID` is
    /// read once, here. If that is missing too the client is still built, and
    /// every request will come back as a redirect to the login page.
    ///
    /// # Errors
    /// `MissingConfig` if an explicit session id is empty or the base URL
    /// cannot be parsed. `Http` if the transport cannot be initialized.
    pub fn build(self) -> Result<SessionClient> {
        let session_id = match self.session_id {
            Some(explicit) if explicit.trim().is_empty() => {
                return Err(IntranetError::MissingConfig(
                    "session id cannot be empty".to_string(),
                ));
            }
            Some(explicit) => explicit,
            None => env::var(SESSION_ID_ENV_VAR).unwrap_or_default(),
        };

        if session_id.is_empty() {
            warn!(
                "{SESSION_ID_ENV_VAR} is not set; intranet requests will be redirected to the login page"
            );
        }

        let mut cookie = HeaderValue::from_str(&format!("{SESSION_COOKIE}={session_id}"))
            .map_err(|e| IntranetError::MissingConfig(format!("invalid session id: {e}")))?;
        cookie.set_sensitive(true);

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Url::parse(&base_url)
            .map_err(|e| IntranetError::MissingConfig(format!("invalid base URL {base_url}: {e}")))?;

        let transport = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .redirect(redirect::Policy::none())
            .build()?;

        let http = ClientBuilder::new(transport)
            .with(TracingMiddleware::<IntranetTracing>::new())
            .build();

        Ok(SessionClient {
            base_url,
            cookie,
            http,
        })
    }
}
