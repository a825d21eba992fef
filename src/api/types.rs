use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Unified error type for every failure an Ombi call can produce.
///
/// Transport, HTTP and application-level failures all collapse into this
/// one taxonomy so callers can branch on the kind without caring where in
/// the pipeline the failure happened.
#[derive(Debug, Error)]
pub enum OmbiError {
    /// Malformed connection configuration, or a urlbase misconfiguration
    /// detected when an expected-JSON response fails to parse (the server
    /// returned an HTML error page instead).
    #[error("Configuration error: {0}")]
    Config(String),

    /// No usable authentication method was supplied.
    #[error("Authentication configuration error: {0}")]
    AuthConfig(String),

    /// The server rejected the credentials (401/403), or a token exchange
    /// completed without yielding a token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out. Check port configuration.")]
    Timeout,

    /// DNS resolution or TCP connect failure.
    #[error("Connection error. Check host configuration.")]
    Connection,

    /// The server redirected more times than the transport allows.
    #[error("Too many redirects.")]
    Redirect,

    /// Any other non-2xx HTTP status.
    #[error("HTTP error {0}. Check SSL configuration.")]
    Http(StatusCode),

    /// HTTP 200, but the response envelope declared `isError: true`.
    #[error("Server reported an error: {0}")]
    Application(String),
}

impl OmbiError {
    /// Classify a non-2xx status. Every dispatch path uses this, including
    /// the token exchange.
    pub(crate) fn from_status(status: StatusCode) -> OmbiError {
        match status {
            StatusCode::UNAUTHORIZED => {
                OmbiError::Auth("Unauthorized. Check authentication credentials.".to_string())
            }
            StatusCode::FORBIDDEN => {
                OmbiError::Auth("Forbidden URL. Check user roles.".to_string())
            }
            other => OmbiError::Http(other),
        }
    }
}

impl From<reqwest::Error> for OmbiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OmbiError::Timeout
        } else if err.is_connect() {
            OmbiError::Connection
        } else if err.is_redirect() {
            OmbiError::Redirect
        } else if let Some(status) = err.status() {
            OmbiError::Http(status)
        } else {
            OmbiError::Config(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, OmbiError>;

/// Resolved authentication material attached to outgoing requests.
///
/// Selected once when the client is built (API key) or on the first
/// authenticated call (bearer token) and never re-derived afterwards.
#[derive(Debug, Clone)]
pub enum Credential {
    ApiKey(String),
    Bearer(String),
}

/// How the client authenticates against the server.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    ApiKey(String),
    Credentials { username: String, password: String },
}

/// Application-level result envelope Ombi wraps around mutating endpoints.
///
/// The server answers HTTP 200 even for rejected requests and signals the
/// failure inside the body instead.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "isError", default)]
    pub is_error: bool,

    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,

    #[serde(rename = "requestId", default)]
    pub request_id: Option<i32>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Turn the envelope into a hard error when the server flagged one.
    pub fn into_result(self) -> ApiResult<ResponseEnvelope> {
        if self.is_error {
            Err(OmbiError::Application(
                self.error_message.unwrap_or_else(|| "unknown server error".to_string()),
            ))
        } else {
            Ok(self)
        }
    }
}
