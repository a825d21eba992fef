use std::sync::Arc;
use std::time::Duration;

use crate::api::http::HttpClient;
use crate::api::{
    resolve_base_url, ApiResult, AuthMethod, OmbiError, RequestApi, SearchApi, StatusApi,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for an Ombi server.
///
/// Authentication needs either `api_key` or both `username` and `password`.
/// When both are present the API key wins; the username is still sent as the
/// `UserName` header so requests are attributed to that user.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Use `https` instead of `http`. The host must not embed a scheme.
    pub use_https: bool,

    pub host: String,

    /// Appended as `:port` when present.
    pub port: Option<u16>,

    /// Path prefix for servers mounted under a sub-path (Ombi's "Base URL"
    /// setting), e.g. `"ombi"` for `https://host/ombi/api/v1/`.
    pub url_base: String,

    pub api_key: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Bounds every request. Finite; defaults to 10 seconds.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            use_https: false,
            host: host.into(),
            port: None,
            url_base: String::new(),
            api_key: None,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn auth_method(&self) -> ApiResult<AuthMethod> {
        if let Some(api_key) = &self.api_key {
            return Ok(AuthMethod::ApiKey(api_key.clone()));
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(AuthMethod::Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => Err(OmbiError::AuthConfig(
                "supply an api_key or both username and password".to_string(),
            )),
        }
    }
}

/// Handle to one Ombi server.
///
/// Cheap to share: every API group holds the same gateway behind an `Arc`,
/// and nothing mutates after construction except the one-time credential
/// memoization inside the gateway.
#[derive(Debug)]
pub struct OmbiClient {
    pub search: SearchApi,
    pub request: RequestApi,
    pub status: StatusApi,
    base_url: String,
}

impl OmbiClient {
    /// Validate the config, resolve the base URL and wire up the API groups.
    ///
    /// Fails before any network traffic when the config names no usable
    /// authentication method or the host embeds a scheme.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let auth = config.auth_method()?;
        let base_url =
            resolve_base_url(config.use_https, &config.host, config.port, &config.url_base)?;

        let client = Arc::new(HttpClient::new(
            base_url.clone(),
            auth,
            config.username.clone(),
            config.timeout,
        )?);

        Ok(Self {
            search: SearchApi::new(Arc::clone(&client)),
            request: RequestApi::new(Arc::clone(&client)),
            status: StatusApi::new(client),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the server's `Status` endpoint; success means the connection,
    /// urlbase and credentials all line up.
    pub async fn test_connection(&self) -> ApiResult<()> {
        self.status.check().await
    }
}
