use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::api::authentication::exchange_token;
use crate::api::types::{ApiResult, AuthMethod, Credential, OmbiError};

/// Parse a response body that must be JSON.
///
/// A body that fails to parse here is almost always an HTML error page
/// caused by a urlbase misconfiguration, so it maps to `Config`.
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|_| {
        OmbiError::Config("response was not valid JSON. Check urlbase configuration.".into())
    })
}

/// The single chokepoint every outbound call passes through.
///
/// Owns the resolved base URL, the authentication method and the memoized
/// credential. All public operations reduce to one of the typed helpers
/// below; none of them retry, and none of them return a non-2xx response.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth: AuthMethod,
    username: Option<String>,
    credential: OnceCell<Credential>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        auth: AuthMethod,
        username: Option<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| OmbiError::Config(err.to_string()))?;

        Ok(Self { client, base_url, auth, username, credential: OnceCell::new() })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Resolve the credential, performing the one-time token exchange on
    /// first use in credentials mode. Concurrent callers share the result.
    ///
    /// The exchange talks to the transport client directly rather than
    /// coming back through [`Self::execute`], which would make credential
    /// resolution recursive.
    async fn credential(&self) -> ApiResult<&Credential> {
        self.credential
            .get_or_try_init(|| async {
                match &self.auth {
                    AuthMethod::ApiKey(key) => Ok(Credential::ApiKey(key.clone())),
                    AuthMethod::Credentials { username, password } => {
                        exchange_token(&self.client, &self.base_url, username, password).await
                    }
                }
            })
            .await
    }

    async fn build_headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        match self.credential().await? {
            Credential::ApiKey(key) => {
                headers.insert(
                    "ApiKey",
                    HeaderValue::from_str(key).map_err(|_| {
                        OmbiError::AuthConfig("API key is not a valid header value".into())
                    })?,
                );
            }
            Credential::Bearer(token) => {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                        OmbiError::AuthConfig("token is not a valid header value".into())
                    })?,
                );
            }
        }

        // Ombi expects the acting user's name even under ApiKey auth.
        if let Some(username) = &self.username {
            headers.insert(
                "UserName",
                HeaderValue::from_str(username).map_err(|_| {
                    OmbiError::AuthConfig("username is not a valid header value".into())
                })?,
            );
        }

        Ok(headers)
    }

    /// Dispatch one authenticated request and classify the outcome.
    ///
    /// Returns only 2xx responses; everything else becomes an [`OmbiError`].
    async fn execute<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> ApiResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(endpoint);
        let headers = self.build_headers().await?;

        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%url, %status, "received response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(OmbiError::from_status(status))
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let response = self.execute::<()>(Method::GET, endpoint, None).await?;
        parse_json(response).await
    }

    /// GET an endpoint whose body is plain text, not JSON.
    pub async fn get_text(&self, endpoint: &str) -> ApiResult<String> {
        let response = self.execute::<()>(Method::GET, endpoint, None).await?;
        Ok(response.text().await?)
    }

    /// GET where success is all that matters; the JSON body is still parsed
    /// so a urlbase misconfiguration surfaces instead of passing silently.
    pub async fn get_status(&self, endpoint: &str) -> ApiResult<()> {
        let response = self.execute::<()>(Method::GET, endpoint, None).await?;
        parse_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self.execute(Method::POST, endpoint, Some(body)).await?;
        parse_json(response).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self.execute(Method::PUT, endpoint, Some(body)).await?;
        parse_json(response).await
    }
}
