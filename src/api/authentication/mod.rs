use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::http::parse_json;
use crate::api::types::{ApiResult, Credential, OmbiError};

#[derive(Serialize)]
struct TokenRequest<'a> {
    #[serde(rename = "userName")]
    user_name: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchange a username/password pair for a bearer token.
///
/// Issues the one unauthenticated POST straight on the transport client;
/// credential resolution must never come back through the gateway's own
/// dispatch path. Runs at most once per client; the gateway memoizes the
/// returned credential.
pub(crate) async fn exchange_token(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> ApiResult<Credential> {
    let url = format!("{}Token", base_url);
    debug!(%url, "exchanging credentials for bearer token");

    let response = client
        .post(&url)
        .header("UserName", username)
        .json(&TokenRequest { user_name: username, password })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(OmbiError::from_status(status));
    }

    let token: TokenResponse = parse_json(response).await?;
    match token.access_token {
        Some(token) if !token.is_empty() => Ok(Credential::Bearer(token)),
        _ => Err(OmbiError::Auth(
            "token exchange succeeded but returned no access token".to_string(),
        )),
    }
}
