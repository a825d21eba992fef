mod authentication;
pub mod http;
mod request;
mod search;
mod types;
mod url;

use std::sync::Arc;

use crate::api::http::HttpClient;

pub use request::{
    MovieRequest, MusicRequest, RequestApi, RequestCounts, TvRequest, TvRequestScope,
};
pub use search::{
    AlbumSearchResult, MovieSearchResult, RecentlyAddedEpisode, RecentlyAddedMovie, SearchApi,
    TvSearchResult,
};
pub use types::{ApiResult, AuthMethod, OmbiError, ResponseEnvelope};
pub use url::resolve_base_url;

/// Probes the `Status` endpoint to verify connectivity and auth.
#[derive(Debug)]
pub struct StatusApi {
    client: Arc<HttpClient>,
}

impl StatusApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Succeeds iff the server answered 2xx with a JSON body.
    pub async fn check(&self) -> ApiResult<()> {
        self.client.get_status("Status").await
    }
}
