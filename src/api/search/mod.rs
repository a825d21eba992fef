use std::sync::Arc;

use serde::Deserialize;

use crate::api::{http::HttpClient, types::ApiResult};

/// A movie as returned by `Search/movie/{query}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSearchResult {
    /// TheMovieDb identifier, used when submitting a request.
    pub id: i32,

    pub title: String,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(rename = "posterPath", default)]
    pub poster_path: Option<String>,

    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub available: bool,

    #[serde(default)]
    pub requested: bool,
}

/// A TV show as returned by `Search/tv/{query}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TvSearchResult {
    /// TheTvDb identifier, used when submitting a request.
    pub id: i32,

    pub title: String,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub available: bool,

    #[serde(default)]
    pub requested: bool,
}

/// An album as returned by `Search/music/album/{query}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumSearchResult {
    /// MusicBrainz release group identifier, used when submitting a request.
    #[serde(rename = "foreignAlbumId")]
    pub foreign_album_id: String,

    pub title: String,

    #[serde(rename = "artistName", default)]
    pub artist_name: Option<String>,

    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub available: bool,
}

/// A movie recently added to the linked media server.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentlyAddedMovie {
    pub id: i32,

    pub title: String,

    #[serde(rename = "addedAt", default)]
    pub added_at: Option<String>,

    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
}

/// An episode recently added to the linked media server.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentlyAddedEpisode {
    pub id: i32,

    pub title: String,

    #[serde(rename = "seasonNumber", default)]
    pub season_number: Option<i32>,

    #[serde(rename = "episodeNumber", default)]
    pub episode_number: Option<i32>,

    #[serde(rename = "addedAt", default)]
    pub added_at: Option<String>,
}

/// Search operations across the media types Ombi indexes.
#[derive(Debug)]
pub struct SearchApi {
    client: Arc<HttpClient>,
}

impl SearchApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn movie(&self, query: &str) -> ApiResult<Vec<MovieSearchResult>> {
        self.client.get(&format!("Search/movie/{}", query)).await
    }

    pub async fn tv(&self, query: &str) -> ApiResult<Vec<TvSearchResult>> {
        self.client.get(&format!("Search/tv/{}", query)).await
    }

    pub async fn music_album(&self, query: &str) -> ApiResult<Vec<AlbumSearchResult>> {
        self.client.get(&format!("Search/music/album/{}", query)).await
    }

    pub async fn recently_added_movies(&self) -> ApiResult<Vec<RecentlyAddedMovie>> {
        self.client.get("RecentlyAdded/movies").await
    }

    pub async fn recently_added_tv(&self) -> ApiResult<Vec<RecentlyAddedEpisode>> {
        self.client.get("RecentlyAdded/tv").await
    }
}
