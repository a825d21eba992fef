use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::{
    http::HttpClient,
    types::{ApiResult, ResponseEnvelope},
};

/// The three request kinds Ombi manages, as they appear in paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    Movie,
    Tv,
    Music,
}

impl MediaKind {
    fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Music => "music",
        }
    }
}

/// Which part of a show a TV request should cover.
///
/// The season/episode pair passed to [`RequestApi::tv`] is always sent; these
/// flags widen the request to a whole-show scope on top of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TvRequestScope {
    /// Request every season.
    pub request_all: bool,

    /// Request only the latest season.
    pub request_latest: bool,

    /// Request only the first season.
    pub request_first: bool,
}

/// A movie request as returned by `Request/movie`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRequest {
    pub id: i32,

    #[serde(rename = "theMovieDbId")]
    pub the_movie_db_id: i32,

    pub title: String,

    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub available: bool,

    #[serde(default)]
    pub denied: Option<bool>,

    #[serde(rename = "requestedDate", default)]
    pub requested_date: Option<String>,
}

/// A TV show request as returned by `Request/tv`.
#[derive(Debug, Clone, Deserialize)]
pub struct TvRequest {
    pub id: i32,

    #[serde(rename = "tvDbId", default)]
    pub tv_db_id: Option<i32>,

    pub title: String,

    #[serde(rename = "totalSeasons", default)]
    pub total_seasons: Option<i32>,

    #[serde(default)]
    pub status: Option<String>,
}

/// An album request as returned by `Request/music`.
#[derive(Debug, Clone, Deserialize)]
pub struct MusicRequest {
    pub id: i32,

    #[serde(rename = "foreignAlbumId")]
    pub foreign_album_id: String,

    pub title: String,

    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub available: bool,

    #[serde(rename = "requestedDate", default)]
    pub requested_date: Option<String>,
}

/// Aggregate counters from `Request/count`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RequestCounts {
    #[serde(default)]
    pub pending: i64,

    #[serde(default)]
    pub approved: i64,

    #[serde(default)]
    pub available: i64,
}

/// Request submission, moderation and inspection.
#[derive(Debug)]
pub struct RequestApi {
    client: Arc<HttpClient>,
}

impl RequestApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Request a movie by its TheMovieDb identifier.
    pub async fn movie(&self, the_movie_db_id: i32) -> ApiResult<ResponseEnvelope> {
        #[derive(Serialize)]
        struct MovieRequestBody {
            #[serde(rename = "theMovieDbId")]
            the_movie_db_id: i32,
            #[serde(rename = "languageCode")]
            language_code: &'static str,
        }

        let envelope: ResponseEnvelope = self
            .client
            .post("Request/movie", &MovieRequestBody { the_movie_db_id, language_code: "en" })
            .await?;
        envelope.into_result()
    }

    /// Request a show (or part of one) by its TheTvDb identifier.
    pub async fn tv(
        &self,
        tv_db_id: i32,
        season: i32,
        episode: i32,
        scope: TvRequestScope,
    ) -> ApiResult<ResponseEnvelope> {
        let body = serde_json::json!({
            "tvDbId": tv_db_id,
            "latestSeason": scope.request_latest,
            "requestAll": scope.request_all,
            "firstSeason": scope.request_first,
            "seasons": [{
                "seasonNumber": season,
                "episodes": [{ "episodeNumber": episode }],
            }],
        });

        let envelope: ResponseEnvelope = self.client.post("Request/tv", &body).await?;
        envelope.into_result()
    }

    /// Request an album by its MusicBrainz release group identifier.
    pub async fn music(&self, foreign_album_id: &str) -> ApiResult<ResponseEnvelope> {
        #[derive(Serialize)]
        struct MusicRequestBody<'a> {
            #[serde(rename = "foreignAlbumId")]
            foreign_album_id: &'a str,
        }

        let envelope: ResponseEnvelope =
            self.client.post("Request/music", &MusicRequestBody { foreign_album_id }).await?;
        envelope.into_result()
    }

    pub async fn approve_movie(&self, id: i32) -> ApiResult<ResponseEnvelope> {
        self.approve(MediaKind::Movie, id).await
    }

    pub async fn approve_tv(&self, id: i32) -> ApiResult<ResponseEnvelope> {
        self.approve(MediaKind::Tv, id).await
    }

    pub async fn approve_music(&self, id: i32) -> ApiResult<ResponseEnvelope> {
        self.approve(MediaKind::Music, id).await
    }

    /// Deny a movie request. `reason` defaults to `"N/A"` when `None`.
    pub async fn deny_movie(&self, id: i32, reason: Option<&str>) -> ApiResult<ResponseEnvelope> {
        self.deny(MediaKind::Movie, id, reason).await
    }

    pub async fn deny_tv(&self, id: i32, reason: Option<&str>) -> ApiResult<ResponseEnvelope> {
        self.deny(MediaKind::Tv, id, reason).await
    }

    pub async fn deny_music(&self, id: i32, reason: Option<&str>) -> ApiResult<ResponseEnvelope> {
        self.deny(MediaKind::Music, id, reason).await
    }

    pub async fn get_movie_requests(&self) -> ApiResult<Vec<MovieRequest>> {
        self.client.get("Request/movie").await
    }

    pub async fn get_tv_requests(&self) -> ApiResult<Vec<TvRequest>> {
        self.client.get("Request/tv").await
    }

    pub async fn get_music_requests(&self) -> ApiResult<Vec<MusicRequest>> {
        self.client.get("Request/music").await
    }

    /// Total movie requests as the server's raw text, `"0"` for an empty body.
    pub async fn total_movie_requests(&self) -> ApiResult<String> {
        self.total(MediaKind::Movie).await
    }

    pub async fn total_tv_requests(&self) -> ApiResult<String> {
        self.total(MediaKind::Tv).await
    }

    pub async fn total_music_requests(&self) -> ApiResult<String> {
        self.total(MediaKind::Music).await
    }

    pub async fn total_all_requests(&self) -> ApiResult<RequestCounts> {
        self.client.get("Request/count").await
    }

    async fn approve(&self, kind: MediaKind, id: i32) -> ApiResult<ResponseEnvelope> {
        #[derive(Serialize)]
        struct ApproveBody {
            id: i32,
        }

        let envelope: ResponseEnvelope = self
            .client
            .post(&format!("Request/{}/approve", kind.as_str()), &ApproveBody { id })
            .await?;
        envelope.into_result()
    }

    async fn deny(
        &self,
        kind: MediaKind,
        id: i32,
        reason: Option<&str>,
    ) -> ApiResult<ResponseEnvelope> {
        #[derive(Serialize)]
        struct DenyBody<'a> {
            id: i32,
            reason: &'a str,
        }

        let envelope: ResponseEnvelope = self
            .client
            .put(
                &format!("Request/{}/deny", kind.as_str()),
                &DenyBody { id, reason: reason.unwrap_or("N/A") },
            )
            .await?;
        envelope.into_result()
    }

    async fn total(&self, kind: MediaKind) -> ApiResult<String> {
        let text = self.client.get_text(&format!("Request/{}/total", kind.as_str())).await?;
        if text.trim().is_empty() {
            Ok("0".to_string())
        } else {
            Ok(text)
        }
    }
}
