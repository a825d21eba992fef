//! Rust client SDK for [Ombi](https://ombi.io) media request servers.
//!
//! Search for movies, TV shows and music, submit requests, and approve or
//! deny them, over the server's `/api/v1/` REST surface. Authentication is
//! either an API key or a username/password pair exchanged once for a
//! bearer token; every failure surfaces as one [`OmbiError`].
//!
//! ```no_run
//! use ombi::{ClientConfig, OmbiClient};
//!
//! # async fn run() -> Result<(), ombi::OmbiError> {
//! let mut config = ClientConfig::new("ombi.example.com");
//! config.use_https = true;
//! config.api_key = Some("my-api-key".to_string());
//!
//! let client = OmbiClient::new(config)?;
//! client.test_connection().await?;
//!
//! for movie in client.search.movie("matrix").await? {
//!     println!("{} (requested: {})", movie.title, movie.requested);
//! }
//! client.request.movie(603).await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod client;

pub use api::{
    AlbumSearchResult, ApiResult, MovieRequest, MovieSearchResult, MusicRequest, OmbiError,
    RecentlyAddedEpisode, RecentlyAddedMovie, RequestApi, RequestCounts, ResponseEnvelope,
    SearchApi, StatusApi, TvRequest, TvRequestScope, TvSearchResult,
};
pub use client::{ClientConfig, OmbiClient};
