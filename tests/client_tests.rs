use std::time::Duration;

use ombi::{ClientConfig, OmbiClient, OmbiError, TvRequestScope};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_key_config(server: &MockServer) -> ClientConfig {
    let addr = server.address();
    let mut config = ClientConfig::new(addr.ip().to_string());
    config.port = Some(addr.port());
    config.api_key = Some("secret-key".to_string());
    config
}

fn credentials_config(server: &MockServer) -> ClientConfig {
    let addr = server.address();
    let mut config = ClientConfig::new(addr.ip().to_string());
    config.port = Some(addr.port());
    config.username = Some("alice".to_string());
    config.password = Some("hunter2".to_string());
    config
}

#[tokio::test]
async fn api_key_search_sends_key_header_and_no_token_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Search/movie/matrix"))
        .and(header("ApiKey", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 603, "title": "The Matrix", "requested": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let results = client.search.movie("matrix").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 603);
    assert_eq!(results[0].title, "The Matrix");
    assert!(results[0].requested);
}

#[tokio::test]
async fn username_header_rides_along_under_api_key_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Status"))
        .and(header("ApiKey", "secret-key"))
        .and(header("UserName", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "4.0.0"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = api_key_config(&server);
    config.username = Some("alice".to_string());

    let client = OmbiClient::new(config).unwrap();
    client.test_connection().await.unwrap();
}

#[tokio::test]
async fn credentials_mode_exchanges_token_exactly_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Token"))
        .and(body_json(json!({"userName": "alice", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/count"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pending": 2, "approved": 1, "available": 4
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = OmbiClient::new(credentials_config(&server)).unwrap();

    let counts = client.request.total_all_requests().await.unwrap();
    assert_eq!(counts.pending, 2);
    assert_eq!(counts.approved, 1);
    assert_eq!(counts.available, 4);

    // Second call reuses the memoized bearer credential.
    client.request.total_all_requests().await.unwrap();
}

#[tokio::test]
async fn credentials_flow_runs_on_a_spawned_task() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-456"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/count"))
        .and(header("Authorization", "Bearer tok-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pending": 1, "approved": 0, "available": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(credentials_config(&server)).unwrap();

    // tokio::spawn demands a Send future, token exchange included.
    let handle = tokio::spawn(async move { client.request.total_all_requests().await });
    let counts = handle.await.unwrap().unwrap();

    assert_eq!(counts.pending, 1);
}

#[tokio::test]
async fn rejected_token_exchange_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(credentials_config(&server)).unwrap();
    let err = client.search.movie("matrix").await.unwrap_err();

    assert!(matches!(err, OmbiError::Auth(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn token_exchange_without_access_token_is_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(credentials_config(&server)).unwrap();
    let err = client.search.movie("matrix").await.unwrap_err();

    assert!(matches!(err, OmbiError::Auth(_)));
    // Only the token exchange hit the wire; the search itself never did.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unauthorized_status_maps_to_auth_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/movie"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let err = client.request.get_movie_requests().await.unwrap_err();

    assert!(matches!(err, OmbiError::Auth(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn forbidden_status_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/tv"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let err = client.request.get_tv_requests().await.unwrap_err();

    assert!(matches!(err, OmbiError::Auth(_)));
}

#[tokio::test]
async fn other_failure_statuses_carry_the_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/music"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let err = client.request.get_music_requests().await.unwrap_err();

    match err {
        OmbiError::Http(status) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn envelope_error_on_200_maps_to_application_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Request/movie"))
        .and(body_json(json!({"theMovieDbId": 603, "languageCode": "en"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isError": true, "errorMessage": "X"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let err = client.request.movie(603).await.unwrap_err();

    match err {
        OmbiError::Application(message) => assert_eq!(message, "X"),
        other => panic!("expected Application error, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_movie_request_returns_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Request/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isError": false, "requestId": 42, "message": "queued"
        })))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let envelope = client.request.movie(603).await.unwrap();

    assert_eq!(envelope.request_id, Some(42));
    assert_eq!(envelope.message.as_deref(), Some("queued"));
}

#[tokio::test]
async fn tv_request_sends_season_and_scope_flags() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Request/tv"))
        .and(body_json(json!({
            "tvDbId": 121361,
            "latestSeason": true,
            "requestAll": false,
            "firstSeason": false,
            "seasons": [{"seasonNumber": 1, "episodes": [{"episodeNumber": 3}]}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isError": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let scope = TvRequestScope { request_latest: true, ..Default::default() };
    client.request.tv(121361, 1, 3, scope).await.unwrap();
}

#[tokio::test]
async fn deny_uses_put_with_default_reason() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/Request/movie/deny"))
        .and(body_json(json!({"id": 7, "reason": "N/A"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isError": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    client.request.deny_movie(7, None).await.unwrap();
}

#[tokio::test]
async fn approve_posts_the_request_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Request/music/approve"))
        .and(body_json(json!({"id": 9})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isError": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    client.request.approve_music(9).await.unwrap();
}

#[tokio::test]
async fn empty_total_body_becomes_zero_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/movie/total"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    assert_eq!(client.request.total_movie_requests().await.unwrap(), "0");
}

#[tokio::test]
async fn total_body_text_passes_through_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Request/tv/total"))
        .respond_with(ResponseTemplate::new(200).set_body_string("5"))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    assert_eq!(client.request.total_tv_requests().await.unwrap(), "5");
}

#[tokio::test]
async fn html_body_on_json_endpoint_maps_to_config_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Search/tv/firefly"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>not found</body></html>"),
        )
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let err = client.search.tv("firefly").await.unwrap_err();

    assert!(matches!(err, OmbiError::Config(_)));
}

#[tokio::test]
async fn slow_server_maps_to_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"version": "4.0.0"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = api_key_config(&server);
    config.timeout = Duration::from_millis(50);

    let client = OmbiClient::new(config).unwrap();
    let err = client.test_connection().await.unwrap_err();

    assert!(matches!(err, OmbiError::Timeout));
}

#[tokio::test]
async fn redirect_loop_maps_to_redirect_error() {
    let server = MockServer::start().await;

    // The mock redirects to itself until the transport gives up.
    Mock::given(method("GET"))
        .and(path("/api/v1/Status"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/api/v1/Status"))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let err = client.test_connection().await.unwrap_err();

    assert!(matches!(err, OmbiError::Redirect));
}

#[tokio::test]
async fn connection_refused_maps_to_connection_error() {
    // Grab a port the OS just released; nothing is listening there. A bare
    // (non-pooled) server is required so dropping it actually closes the port.
    let server = MockServer::builder().start().await;
    let config = api_key_config(&server);
    drop(server);

    let client = OmbiClient::new(config).unwrap();
    let err = client.test_connection().await.unwrap_err();

    assert!(matches!(err, OmbiError::Connection));
}

#[tokio::test]
async fn recently_added_movies_are_listed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/RecentlyAdded/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Dune", "addedAt": "2024-01-01T00:00:00"}
        ])))
        .mount(&server)
        .await;

    let client = OmbiClient::new(api_key_config(&server)).unwrap();
    let movies = client.search.recently_added_movies().await.unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Dune");
}
