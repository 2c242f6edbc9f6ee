//! End-to-end tests for a mood query.
//!
//! These run the real TMDB client against a local HTTP mock, so the whole
//! chain (query parameters, decoding, derivation, fan-out) is exercised.

use std::time::Duration;

use catalog::MoodTable;
use serde_json::json;
use server::{Apology, MoodOrchestrator, RetrieverConfig, Suggestions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_genres(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .and(query_param("api_key", "e2e-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 35, "name": "Comedy"},
                {"id": 18, "name": "Drama"}
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_movie(
    server: &MockServer,
    id: u64,
    poster: Option<&str>,
    videos: serde_json::Value,
) {
    let cast: Vec<_> = (1..=7).map(|n| json!({"name": format!("Actor {}", n)})).collect();
    Mock::given(method("GET"))
        .and(path(format!("/movie/{}", id)))
        .and(query_param("append_to_response", "credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "tagline": format!("Tagline {}", id),
            "poster_path": poster,
            "vote_average": 6.5,
            "genres": [{"id": 35, "name": "Comedy"}, {"id": 10749, "name": "Romance"}],
            "release_date": "2010-06-18",
            "overview": format!("Overview {}", id),
            "credits": {
                "cast": cast,
                "crew": [
                    {"name": "Writer Person", "job": "Screenplay"},
                    {"name": format!("Director {}", id), "job": "Director"}
                ]
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/movie/{}/videos", id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": id, "results": videos })),
        )
        .mount(server)
        .await;
}

fn orchestrator(server: &MockServer) -> MoodOrchestrator {
    let config = RetrieverConfig::new("e2e-key")
        .with_api_base(server.uri())
        .with_request_timeout(Duration::from_secs(2));
    MoodOrchestrator::new(&config, MoodTable::default()).expect("Failed to create orchestrator")
}

#[tokio::test]
async fn test_happy_mood_end_to_end() {
    let server = MockServer::start().await;
    mount_genres(&server).await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "35"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("with_original_language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 11, "title": "First Comedy", "popularity": 99.0},
                {"id": 12, "title": "Second Comedy", "popularity": 42.0}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_movie(
        &server,
        11,
        Some("/x.jpg"),
        json!([
            {"type": "Teaser", "site": "YouTube", "key": "a"},
            {"type": "Trailer", "site": "YouTube", "key": "b"}
        ]),
    )
    .await;
    mount_movie(&server, 12, None, json!([])).await;

    let suggestions = orchestrator(&server).suggest("HAPPY", Some("en")).await;
    let movies = suggestions.movies().expect("expected movies");

    assert_eq!(movies.len(), 2);

    let first = &movies[0];
    assert_eq!(first.title, "First Comedy");
    assert_eq!(first.rank, 1);
    assert_eq!(first.detail.tagline.as_deref(), Some("Tagline 11"));
    assert_eq!(
        first.detail.poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/x.jpg")
    );
    assert_eq!(first.detail.rating, Some(6.5));
    assert_eq!(first.detail.genre.as_deref(), Some("Comedy, Romance"));
    assert_eq!(first.detail.director.as_deref(), Some("Director 11"));
    assert_eq!(
        first.detail.cast.as_deref(),
        Some("Actor 1, Actor 2, Actor 3, Actor 4, Actor 5")
    );
    assert_eq!(
        first.trailer_url.as_deref(),
        Some("https://www.youtube.com/embed/b?autoplay=1")
    );

    let second = &movies[1];
    assert_eq!(second.title, "Second Comedy");
    assert_eq!(second.detail.poster_url.as_deref(), Some("default-poster.jpg"));
    assert_eq!(second.trailer_url, None);
}

#[tokio::test]
async fn test_unknown_mood_never_hits_provider() {
    let server = MockServer::start().await;
    mount_genres(&server).await;

    let suggestions = orchestrator(&server).suggest("melancholic", None).await;
    assert_eq!(suggestions, Suggestions::Apology(Apology::UnknownMood));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_provider_down_for_genres() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let suggestions = orchestrator(&server).suggest("happy", None).await;
    assert_eq!(suggestions.apology(), Some(Apology::UnknownGenre));
}

#[tokio::test]
async fn test_unmapped_provider_genre() {
    // "inspired" maps to Biography, which TMDB does not list
    let server = MockServer::start().await;
    mount_genres(&server).await;

    let suggestions = orchestrator(&server).suggest("inspired", None).await;
    assert_eq!(suggestions.apology(), Some(Apology::UnknownGenre));
}

#[tokio::test]
async fn test_failing_details_degrade_per_movie() {
    let server = MockServer::start().await;
    mount_genres(&server).await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 21, "title": "Broken", "popularity": 10.0},
                {"id": 22, "title": "Working", "popularity": 5.0}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/21"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/21/videos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_movie(&server, 22, Some("/w.jpg"), json!([])).await;

    let suggestions = orchestrator(&server).suggest("happy", None).await;
    let movies = suggestions.movies().unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Broken");
    assert!(movies[0].detail.is_empty());
    assert_eq!(movies[0].trailer_url, None);
    assert_eq!(movies[1].detail.director.as_deref(), Some("Director 22"));
}

#[tokio::test]
async fn test_http_timeout_follows_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"genres": [{"id": 35, "name": "Comedy"}]}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    // A client timeout set directly on the public field must not undercut
    // the query's own deadline
    let mut config = RetrieverConfig::new("e2e-key")
        .with_api_base(server.uri())
        .with_request_timeout(Duration::from_secs(5));
    config.tmdb.timeout = Duration::from_millis(50);
    let orchestrator = MoodOrchestrator::new(&config, MoodTable::default()).unwrap();

    let suggestions = orchestrator.suggest("happy", None).await;
    assert_eq!(suggestions, Suggestions::Movies(vec![]));
}
