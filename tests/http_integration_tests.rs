//! Integration Tests for the HTTP Adapters
//!
//! Runs `GoogleMapsClient` and `HttpRedirectResolver` against a local axum
//! server that mimics the geocoding, distance matrix and short-link
//! endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use landmark_matrix::parser::extract_embedded_coordinates;
use landmark_matrix::provider::{DistanceProvider, GeocodeProvider, GoogleMapsClient, GoogleMapsConfig};
use landmark_matrix::resolve::{HttpRedirectResolver, RedirectResolver};
use landmark_matrix::{Coordinates, FetchError, ProviderError, TravelMode};

const API_KEY: &str = "test-key";

// == Fake Provider ==

async fn geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return Json(json!({ "status": "REQUEST_DENIED", "error_message": "bad key", "results": [] }));
    }

    let body = match params.get("address").map(String::as_str) {
        Some("Eiffel Tower") => json!({
            "status": "OK",
            "results": [
                { "geometry": { "location": { "lat": 48.8584, "lng": 2.2945 } } },
                { "geometry": { "location": { "lat": 36.1127, "lng": -115.1723 } } }
            ]
        }),
        Some("over quota") => json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota",
            "results": []
        }),
        _ => json!({ "status": "ZERO_RESULTS", "results": [] }),
    };
    Json(body)
}

async fn distance_matrix(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("departure_time").map(String::as_str), Some("now"));

    let element = if params.get("mode").map(String::as_str) == Some("transit") {
        json!({ "status": "ZERO_RESULTS" })
    } else {
        json!({
            "status": "OK",
            "distance": { "value": 12345 },
            "duration": { "value": 600 },
            "duration_in_traffic": { "value": 725 }
        })
    };
    Json(json!({ "status": "OK", "rows": [ { "elements": [element] } ] }))
}

async fn broken() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn short_link() -> Redirect {
    Redirect::temporary("/maps/place/Louvre/@48.8606,2.3376,17z")
}

async fn landing() -> &'static str {
    "ok"
}

async fn spawn_fake_server() -> SocketAddr {
    let app = Router::new()
        .route("/maps/api/geocode/json", get(geocode))
        .route("/maps/api/distancematrix/json", get(distance_matrix))
        .route("/broken/maps/api/geocode/json", get(broken))
        .route("/s/:code", get(short_link))
        .route("/maps/place/Louvre/*view", get(landing))
        .route("/slow", get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(base_url: String) -> GoogleMapsClient {
    GoogleMapsClient::new(
        GoogleMapsConfig::new(API_KEY)
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

// == Geocoding Tests ==

#[tokio::test]
async fn test_geocode_takes_first_result() {
    let addr = spawn_fake_server().await;
    let client = client_for(format!("http://{addr}"));

    let found = client.geocode("Eiffel Tower").await.unwrap();

    assert_eq!(found, Coordinates::new(48.8584, 2.2945));
}

#[tokio::test]
async fn test_geocode_zero_results_is_none() {
    let addr = spawn_fake_server().await;
    let client = client_for(format!("http://{addr}"));

    assert_eq!(client.geocode("Atlantis").await.unwrap(), None);
}

#[tokio::test]
async fn test_geocode_error_status_is_failure() {
    let addr = spawn_fake_server().await;
    let client = client_for(format!("http://{addr}"));

    let err = client.geocode("over quota").await.unwrap_err();

    match err {
        ProviderError::Status { status, message } => {
            assert_eq!(status, "OVER_QUERY_LIMIT");
            assert!(message.contains("quota"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_http_failure_hides_api_key() {
    let addr = spawn_fake_server().await;
    let client = client_for(format!("http://{addr}/broken/"));

    let err = client.geocode("Eiffel Tower").await.unwrap_err();

    assert_eq!(
        err,
        ProviderError::Http {
            endpoint: "/maps/api/geocode/json".to_string(),
            status: 500,
        }
    );
    assert!(!err.to_string().contains(API_KEY));
}

// == Distance Matrix Tests ==

#[tokio::test]
async fn test_distance_prefers_traffic_duration() {
    let addr = spawn_fake_server().await;
    let client = client_for(format!("http://{addr}"));
    let origin = Coordinates::new(48.8584, 2.2945).unwrap();
    let destination = Coordinates::new(48.8606, 2.3376).unwrap();

    let leg = client
        .distance(origin, destination, TravelMode::Driving)
        .await
        .unwrap();

    assert_eq!(leg.distance_meters, 12345.0);
    assert_eq!(leg.effective_duration_seconds(), 725.0);
}

#[tokio::test]
async fn test_distance_element_failure() {
    let addr = spawn_fake_server().await;
    let client = client_for(format!("http://{addr}"));
    let origin = Coordinates::new(48.8584, 2.2945).unwrap();
    let destination = Coordinates::new(48.8606, 2.3376).unwrap();

    let err = client
        .distance(origin, destination, TravelMode::Transit)
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::ElementStatus("ZERO_RESULTS".to_string()));
}

// == Redirect Resolver Tests ==

#[tokio::test]
async fn test_redirect_resolver_follows_to_final_url() {
    let addr = spawn_fake_server().await;
    let resolver = HttpRedirectResolver::new(Duration::from_secs(5)).unwrap();
    let short = Url::parse(&format!("http://{addr}/s/AbCdEf")).unwrap();

    let resolved = resolver.final_url(&short).await.unwrap();

    assert_eq!(resolved.path(), "/maps/place/Louvre/@48.8606,2.3376,17z");
    assert_eq!(
        extract_embedded_coordinates(resolved.as_str()),
        Coordinates::new(48.8606, 2.3376)
    );
}

#[tokio::test]
async fn test_redirect_resolver_reports_http_status() {
    let addr = spawn_fake_server().await;
    let resolver = HttpRedirectResolver::new(Duration::from_secs(5)).unwrap();
    let missing = Url::parse(&format!("http://{addr}/nothing-here")).unwrap();

    let err = resolver.final_url(&missing).await.unwrap_err();

    assert_eq!(err, FetchError::Status(404));
}

#[tokio::test]
async fn test_redirect_resolver_times_out() {
    let addr = spawn_fake_server().await;
    let resolver = HttpRedirectResolver::new(Duration::from_millis(200)).unwrap();
    let slow = Url::parse(&format!("http://{addr}/slow")).unwrap();

    let err = resolver.final_url(&slow).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)));
}
