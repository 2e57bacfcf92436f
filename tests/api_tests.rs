//! WeatherClient against a mocked weather service

use pretty_assertions::assert_eq;
use weather_widget::{
    api::{FetchError, WeatherClient},
    config::ApiConfig,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for(server: &MockServer) -> WeatherClient {
    let config = ApiConfig::new(server.uri(), "test-key").with_timeout_secs(2);
    WeatherClient::new(config).expect("client should build")
}

fn current_weather(name: &str, main: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{"id": 800, "main": main, "description": description, "icon": "01d"}],
        "main": {"temp": 21.4, "feels_like": 20.9, "humidity": 40, "pressure": 1018},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 200},
        "sys": {"country": "FR"},
        "name": name,
        "cod": 200
    })
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_fetch_current_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris,FR"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_weather("Paris", "Clear", "clear sky")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_current("Paris,FR")
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.name, "Paris");
    assert_eq!(snapshot.country, "FR");
    assert_eq!(snapshot.condition, "Clear");
    assert_eq!(snapshot.description, "clear sky");
    assert_eq!(snapshot.temperature_rounded(), 21);
    assert_eq!(snapshot.humidity, 40);
    assert_eq!(snapshot.visibility, Some(10000));
}

#[tokio::test]
async fn test_query_with_spaces_is_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_weather("New York", "Haze", "haze")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_current("New York")
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.name, "New York");
}

#[tokio::test]
async fn test_missing_visibility_still_loads() {
    let server = MockServer::start().await;

    let mut body = current_weather("Reykjavik", "Snow", "light snow");
    if let Some(fields) = body.as_object_mut() {
        fields.remove("visibility");
    }

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Reykjavik"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_current("Reykjavik")
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.visibility, None);
    assert_eq!(snapshot.condition, "Snow");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_not_found_uses_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_current("Atlantis")
        .await
        .expect_err("404 should fail");

    assert!(matches!(err, FetchError::Http { status: 404, .. }));
    assert_eq!(err.user_message(), "city not found");
}

#[tokio::test]
async fn test_server_error_without_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_current("London")
        .await
        .expect_err("500 should fail");

    assert!(matches!(
        err,
        FetchError::Http {
            status: 500,
            message: None
        }
    ));
    assert_eq!(err.user_message(), "Weather service returned 500");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Nowhere",
            "weather": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_current("Nowhere")
        .await
        .expect_err("malformed body should fail");

    assert!(matches!(err, FetchError::Parse(_)));
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let config = ApiConfig::new("http://127.0.0.1:1", "test-key").with_timeout_secs(2);
    let client = WeatherClient::new(config).expect("client should build");

    let err = client
        .fetch_current("London")
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(err, FetchError::Network(_)));
    assert!(err.user_message().starts_with("Could not reach"));
}
