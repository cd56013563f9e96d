//! Integration tests for the OpenWeather gateway against a mock HTTP server.

use skycast_core::gateway::{GatewayError, OpenWeatherGateway, WeatherGateway};
use skycast_core::model::{Coordinates, UnitSystem};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> OpenWeatherGateway {
    OpenWeatherGateway::with_base_url("TEST_KEY".to_string(), server.uri())
}

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "dt": 1700000000,
        "coord": { "lat": 51.5, "lon": -0.1 },
        "main": { "temp": 11.2, "feels_like": 10.1, "humidity": 76, "pressure": 1012 },
        "weather": [ { "main": "Clouds", "description": "overcast clouds", "icon": "04d" } ],
        "wind": { "speed": 4.6, "deg": 200 },
        "sys": { "country": "GB", "sunrise": 1699946000, "sunset": 1699978000 },
        "clouds": { "all": 90 },
        "visibility": 10000
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "city": { "name": "London", "country": "GB" },
        "list": [
            { "dt": 1700006400, "main": { "temp_min": 8.0, "temp_max": 12.0 },
              "weather": [ { "icon": "04d", "description": "overcast clouds" } ] },
            { "dt": 1700017200, "main": { "temp_min": 9.0, "temp_max": 13.5 },
              "weather": [ { "icon": "03d", "description": "scattered clouds" } ] }
        ]
    })
}

#[tokio::test]
async fn current_by_city_sends_query_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let current = gateway
        .current_by_city("London", UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(current.name.as_deref(), Some("London"));
    assert_eq!(current.main.temp, Some(11.2));
    assert_eq!(
        current.sys.as_ref().and_then(|s| s.country.as_deref()),
        Some("GB")
    );
    assert_eq!(current.condition().and_then(|c| c.icon.as_deref()), Some("04d"));
}

#[tokio::test]
async fn current_by_coords_sends_lat_lon_and_imperial_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.1"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let current = gateway
        .current_by_coords(Coordinates { lat: 51.5, lon: -0.1 }, UnitSystem::Imperial)
        .await
        .unwrap();

    assert_eq!(current.name.as_deref(), Some("London"));
}

#[tokio::test]
async fn forecast_by_city_returns_sample_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let samples = gateway
        .forecast_by_city("London", UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].dt, 1_700_006_400);
    assert_eq!(samples[0].main.temp_min, Some(8.0));
    assert_eq!(samples[1].main.temp_max, Some(13.5));
}

#[tokio::test]
async fn forecast_by_coords_hits_forecast_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "48.8"))
        .and(query_param("lon", "2.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let samples = gateway
        .forecast_by_coords(Coordinates { lat: 48.8, lon: 2.3 }, UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(samples.len(), 2);
}

#[tokio::test]
async fn non_success_status_maps_to_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404", "message": "city not found"
            })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .current_by_city("Atlantis", UnitSystem::Metric)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::RequestFailed(_)));
    assert_eq!(err.to_string(), "failed to fetch current weather by city");
}

#[tokio::test]
async fn forecast_failure_names_the_forecast_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .forecast_by_coords(Coordinates { lat: 0.0, lon: 0.0 }, UnitSystem::Metric)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "failed to fetch forecast by coordinates");
}

#[tokio::test]
async fn partial_current_payload_still_decodes() {
    let server = MockServer::start().await;

    // Bare-bones payload: no wind, sys, clouds, weather or visibility.
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Nowhere",
            "main": { "temp": 3.0 }
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let current = gateway
        .current_by_city("Nowhere", UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(current.name.as_deref(), Some("Nowhere"));
    assert_eq!(current.main.temp, Some(3.0));
    assert!(current.wind.is_none());
    assert!(current.sys.is_none());
    assert!(current.weather.is_empty());
}
