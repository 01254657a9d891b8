//! JMA provider against a mock HTTP server.

use weather_core::{Config, ForecastProvider, JmaProvider, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn config_for(server: &MockServer) -> Config {
    Config {
        area_url: format!("{}/common/const/area.json", server.uri()),
        forecast_url: format!("{}/forecast/data/forecast/{{code}}.json", server.uri()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn sample_area_index() -> serde_json::Value {
    serde_json::json!({
        "centers": {
            "010300": { "name": "関東甲信地方", "enName": "Kanto Koshin", "children": ["130000"] }
        },
        "offices": {
            "270000": { "name": "大阪府", "enName": "Osaka", "officeName": "大阪管区気象台", "parent": "010600", "children": ["270000"] },
            "016000": { "name": "石狩・空知・後志地方", "enName": "Ishikari Sorachi Shiribeshi", "officeName": "札幌管区気象台", "parent": "010100", "children": ["011000"] },
            "130000": { "name": "東京都", "enName": "Tokyo", "officeName": "気象庁", "parent": "010300", "children": ["130010"] }
        },
        "class10s": {}
    })
}

fn sample_forecast() -> serde_json::Value {
    serde_json::json!([
        {
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-01-15T17:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": [
                        "2024-01-15T17:00:00+09:00",
                        "2024-01-16T00:00:00+09:00",
                        "2024-01-17T00:00:00+09:00"
                    ],
                    "areas": [
                        {
                            "area": { "name": "東京地方", "code": "130010" },
                            "weatherCodes": ["100", "200", "101"],
                            "weathers": ["晴れ", "くもり", "晴れ　時々　くもり"],
                            "winds": ["北の風", "北の風", "南の風"]
                        }
                    ]
                },
                {
                    "timeDefines": ["2024-01-15T18:00:00+09:00"],
                    "areas": [{ "area": { "name": "東京地方", "code": "130010" }, "pops": ["0"] }]
                }
            ]
        },
        {
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-01-15T17:00:00+09:00",
            "timeSeries": []
        }
    ])
}

#[tokio::test]
async fn lists_offices_sorted_by_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/common/const/area.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_area_index()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = JmaProvider::new(&config_for(&server)).unwrap();
    let areas = provider.list_areas().await.unwrap();

    let codes: Vec<&str> = areas.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, ["016000", "130000", "270000"]);
    assert_eq!(areas[1].name, "東京都");
    assert_eq!(areas[1].en_name.as_deref(), Some("Tokyo"));
}

#[tokio::test]
async fn fetches_forecast_for_area() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = JmaProvider::new(&config_for(&server)).unwrap();
    let forecast = provider.get_forecast("130000").await.unwrap();

    assert_eq!(forecast.area_code, "130000");
    assert_eq!(forecast.area_name, "東京地方");
    assert_eq!(forecast.entries.len(), 3);
    assert_eq!(forecast.entries[2].weather, "晴れ　時々　くもり");
    assert!(forecast.render().contains("2024-01-16T00:00:00+09:00 : くもり"));
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/999999.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let provider = JmaProvider::new(&config_for(&server)).unwrap();
    let err = provider.get_forecast("999999").await.unwrap_err();

    match err {
        WeatherError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/common/const/area.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let provider = JmaProvider::new(&config_for(&server)).unwrap();
    let err = provider.list_areas().await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse { .. }));
    assert!(err.to_string().contains("area.json"));
}

#[tokio::test]
async fn invalid_area_code_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = JmaProvider::new(&config_for(&server)).unwrap();

    assert!(matches!(provider.get_forecast("  ").await, Err(WeatherError::NoArea)));
    assert!(matches!(
        provider.get_forecast("13/../x").await,
        Err(WeatherError::InvalidAreaCode(_))
    ));
}

#[tokio::test]
async fn empty_report_is_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let provider = JmaProvider::new(&config_for(&server)).unwrap();
    let err = provider.get_forecast("130000").await.unwrap_err();

    assert!(matches!(err, WeatherError::MissingData(code) if code == "130000"));
}
