use market_data::{MarketDataError, MarketDataService, YahooChartClient};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chart_body(symbol: &str, price: Option<f64>, closes: Vec<Option<f64>>) -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol, "regularMarketPrice": price },
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn test_latest_close_prefers_market_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/%5EVIX"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
            "^VIX",
            Some(21.37),
            vec![Some(19.0), Some(20.5)],
        )))
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    assert_eq!(client.latest_close("^VIX").await.unwrap(), 21.37);
}

#[tokio::test]
async fn test_latest_close_falls_back_to_last_close() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/%5EVIX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
            "^VIX",
            None,
            vec![Some(19.0), Some(20.5), None],
        )))
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    assert_eq!(client.latest_close("^VIX").await.unwrap(), 20.5);
}

#[tokio::test]
async fn test_daily_closes_trims_to_limit() {
    let server = MockServer::start().await;
    let closes: Vec<Option<f64>> = (1..=252).map(|i| Some(i as f64)).collect();
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/%5EGSPC"))
        .and(query_param("range", "1y"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chart_body("^GSPC", Some(252.0), closes)),
        )
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    let closes = client.daily_closes("^GSPC", 200).await.unwrap();
    assert_eq!(closes.len(), 200);
    assert_eq!(closes[0], 53.0);
    assert_eq!(closes[199], 252.0);
}

#[tokio::test]
async fn test_unknown_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })))
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    assert!(matches!(
        client.latest_close("^NOPE").await,
        Err(MarketDataError::SymbolNotFound(symbol)) if symbol == "^NOPE"
    ));
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    match client.daily_closes("^GSPC", 200).await {
        Err(MarketDataError::Api(msg)) => assert!(msg.contains("upstream down"), "{}", msg),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    assert!(matches!(
        client.latest_close("^VIX").await,
        Err(MarketDataError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_long_average_requests_two_years() {
    let server = MockServer::start().await;
    let closes: Vec<Option<f64>> = (1..=500).map(|i| Some(i as f64)).collect();
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/%5EGSPC"))
        .and(query_param("range", "2y"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chart_body("^GSPC", Some(500.0), closes)),
        )
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    let closes = client.daily_closes("^GSPC", 250).await.unwrap();
    assert_eq!(closes.len(), 250);
    assert_eq!(closes[249], 500.0);
}

#[tokio::test]
async fn test_service_inputs_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/%5EVIX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
            "^VIX",
            Some(32.0),
            vec![Some(30.0)],
        )))
        .mount(&server)
        .await;
    let closes: Vec<Option<f64>> = std::iter::repeat(Some(4000.0))
        .take(199)
        .chain(std::iter::once(Some(4200.0)))
        .collect();
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/%5EGSPC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chart_body("^GSPC", Some(4200.0), closes)),
        )
        .mount(&server)
        .await;

    let client = YahooChartClient::with_base_url(server.uri()).unwrap();
    let service = MarketDataService::new(Arc::new(client));

    assert_eq!(service.current_vix().await.unwrap(), 32.0);
    let trend = service.index_trend().await.unwrap();
    assert_eq!(trend.symbol, "^GSPC");
    assert_eq!(trend.current_price, 4200.0);
    assert_eq!(trend.moving_average, 4001.0);
    assert_eq!(trend.source, "yahoo");
}
