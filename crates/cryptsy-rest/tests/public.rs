//! Public client tests against a mock market data endpoint

mod common;

use common::*;
use cryptsy_rest::{PublicClient, Side};
use cryptsy_types::ParseError;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ltc_market() -> Value {
    json!({
        "marketid": "3",
        "label": "LTC/BTC",
        "lasttradeprice": "0.02541000",
        "volume": "1482.71353025",
        "lasttradetime": "2014-02-18 17:24:05",
        "primaryname": "LiteCoin",
        "primarycode": "LTC",
        "secondaryname": "BitCoin",
        "secondarycode": "BTC",
        "recenttrades": [
            {"id": "10958207", "time": "2014-02-18 17:24:05", "price": "0.02541000",
             "quantity": "2.00000000", "total": "0.05082000"}
        ],
        "sellorders": [
            {"price": "0.02600000", "quantity": "10.00000000", "total": "0.26000000"}
        ],
        "buyorders": [
            {"price": "0.02500000", "quantity": "4.00000000", "total": "0.10000000"},
            {"price": "0.02490000", "quantity": "1.00000000", "total": "0.02490000"}
        ]
    })
}

fn doge_market() -> Value {
    json!({
        "marketid": "132",
        "label": "DOGE/BTC",
        "lasttradeprice": "0.00000152",
        "volume": "82461726.54160600",
        "lasttradetime": "2014-02-18 17:24:01",
        "primaryname": "Dogecoin",
        "primarycode": "DOGE",
        "secondaryname": "BitCoin",
        "secondarycode": "BTC",
        "recenttrades": null,
        "sellorders": null,
        "buyorders": null
    })
}

async fn client(server: &MockServer) -> PublicClient {
    PublicClient::with_config(config(server)).unwrap()
}

#[tokio::test]
async fn test_market_data() {
    let server = MockServer::start().await;
    mount_public(
        &server,
        "marketdatav2",
        public_ok(json!({"markets": {"LTC/BTC": ltc_market(), "DOGE/BTC": doge_market()}})),
    )
    .await;

    let markets = client(&server).await.market_data().await.unwrap();
    assert_eq!(markets.len(), 2);

    let ltc = &markets["LTC/BTC"];
    assert_eq!(ltc.market_id, 3);
    assert_eq!(ltc.primary_code.as_deref(), Some("LTC"));
    assert_eq!(ltc.last_trade_price, Some(dec!(0.02541)));
    assert_eq!(ltc.recent_trades.len(), 1);
    assert_eq!(ltc.recent_trades[0].market_id, 3);
    assert_eq!(ltc.sell_orders[0].side, Side::Sell);
    assert!(ltc.buy_orders.iter().all(|o| o.side == Side::Buy && o.market_id == 3));

    let doge = &markets["DOGE/BTC"];
    assert!(doge.recent_trades.is_empty());
    assert!(doge.sell_orders.is_empty());
}

#[tokio::test]
async fn test_single_market_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("method", "singlemarketdata"))
        .and(query_param("marketid", "3"))
        .respond_with(public_ok(json!({"markets": {"LTC": ltc_market()}})))
        .mount(&server)
        .await;

    let ltc = client(&server).await.single_market_data(3).await.unwrap();
    assert_eq!(ltc.label, "LTC/BTC");
    assert_eq!(ltc.volume, Some(dec!(1482.71353025)));
}

#[tokio::test]
async fn test_single_market_data_empty() {
    let server = MockServer::start().await;
    mount_public(&server, "singlemarketdata", public_ok(json!({"markets": {}}))).await;

    let err = client(&server).await.single_market_data(3).await.unwrap_err();
    assert!(matches!(
        err,
        cryptsy_rest::RestError::Parse(ParseError::UnexpectedShape(_))
    ));
}

#[tokio::test]
async fn test_order_data() {
    let server = MockServer::start().await;
    mount_public(
        &server,
        "orderdata",
        public_ok(json!({
            "LTC": {
                "marketid": "3", "label": "LTC/BTC",
                "primaryname": "LiteCoin", "primarycode": "LTC",
                "secondaryname": "BitCoin", "secondarycode": "BTC",
                "sellorders": [{"price": "0.02600000", "quantity": "10.00000000", "total": "0.26000000"}],
                "buyorders": [{"price": "0.02500000", "quantity": "4.00000000", "total": "0.10000000"}]
            }
        })),
    )
    .await;

    let books = client(&server).await.order_data().await.unwrap();
    let ltc = &books["LTC/BTC"];
    assert_eq!(ltc.sell_orders[0].price, dec!(0.026));
    assert_eq!(ltc.buy_orders[0].quantity, dec!(4));
    assert_eq!(ltc.last_trade_price, None);
    assert!(ltc.recent_trades.is_empty());
}

#[tokio::test]
async fn test_single_order_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("method", "orderdata"))
        .and(query_param("marketid", "3"))
        .respond_with(public_ok(json!({
            "LTC": {
                "marketid": "3", "label": "LTC/BTC",
                "primaryname": "LiteCoin", "primarycode": "LTC",
                "secondaryname": "BitCoin", "secondarycode": "BTC",
                "sellorders": [{"price": "0.02600000", "quantity": "10.00000000", "total": "0.26000000"}],
                "buyorders": [
                    {"price": "0.02500000", "quantity": "4.00000000", "total": "0.10000000"},
                    {"price": "0.02490000", "quantity": "1.00000000", "total": "0.02490000"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let ltc = client(&server).await.single_order_data(3).await.unwrap();
    assert_eq!(ltc.label, "LTC/BTC");
    assert_eq!(ltc.market_id, 3);
    assert_eq!(ltc.sell_orders.len(), 1);
    assert_eq!(ltc.buy_orders.len(), 2);
    assert!(ltc.buy_orders.iter().all(|o| o.side == Side::Buy && o.market_id == 3));
    assert_eq!(ltc.buy_orders[1].price, dec!(0.0249));
}

#[tokio::test]
async fn test_market_ids() {
    let server = MockServer::start().await;
    mount_public(
        &server,
        "marketdatav2",
        public_ok(json!({"markets": {"LTC/BTC": ltc_market(), "DOGE/BTC": doge_market()}})),
    )
    .await;

    let ids = client(&server).await.market_ids().await.unwrap();
    assert_eq!(ids["LTC/BTC"], 3);
    assert_eq!(ids["DOGE/BTC"], 132);
}

#[tokio::test]
async fn test_public_api_error() {
    let server = MockServer::start().await;
    mount_public(
        &server,
        "orderdata",
        ResponseTemplate::new(200).set_body_json(json!({"success": 0, "error": "Invalid market"})),
    )
    .await;

    let err = client(&server).await.single_order_data(999).await.unwrap_err();
    assert_eq!(err.api_message(), Some("Invalid market"));
}
