//! Wire types for the Bybit v5 REST API
//!
//! Decimal quantities arrive string-encoded; they are kept as strings here
//! and parsed into `rust_decimal::Decimal` at the domain boundary.

use serde::{Deserialize, Serialize};

/// Standard Bybit v5 response envelope
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "retCode")]
    pub ret_code: i64,
    #[serde(rename = "retMsg")]
    pub ret_msg: String,
    pub result: Option<T>,
}

/// Result payload of `GET /v5/position/list`
#[derive(Debug, Deserialize)]
pub struct PositionList {
    #[serde(default)]
    pub list: Vec<PositionRecord>,
}

/// One position record as returned by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct PositionRecord {
    pub symbol: String,
    pub side: String,
    pub size: String,
    #[serde(rename = "avgPrice", default)]
    pub avg_price: String,
    #[serde(rename = "unrealisedPnl", default)]
    pub unrealised_pnl: String,
    #[serde(rename = "positionIdx", default)]
    pub position_idx: u8,
}

/// Body of `POST /v5/order/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub category: String,
    pub symbol: String,
    pub side: String,
    #[serde(rename = "orderType")]
    pub order_type: String,
    pub qty: String,
    #[serde(rename = "positionIdx")]
    pub position_idx: u8,
    #[serde(rename = "reduceOnly")]
    pub reduce_only: bool,
    #[serde(rename = "timeInForce")]
    pub time_in_force: String,
}

/// Result payload of `POST /v5/order/create`
#[derive(Debug, Deserialize)]
pub struct OrderAck {
    #[serde(rename = "orderId", default)]
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_position_list() {
        let raw = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "list": [
                    {
                        "symbol": "BTCUSDT",
                        "side": "Buy",
                        "size": "0.5",
                        "avgPrice": "64250.10",
                        "unrealisedPnl": "-12.3",
                        "positionIdx": 1
                    }
                ]
            }
        }"#;

        let envelope: ApiEnvelope<PositionList> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.ret_code, 0);
        let list = envelope.result.unwrap().list;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].symbol, "BTCUSDT");
        assert_eq!(list[0].size, "0.5");
        assert_eq!(list[0].position_idx, 1);
    }

    #[test]
    fn test_encode_order_request() {
        let order = OrderRequest {
            category: "linear".into(),
            symbol: "ETHUSDT".into(),
            side: "Buy".into(),
            order_type: "Market".into(),
            qty: "2".into(),
            position_idx: 0,
            reduce_only: true,
            time_in_force: "GTC".into(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderType"], "Market");
        assert_eq!(json["reduceOnly"], true);
        assert_eq!(json["timeInForce"], "GTC");
        assert_eq!(json["positionIdx"], 0);
    }

    #[test]
    fn test_error_envelope_without_result() {
        let raw = r#"{"retCode": 10003, "retMsg": "API key is invalid."}"#;
        let envelope: ApiEnvelope<PositionList> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.ret_code, 10003);
        assert!(envelope.result.is_none());
    }
}
