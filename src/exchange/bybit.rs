//! Signed reqwest client for the Bybit v5 REST API

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use tracing::debug;

use super::types::{ApiEnvelope, OrderAck, OrderRequest, PositionList, PositionRecord};
use super::{Exchange, ExchangeError};
use crate::config::Config;

type HmacSha256 = Hmac<Sha256>;

const POSITION_LIST_PATH: &str = "/v5/position/list";
const ORDER_CREATE_PATH: &str = "/v5/order/create";
const RECV_WINDOW: &str = "5000";

pub struct BybitClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl BybitClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config, config.host())
    }

    /// Construct against an explicit base URL (integration tests point
    /// this at a local mock server)
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Bybit v5 signature: HMAC-SHA256 over
    /// `timestamp + api_key + recv_window + payload`, hex-encoded.
    /// The payload is the query string for GET and the JSON body for POST.
    fn sign(&self, timestamp: i64, payload: &str) -> Result<String, ExchangeError> {
        let message = format!("{}{}{}{}", timestamp, self.api_key, RECV_WINDOW, payload);
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| ExchangeError::Signing(e.to_string()))?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn auth_headers(
        &self,
        builder: reqwest::RequestBuilder,
        timestamp: i64,
        signature: &str,
    ) -> reqwest::RequestBuilder {
        builder
            .header("X-BAPI-API-KEY", &self.api_key)
            .header("X-BAPI-TIMESTAMP", timestamp.to_string())
            .header("X-BAPI-SIGN", signature)
            .header("X-BAPI-RECV-WINDOW", RECV_WINDOW)
    }

    async fn signed_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<T, ExchangeError> {
        let timestamp = Utc::now().timestamp_millis();
        let signature = self.sign(timestamp, query)?;
        let url = format!("{}{}?{}", self.base_url, path, query);

        debug!(%url, "GET");

        let response = self
            .auth_headers(self.http.get(&url), timestamp, &signature)
            .send()
            .await?;

        Self::unwrap_envelope(response.json().await?)
    }

    async fn signed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &str,
    ) -> Result<T, ExchangeError> {
        let timestamp = Utc::now().timestamp_millis();
        let signature = self.sign(timestamp, body)?;
        let url = format!("{}{}", self.base_url, path);

        debug!(%url, "POST");

        let response = self
            .auth_headers(self.http.post(&url), timestamp, &signature)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await?;

        Self::unwrap_envelope(response.json().await?)
    }

    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, ExchangeError> {
        if envelope.ret_code != 0 {
            return Err(ExchangeError::Api {
                code: envelope.ret_code,
                message: envelope.ret_msg,
            });
        }
        envelope
            .result
            .ok_or_else(|| ExchangeError::Decode("missing result payload".to_string()))
    }
}

#[async_trait::async_trait]
impl Exchange for BybitClient {
    async fn list_positions(
        &self,
        category: &str,
        settle_coin: &str,
    ) -> Result<Vec<PositionRecord>, ExchangeError> {
        // Query parameters must stay in signing order
        let query = format!("category={}&settleCoin={}", category, settle_coin);
        let result: PositionList = self.signed_get(POSITION_LIST_PATH, &query).await?;
        Ok(result.list)
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<(), ExchangeError> {
        let body = serde_json::to_string(order)
            .map_err(|e| ExchangeError::Decode(e.to_string()))?;
        let ack: OrderAck = self.signed_post(ORDER_CREATE_PATH, &body).await?;
        debug!(order_id = %ack.order_id, symbol = %order.symbol, "Order accepted");
        Ok(())
    }
}
