//! Exchange adapter seam
//!
//! The interactive session and commands only talk to the [`Exchange`]
//! trait, so tests can substitute a recording fake for the real client.

use async_trait::async_trait;
use thiserror::Error;

mod bybit;
pub mod types;

pub use bybit::BybitClient;
pub use types::{OrderRequest, PositionRecord};

/// Instrument category used for every request
pub const CATEGORY: &str = "linear";
/// Settlement currency used for every request
pub const SETTLE_COIN: &str = "USDT";

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("exchange rejected request (retCode {code}): {message}")]
    Api { code: i64, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("request signing failed: {0}")]
    Signing(String),
}

/// Minimal exchange surface consumed by this tool
#[async_trait]
pub trait Exchange: Send + Sync {
    /// List position records for the given category and settlement currency
    async fn list_positions(
        &self,
        category: &str,
        settle_coin: &str,
    ) -> Result<Vec<PositionRecord>, ExchangeError>;

    /// Submit an order, returning once the exchange acknowledges it
    async fn place_order(&self, order: &OrderRequest) -> Result<(), ExchangeError>;
}
