//! Fetching, rendering, and closing of open positions

use rust_decimal::Decimal;
use tracing::warn;

use crate::exchange::{Exchange, ExchangeError, CATEGORY, SETTLE_COIN};

pub mod closer;
pub mod display;
pub mod types;

pub use types::{Position, Side};

/// Fetch all open linear USDT positions, filtered to size > 0 and kept in
/// the order the exchange returned them.
///
/// A fetch failure is reported to the caller instead of being folded into
/// "no positions"; the interactive session decides how to degrade.
pub async fn fetch_open_positions<E: Exchange + ?Sized>(
    exchange: &E,
) -> Result<Vec<Position>, ExchangeError> {
    let records = exchange.list_positions(CATEGORY, SETTLE_COIN).await?;

    let positions = records
        .into_iter()
        .filter_map(|record| match Position::try_from(record) {
            Ok(position) => Some(position),
            Err(err) => {
                warn!(%err, "skipping malformed position record");
                None
            }
        })
        .filter(|position| position.size > Decimal::ZERO)
        .collect();

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::{OrderRequest, PositionRecord};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct StaticExchange {
        records: Vec<PositionRecord>,
    }

    #[async_trait]
    impl Exchange for StaticExchange {
        async fn list_positions(
            &self,
            _category: &str,
            _settle_coin: &str,
        ) -> Result<Vec<PositionRecord>, ExchangeError> {
            Ok(self.records.clone())
        }

        async fn place_order(&self, _order: &OrderRequest) -> Result<(), ExchangeError> {
            unreachable!("fetch tests never place orders")
        }
    }

    fn record(symbol: &str, size: &str) -> PositionRecord {
        PositionRecord {
            symbol: symbol.into(),
            side: "Buy".into(),
            size: size.into(),
            avg_price: "100".into(),
            unrealised_pnl: "0".into(),
            position_idx: 0,
        }
    }

    #[tokio::test]
    async fn test_zero_size_positions_filtered() {
        let exchange = StaticExchange {
            records: vec![record("BTCUSDT", "0"), record("ETHUSDT", "2"), record("SOLUSDT", "0")],
        };

        let positions = fetch_open_positions(&exchange).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "ETHUSDT");
        assert_eq!(positions[0].size, dec!(2));
    }

    #[tokio::test]
    async fn test_upstream_order_preserved() {
        let exchange = StaticExchange {
            records: vec![record("ETHUSDT", "2"), record("BTCUSDT", "0.5")],
        };

        let positions = fetch_open_positions(&exchange).await.unwrap();
        let symbols: Vec<_> = positions.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, ["ETHUSDT", "BTCUSDT"]);
    }

    #[tokio::test]
    async fn test_malformed_record_skipped() {
        let exchange = StaticExchange {
            records: vec![record("BTCUSDT", "bogus"), record("ETHUSDT", "1")],
        };

        let positions = fetch_open_positions(&exchange).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "ETHUSDT");
    }
}
