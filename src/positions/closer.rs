//! Reduce-only market closes

use owo_colors::OwoColorize;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

use super::Position;
use crate::exchange::{Exchange, OrderRequest, CATEGORY};

/// Pause between successive closes in a bulk operation, to stay clear of
/// exchange rate limits
pub const CLOSE_PAUSE: Duration = Duration::from_millis(100);

/// Build the market order that neutralizes a position: opposite side,
/// captured size verbatim, reduce-only, GTC, hedge-mode slot echoed.
pub fn close_order_for(position: &Position) -> OrderRequest {
    OrderRequest {
        category: CATEGORY.to_string(),
        symbol: position.symbol.clone(),
        side: position.side.opposite().as_str().to_string(),
        order_type: "Market".to_string(),
        qty: position.size.to_string(),
        position_idx: position.position_idx,
        reduce_only: true,
        time_in_force: "GTC".to_string(),
    }
}

/// Close a single position. Failure is reported, not propagated; the
/// caller carries on either way.
pub async fn close_position<E: Exchange + ?Sized>(exchange: &E, position: &Position) -> bool {
    println!(
        "Closing {} ({}, Size: {})...",
        position.symbol.bright_yellow(),
        position.side,
        position.size
    );

    let order = close_order_for(position);
    match exchange.place_order(&order).await {
        Ok(()) => {
            info!(symbol = %position.symbol, qty = %order.qty, "Position closed");
            println!(
                "{} Successfully market closed {}.",
                "✅".bright_green(),
                position.symbol
            );
            true
        }
        Err(err) => {
            error!(symbol = %position.symbol, %err, "Close failed");
            println!(
                "{} Failed to close {}: {}",
                "❌".bright_red(),
                position.symbol,
                err.to_string().bright_red()
            );
            false
        }
    }
}

/// Close every position in its displayed order, pausing between requests.
/// Individual failures do not abort the batch. Returns the number of
/// positions successfully closed.
pub async fn close_all<E: Exchange + ?Sized>(exchange: &E, positions: &[Position]) -> usize {
    let mut closed = 0;
    for position in positions {
        if close_position(exchange, position).await {
            closed += 1;
        }
        sleep(CLOSE_PAUSE).await;
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::{ExchangeError, PositionRecord};
    use crate::positions::Side;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct RecordingExchange {
        orders: Mutex<Vec<OrderRequest>>,
        fail_symbols: Vec<String>,
    }

    impl RecordingExchange {
        fn new() -> Self {
            Self {
                orders: Mutex::new(Vec::new()),
                fail_symbols: Vec::new(),
            }
        }

        fn failing_on(symbol: &str) -> Self {
            Self {
                orders: Mutex::new(Vec::new()),
                fail_symbols: vec![symbol.to_string()],
            }
        }

        fn orders(&self) -> Vec<OrderRequest> {
            self.orders.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Exchange for RecordingExchange {
        async fn list_positions(
            &self,
            _category: &str,
            _settle_coin: &str,
        ) -> Result<Vec<PositionRecord>, ExchangeError> {
            Ok(Vec::new())
        }

        async fn place_order(&self, order: &OrderRequest) -> Result<(), ExchangeError> {
            self.orders.lock().unwrap().push(order.clone());
            if self.fail_symbols.contains(&order.symbol) {
                return Err(ExchangeError::Api {
                    code: 110017,
                    message: "reduce-only rule not satisfied".into(),
                });
            }
            Ok(())
        }
    }

    fn position(symbol: &str, side: Side, size: rust_decimal::Decimal) -> Position {
        Position {
            symbol: symbol.into(),
            side,
            size,
            entry_price: dec!(100),
            unrealized_pnl: dec!(0),
            position_idx: 2,
        }
    }

    #[test]
    fn test_close_order_flips_side() {
        let long = position("BTCUSDT", Side::Buy, dec!(0.5));
        let order = close_order_for(&long);
        assert_eq!(order.side, "Sell");

        let short = position("ETHUSDT", Side::Sell, dec!(2));
        let order = close_order_for(&short);
        assert_eq!(order.side, "Buy");
    }

    #[test]
    fn test_close_order_shape() {
        let order = close_order_for(&position("ETHUSDT", Side::Sell, dec!(2)));
        assert_eq!(order.category, "linear");
        assert_eq!(order.order_type, "Market");
        assert_eq!(order.qty, "2");
        assert_eq!(order.position_idx, 2);
        assert!(order.reduce_only);
        assert_eq!(order.time_in_force, "GTC");
    }

    #[tokio::test]
    async fn test_close_all_continues_past_failure() {
        let exchange = RecordingExchange::failing_on("ETHUSDT");
        let positions = vec![
            position("BTCUSDT", Side::Buy, dec!(0.5)),
            position("ETHUSDT", Side::Sell, dec!(2)),
            position("SOLUSDT", Side::Buy, dec!(10)),
        ];

        let closed = close_all(&exchange, &positions).await;

        assert_eq!(closed, 2);
        let symbols: Vec<_> = exchange.orders().iter().map(|o| o.symbol.clone()).collect();
        assert_eq!(symbols, ["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[tokio::test]
    async fn test_close_position_reports_failure() {
        let exchange = RecordingExchange::failing_on("BTCUSDT");
        assert!(!close_position(&exchange, &position("BTCUSDT", Side::Buy, dec!(1))).await);

        let exchange = RecordingExchange::new();
        assert!(close_position(&exchange, &position("BTCUSDT", Side::Buy, dec!(1))).await);
    }
}
