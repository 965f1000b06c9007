//! Domain model for open perpetual positions

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::exchange::PositionRecord;

/// Direction of an open position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side that neutralizes this one
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(Side::Buy),
            "Sell" => Ok(Side::Sell),
            other => Err(format!("unknown position side: {:?}", other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One open position, captured at fetch time. Never cached across
/// fetches; the display ID is positional within a single listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub symbol: String,
    pub side: Side,
    pub size: Decimal,
    pub entry_price: Decimal,
    pub unrealized_pnl: Decimal,
    /// Hedge-mode slot; echoed back verbatim when closing
    pub position_idx: u8,
}

impl TryFrom<PositionRecord> for Position {
    type Error = String;

    fn try_from(record: PositionRecord) -> Result<Self, Self::Error> {
        let side = record.side.parse::<Side>()?;
        let size = Decimal::from_str(&record.size)
            .map_err(|e| format!("unparseable size {:?} for {}: {}", record.size, record.symbol, e))?;

        // Entry price and PnL are informational; a bad value degrades to
        // zero rather than dropping the whole position
        let entry_price = lenient_decimal(&record.avg_price, &record.symbol, "avgPrice");
        let unrealized_pnl = lenient_decimal(&record.unrealised_pnl, &record.symbol, "unrealisedPnl");

        Ok(Position {
            symbol: record.symbol,
            side,
            size,
            entry_price,
            unrealized_pnl,
            position_idx: record.position_idx,
        })
    }
}

fn lenient_decimal(value: &str, symbol: &str, field: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|err| {
        warn!(%symbol, field, value, %err, "failed to parse decimal field");
        Decimal::ZERO
    })
}
