//! Fixed-width table rendering for position listings

use super::Position;

const RULE_WIDTH: usize = 75;

/// Format positions for display with 1-based selection IDs
pub struct PositionsFormatter<'a> {
    positions: &'a [Position],
}

impl<'a> PositionsFormatter<'a> {
    pub fn new(positions: &'a [Position]) -> Self {
        Self { positions }
    }

    /// Format as a table; pure with respect to its input
    pub fn format_table(&self) -> String {
        if self.positions.is_empty() {
            return "No open positions found.\n".to_string();
        }

        let mut output = String::new();

        output.push_str(&format!(
            "\n{:<5} {:<15} {:<10} {:<10} {:<15} {:<15}\n",
            "ID", "SYMBOL", "SIDE", "SIZE", "ENTRY PRICE", "PNL"
        ));
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        for (i, position) in self.positions.iter().enumerate() {
            output.push_str(&format!(
                "{:<5} {:<15} {:<10} {:<10} {:<15} {:<15}\n",
                i + 1,
                position.symbol,
                position.side,
                position.size,
                position.entry_price,
                position.unrealized_pnl
            ));
        }

        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        output
    }
}
