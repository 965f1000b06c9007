//! Interactive close session
//!
//! Single linear workflow: fetch, display, prompt once, dispatch, then
//! re-verify when an action was taken. Selection IDs are positional
//! within one listing and die with it.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};
use tracing::error;

use crate::exchange::Exchange;
use crate::positions::display::PositionsFormatter;
use crate::positions::{closer, fetch_open_positions, Position};

/// Operator selection, parsed against the current listing length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    CloseAll,
    /// Zero-based index into the displayed sequence, already range-checked
    CloseOne(usize),
    InvalidId,
    Quit,
    Invalid,
}

impl Choice {
    /// Normalize (trim, uppercase) and dispatch: "ALL" first, then digit
    /// strings as 1-based IDs, then "Q", else invalid.
    pub fn parse(input: &str, count: usize) -> Choice {
        let normalized = input.trim().to_uppercase();

        if normalized == "ALL" {
            return Choice::CloseAll;
        }

        if !normalized.is_empty() && normalized.bytes().all(|b| b.is_ascii_digit()) {
            return match normalized.parse::<usize>() {
                Ok(id) if (1..=count).contains(&id) => Choice::CloseOne(id - 1),
                _ => Choice::InvalidId,
            };
        }

        if normalized == "Q" {
            return Choice::Quit;
        }

        Choice::Invalid
    }
}

/// Run one interactive session against the given exchange, reading the
/// operator's selection from `input`.
pub async fn run_session<E: Exchange + ?Sized>(
    exchange: &E,
    input: &mut dyn BufRead,
) -> Result<()> {
    println!("Fetching active positions...");
    let positions = fetch_or_report(exchange).await;
    print!("{}", PositionsFormatter::new(&positions).format_table());

    if positions.is_empty() {
        return Ok(());
    }

    print_menu();
    let line = read_choice(input)?;

    match Choice::parse(&line, positions.len()) {
        Choice::CloseAll => {
            let closed = closer::close_all(exchange, &positions).await;
            println!(
                "Closed {} of {} positions.",
                closed.to_string().bright_green(),
                positions.len()
            );
            verify(exchange).await;
        }
        Choice::CloseOne(index) => {
            closer::close_position(exchange, &positions[index]).await;
            verify(exchange).await;
        }
        Choice::InvalidId => {
            println!("{} Invalid ID selected.", "❌".bright_red());
        }
        Choice::Quit => {
            println!("Exiting...");
        }
        Choice::Invalid => {
            println!("Invalid input.");
        }
    }

    Ok(())
}

/// Fetch failures degrade to an empty listing at this boundary only, and
/// are reported distinctly from "no open positions".
async fn fetch_or_report<E: Exchange + ?Sized>(exchange: &E) -> Vec<Position> {
    match fetch_open_positions(exchange).await {
        Ok(positions) => positions,
        Err(err) => {
            error!(%err, "Position fetch failed");
            println!(
                "{} Error fetching positions: {}",
                "❌".bright_red(),
                err.to_string().bright_red()
            );
            Vec::new()
        }
    }
}

fn print_menu() {
    println!("\n--- OPTIONS ---");
    println!("Type the [ID] number to close a specific position (e.g., 1)");
    println!("Type 'ALL' to close EVERYTHING.");
    println!("Type 'Q' to quit.");
}

fn read_choice(input: &mut dyn BufRead) -> Result<String> {
    print!("\nYour choice: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

async fn verify<E: Exchange + ?Sized>(exchange: &E) {
    println!("\nVerifying remaining positions...");
    let remaining = fetch_or_report(exchange).await;
    print!("{}", PositionsFormatter::new(&remaining).format_table());
}
