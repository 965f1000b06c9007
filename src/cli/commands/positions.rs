use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::exchange::BybitClient;
use crate::positions::display::PositionsFormatter;
use crate::positions::fetch_open_positions;

#[derive(Args, Clone)]
pub struct PositionsArgs {}

pub struct PositionsCommand {
    _args: PositionsArgs,
}

impl PositionsCommand {
    pub fn new(args: PositionsArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, config: Config) -> Result<()> {
        let client = BybitClient::new(&config);

        println!("{}", "Fetching active positions...".bright_blue());
        let positions = fetch_open_positions(&client).await?;
        print!("{}", PositionsFormatter::new(&positions).format_table());

        Ok(())
    }
}
