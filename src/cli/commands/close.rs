use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::exchange::BybitClient;
use crate::session::run_session;

#[derive(Args, Clone)]
pub struct CloseArgs {}

pub struct CloseCommand {
    _args: CloseArgs,
}

impl CloseCommand {
    pub fn new(args: CloseArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, config: Config) -> Result<()> {
        let client = BybitClient::new(&config);
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        run_session(&client, &mut input).await
    }
}
