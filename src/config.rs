use anyhow::{anyhow, Result};

/// Bybit mainnet REST endpoint
pub const MAINNET_HOST: &str = "https://api.bybit.com";
/// Bybit testnet REST endpoint
pub const TESTNET_HOST: &str = "https://api-testnet.bybit.com";

/// API credentials and network environment, passed explicitly into the
/// client constructor. No global session state.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub testnet: bool,
}

impl Config {
    /// Load credentials from the environment (`BYBIT_API_KEY`,
    /// `BYBIT_API_SECRET`). Fails with an actionable message before any
    /// network call is attempted.
    pub fn from_env(testnet: bool) -> Result<Self> {
        let api_key = std::env::var("BYBIT_API_KEY")
            .map_err(|_| anyhow!("BYBIT_API_KEY is not set. Export it or add it to .env"))?;
        let api_secret = std::env::var("BYBIT_API_SECRET")
            .map_err(|_| anyhow!("BYBIT_API_SECRET is not set. Export it or add it to .env"))?;

        if api_key.is_empty() || api_secret.is_empty() {
            return Err(anyhow!("Bybit API credentials must not be empty"));
        }

        Ok(Self {
            api_key,
            api_secret,
            testnet,
        })
    }

    /// REST host for the configured network environment
    pub fn host(&self) -> &'static str {
        if self.testnet {
            TESTNET_HOST
        } else {
            MAINNET_HOST
        }
    }
}
