use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_DEXTOOLS_BASE_URL: &str = "https://public-api.dextools.io/trial/v2";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001";

/// Settings for the aggregation gateway (`serve`).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GatewayConfig {
    pub solana_rpc_url: String,

    pub dextools_api_key: String,
    pub dextools_base_url: String,
    pub dextools_chain: String,

    pub api_host: String,
    pub api_port: u16,

    /// Applied to every upstream HTTP call.
    pub upstream_timeout_secs: u64,
    /// Applied to every inbound request as a whole.
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn load() -> Result<Self> {
        Ok(Self {
            solana_rpc_url: env::var("SOLANA_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string()),

            dextools_api_key: env::var("DEXTOOLS_API_KEY")
                .context("DEXTOOLS_API_KEY not set in environment")?,
            dextools_base_url: env::var("DEXTOOLS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DEXTOOLS_BASE_URL.to_string()),
            dextools_chain: env::var("DEXTOOLS_CHAIN").unwrap_or_else(|_| "solana".to_string()),

            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: parse_var("API_PORT", 3001)?,

            upstream_timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS", 20)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Settings for the interactive shell (`shell`).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ShellConfig {
    pub gateway_url: String,
    pub request_timeout_secs: u64,
    /// Cosmetic hold before `check` results are shown. Zero disables it.
    pub check_display_delay_ms: u64,
    pub holder_display_limit: usize,
}

impl ShellConfig {
    pub fn load() -> Result<Self> {
        Ok(Self {
            gateway_url: env::var("GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            request_timeout_secs: parse_var("SHELL_REQUEST_TIMEOUT_SECS", 30)?,
            check_display_delay_ms: parse_var("CHECK_DISPLAY_DELAY_MS", 2000)?,
            holder_display_limit: parse_var("HOLDER_DISPLAY_LIMIT", 10)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn check_display_delay(&self) -> Duration {
        Duration::from_millis(self.check_display_delay_ms)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout_secs: 30,
            check_display_delay_ms: 2000,
            holder_display_limit: 10,
        }
    }
}

// Unset falls back to the default; set but unparsable is an error.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse {}", name)),
        Err(_) => Ok(default),
    }
}
