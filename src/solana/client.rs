use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use solana_account_decoder::parse_token::UiTokenAmount;
use solana_sdk::pubkey::Pubkey;
use std::{str::FromStr, time::Duration};
use tracing::{debug, warn};

use crate::error::GatewayError;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<RpcContextual<T>>,
    error: Option<JsonRpcError>,
}

// `{ context: {...}, value: T }`; context is not needed here.
#[derive(Debug, Deserialize)]
struct RpcContextual<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// One row of `getTokenLargestAccounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenAccountBalance {
    pub address: String,
    #[serde(flatten)]
    pub amount: UiTokenAmount,
}

/// Authorities read from a jsonParsed mint account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintAuthorities {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
}

/// Read-only client for the token queries the gateway needs.
#[derive(Debug, Clone)]
pub struct SolanaClient {
    rpc_url: String,
    client: Client,
}

impl SolanaClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::TransportError(format!("Failed to build RPC client: {}", e)))?;

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            client,
        })
    }

    /// Parses a base58 mint address, rejecting anything that is not a
    /// 32-byte public key.
    pub fn parse_address(address: &str) -> Result<Pubkey, GatewayError> {
        let trimmed = address.trim();
        Pubkey::from_str(trimmed).map_err(|_| GatewayError::InvalidAddress(trimmed.to_string()))
    }

    pub async fn get_token_supply(&self, mint: &Pubkey) -> Result<UiTokenAmount, GatewayError> {
        self.call(
            "getTokenSupply",
            json!([mint.to_string(), { "commitment": "confirmed" }]),
        )
        .await
    }

    pub async fn get_token_largest_accounts(
        &self,
        mint: &Pubkey,
    ) -> Result<Vec<TokenAccountBalance>, GatewayError> {
        self.call(
            "getTokenLargestAccounts",
            json!([mint.to_string(), { "commitment": "confirmed" }]),
        )
        .await
    }

    /// Reads mint and freeze authority. A missing account, or one the node
    /// cannot parse as a mint, yields no authorities rather than an error.
    pub async fn get_mint_authorities(&self, mint: &Pubkey) -> Result<MintAuthorities, GatewayError> {
        let account: Option<Value> = self
            .call(
                "getAccountInfo",
                json!([mint.to_string(), { "encoding": "jsonParsed", "commitment": "confirmed" }]),
            )
            .await?;

        let Some(account) = account else {
            debug!("No account found for mint {}", mint);
            return Ok(MintAuthorities::default());
        };

        let authority = |field: &str| {
            account
                .pointer(&format!("/data/parsed/info/{}", field))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Ok(MintAuthorities {
            mint_authority: authority("mintAuthority"),
            freeze_authority: authority("freezeAuthority"),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &'static str, params: Value) -> Result<T, GatewayError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        debug!("Solana RPC {} -> {}", method, self.rpc_url);

        let response = self.client.post(&self.rpc_url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Solana RPC {} failed: {} - {}", method, status, body);
            return Err(GatewayError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: JsonRpcResponse<T> = response.json().await?;

        if let Some(err) = envelope.error {
            warn!("Solana RPC {} returned error {}: {}", method, err.code, err.message);
            return Err(GatewayError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        envelope
            .result
            .map(|r| r.value)
            .ok_or_else(|| GatewayError::Decode(format!("{} response carried no result", method)))
    }
}
