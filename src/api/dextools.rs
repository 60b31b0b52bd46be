//! Dextools market-data client
//!
//! Endpoints used:
//! - /ranking/{chain}/hotpools - ranked hot pools
//! - /token/{chain}/{address} - token detail (social info lives here)
//! - /token/{chain}/{address}/audit - token security audit

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::GatewayError;

// ============================================================================
// Response Structures
// ============================================================================

/// Every Dextools payload is wrapped in `{ statusCode, data }`.
#[derive(Debug, Deserialize)]
struct DextoolsEnvelope<T> {
    data: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotPool {
    #[serde(default)]
    pub main_token: Option<PoolToken>,
    #[serde(default)]
    pub side_token: Option<PoolToken>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolToken {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    #[serde(default)]
    social_info: Option<SocialInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialInfo {
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Accepts a JSON number, a numeric string, or nothing.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct DextoolsClient {
    api_key: String,
    base_url: String,
    chain: String,
    client: Client,
}

impl DextoolsClient {
    pub fn new(api_key: &str, base_url: &str, chain: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::TransportError(format!("Failed to build Dextools client: {}", e)))?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            chain: chain.to_string(),
            client,
        })
    }

    /// Ranked hot pools for the configured chain, in upstream order.
    pub async fn get_hot_pools(&self) -> Result<Vec<HotPool>, GatewayError> {
        let url = self.endpoint(&["ranking", &self.chain, "hotpools"])?;
        let pools: Option<Vec<HotPool>> = self.get(url).await?;
        Ok(pools.unwrap_or_default())
    }

    /// The `socialInfo` object of a token, if the provider has one.
    pub async fn get_social_info(&self, address: &str) -> Result<Option<SocialInfo>, GatewayError> {
        let url = self.endpoint(&["token", &self.chain, address])?;
        let info: Option<TokenInfo> = self.get(url).await?;
        Ok(info.and_then(|i| i.social_info))
    }

    /// Raw audit record; an absent `data` comes back as an empty object.
    pub async fn get_audit(&self, address: &str) -> Result<Value, GatewayError> {
        let url = self.endpoint(&["token", &self.chain, address, "audit"])?;
        let data: Option<Value> = self.get(url).await?;
        Ok(data.filter(Value::is_object).unwrap_or_else(|| Value::Object(Default::default())))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::TransportError(format!("Invalid Dextools base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::TransportError("Dextools base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments.iter().map(|s| s.trim()));
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, GatewayError> {
        debug!("Dextools GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Dextools API error for {}: {} - {}", url.path(), status, body);
            return Err(GatewayError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: DextoolsEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}
