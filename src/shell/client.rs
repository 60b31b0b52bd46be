//! HTTP client for the aggregation gateway

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ShellError;
use crate::models::{AuditReport, SocialLinks, TokenDetail, TrendingPoolView};
use crate::web::models::{AuditResponse, ErrorResponse, SocialsResponse, TrendingResponse};

use super::log::LogLine;

/// A gateway call the shell has decided to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayRequest {
    TokenDetail { address: String },
    Trending { limit: usize },
    Socials { address: String },
    Audit { address: String },
}

impl GatewayRequest {
    /// Line shown when the call is issued.
    pub fn progress_line(&self) -> LogLine {
        LogLine::notice(match self {
            GatewayRequest::TokenDetail { address } => format!("Fetching details for {}...", address),
            GatewayRequest::Trending { limit } => format!("Fetching top {} trending coins from Dextools...", limit),
            GatewayRequest::Socials { address } => format!("Fetching socials for contract: {}...", address),
            GatewayRequest::Audit { address } => format!("Fetching audit for contract: {}...", address),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    TokenDetail(TokenDetail),
    Trending(Vec<TrendingPoolView>),
    Socials(SocialLinks),
    Audit(AuditReport),
}

/// The four gateway queries, as seen from the shell.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    async fn token_detail(&self, address: &str) -> Result<TokenDetail, ShellError>;
    async fn trending(&self, limit: usize) -> Result<Vec<TrendingPoolView>, ShellError>;
    async fn socials(&self, address: &str) -> Result<SocialLinks, ShellError>;
    async fn audit(&self, address: &str) -> Result<AuditReport, ShellError>;
}

pub async fn execute(api: &dyn GatewayApi, request: &GatewayRequest) -> Result<GatewayReply, ShellError> {
    match request {
        GatewayRequest::TokenDetail { address } => api.token_detail(address).await.map(GatewayReply::TokenDetail),
        GatewayRequest::Trending { limit } => api.trending(*limit).await.map(GatewayReply::Trending),
        GatewayRequest::Socials { address } => api.socials(address).await.map(GatewayReply::Socials),
        GatewayRequest::Audit { address } => api.audit(address).await.map(GatewayReply::Audit),
    }
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: Url,
    client: Client,
}

impl GatewayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ShellError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ShellError::Transport(format!("Invalid gateway URL {}: {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShellError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ShellError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ShellError::Transport(format!("Gateway URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ShellError> {
        debug!("Gateway GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("Gateway responded with status {}", status));
        warn!("Gateway request failed: {} - {}", status, message);

        Err(ShellError::Gateway {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl GatewayApi for GatewayClient {
    async fn token_detail(&self, address: &str) -> Result<TokenDetail, ShellError> {
        let url = self.endpoint(&["api", "token", address])?;
        self.get_json(url).await
    }

    async fn trending(&self, limit: usize) -> Result<Vec<TrendingPoolView>, ShellError> {
        let mut url = self.endpoint(&["api", "dextools", "trending"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        let response: TrendingResponse = self.get_json(url).await?;
        Ok(response.trending)
    }

    async fn socials(&self, address: &str) -> Result<SocialLinks, ShellError> {
        let url = self.endpoint(&["api", "dextools", "socials", address])?;
        let response: SocialsResponse = self.get_json(url).await?;
        Ok(response.socials)
    }

    async fn audit(&self, address: &str) -> Result<AuditReport, ShellError> {
        let url = self.endpoint(&["api", "dextools", "audit", address])?;
        let response: AuditResponse = self.get_json(url).await?;
        Ok(response.audit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_becomes_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/dextools/socials/Mint1")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"No social links found.","details":"Failed to fetch socials."}"#)
            .create_async()
            .await;

        let client = GatewayClient::new(&server.url(), Duration::from_secs(5)).unwrap();
        match client.socials("Mint1").await {
            Err(ShellError::Gateway { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "No social links found.");
            }
            other => panic!("expected gateway error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_trending_sends_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dextools/trending")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "15".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"trending":[{"name":"A/B","symbol":"A/B","price":"$1.00","volume":"N/A","url":"N/A"}]}"#)
            .create_async()
            .await;

        let client = GatewayClient::new(&server.url(), Duration::from_secs(5)).unwrap();
        let pools = client.trending(15).await.unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].price, "$1.00");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_transport_error() {
        // Port 9 (discard) is not expected to have an HTTP listener.
        let client = GatewayClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = client.audit("Mint1").await;
        assert!(matches!(result, Err(ShellError::Transport(_))));
    }

    #[test]
    fn test_progress_lines() {
        let line = GatewayRequest::Trending { limit: 10 }.progress_line();
        assert_eq!(line.text, "Fetching top 10 trending coins from Dextools...");
    }
}
