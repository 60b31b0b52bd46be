//! Aggregation gateway
//!
//! Translates the RPC node and Dextools into the normalized shapes in
//! [`crate::models`]. Every field has an explicit default; an operation only
//! fails when no usable data exists at all.

pub mod token_detail;

use tracing::{debug, info};

use crate::api::dextools::{DextoolsClient, HotPool};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::models::{AuditReport, SocialLinks, TokenDetail, TrendingPool};
use crate::solana::client::SolanaClient;

use self::token_detail::TokenDetailParts;

pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Stateless between requests: holds only the upstream clients.
#[derive(Debug, Clone)]
pub struct Aggregator {
    solana: SolanaClient,
    dextools: DextoolsClient,
    chain: String,
}

impl Aggregator {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let solana = SolanaClient::new(&config.solana_rpc_url, config.upstream_timeout())?;
        let dextools = DextoolsClient::new(
            &config.dextools_api_key,
            &config.dextools_base_url,
            &config.dextools_chain,
            config.upstream_timeout(),
        )?;
        Ok(Self::from_clients(solana, dextools, &config.dextools_chain))
    }

    pub fn from_clients(solana: SolanaClient, dextools: DextoolsClient, chain: &str) -> Self {
        Self {
            solana,
            dextools,
            chain: chain.to_string(),
        }
    }

    /// Supply, largest holders and mint authorities for `address`. The three
    /// RPC sub-queries run concurrently and degrade independently.
    pub async fn get_token_detail(&self, address: &str) -> Result<TokenDetail, GatewayError> {
        let mint = SolanaClient::parse_address(address)?;
        let mint_str = mint.to_string();
        debug!("Fetching token detail for {}", mint_str);

        let (supply, largest_accounts, authorities) = tokio::join!(
            self.solana.get_token_supply(&mint),
            self.solana.get_token_largest_accounts(&mint),
            self.solana.get_mint_authorities(&mint),
        );

        TokenDetailParts {
            supply,
            largest_accounts,
            authorities,
        }
        .assemble(&mint_str)
    }

    /// Top `limit` hot pools in upstream rank order. Returns fewer when the
    /// upstream list is shorter.
    pub async fn get_trending_pools(&self, limit: usize) -> Result<Vec<TrendingPool>, GatewayError> {
        let pools = self.dextools.get_hot_pools().await?;
        info!("Dextools returned {} hot pools for {}", pools.len(), self.chain);

        if pools.is_empty() {
            return Err(GatewayError::NoDataFound(format!(
                "No trending pools found for {}.",
                self.chain
            )));
        }

        Ok(pools.iter().take(limit).map(project_pool).collect())
    }

    pub async fn get_socials(&self, address: &str) -> Result<SocialLinks, GatewayError> {
        let info = self.dextools.get_social_info(address.trim()).await?.unwrap_or_default();

        let links = SocialLinks {
            telegram: non_blank(info.telegram),
            twitter: non_blank(info.twitter),
            website: non_blank(info.website),
        };

        if links.is_empty() {
            return Err(GatewayError::NoDataFound("No social links found.".to_string()));
        }
        Ok(links)
    }

    /// Never fails on missing fields; each one reads as "no".
    pub async fn get_audit_report(&self, address: &str) -> Result<AuditReport, GatewayError> {
        let data = self.dextools.get_audit(address.trim()).await?;
        Ok(AuditReport::from_upstream(&data))
    }
}

/// `limit` query value -> pool count. Absent, unparsable or zero means the
/// default of 5.
pub fn resolve_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_TRENDING_LIMIT)
}

fn project_pool(pool: &HotPool) -> TrendingPool {
    let main = pool.main_token.clone().unwrap_or_default();
    let side = pool.side_token.clone().unwrap_or_default();

    TrendingPool {
        price_usd: main.price_usd,
        volume_usd: main.volume_usd,
        url: non_blank(pool.url.clone()),
        ..TrendingPool::new(
            main.name.as_deref(),
            main.symbol.as_deref(),
            side.name.as_deref(),
            side.symbol.as_deref(),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
