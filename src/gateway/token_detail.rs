//! Best-effort composition of a token detail from independent RPC sub-queries.

use solana_account_decoder::parse_token::UiTokenAmount;
use tracing::warn;

use crate::error::GatewayError;
use crate::models::{HolderEntry, TokenDetail, LIQUIDITY_NOTE};
use crate::solana::client::{MintAuthorities, TokenAccountBalance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubQuery {
    Supply,
    LargestAccounts,
    MintInfo,
}

impl SubQuery {
    pub const ALL: [SubQuery; 3] = [SubQuery::Supply, SubQuery::LargestAccounts, SubQuery::MintInfo];
}

// Fallback table: what each field reads as when its sub-query fails.
pub const SUPPLY_FALLBACK: f64 = 0.0;
pub const HOLDERS_FALLBACK: Vec<HolderEntry> = Vec::new();
pub const AUTHORITIES_FALLBACK: MintAuthorities = MintAuthorities {
    mint_authority: None,
    freeze_authority: None,
};

/// Raw outcomes of the three sub-queries, before fallbacks are applied.
#[derive(Debug)]
pub struct TokenDetailParts {
    pub supply: Result<UiTokenAmount, GatewayError>,
    pub largest_accounts: Result<Vec<TokenAccountBalance>, GatewayError>,
    pub authorities: Result<MintAuthorities, GatewayError>,
}

impl TokenDetailParts {
    /// Applies the fallback table field by field. Fails only when every
    /// sub-query failed.
    pub fn assemble(self, mint: &str) -> Result<TokenDetail, GatewayError> {
        let mut failed = Vec::with_capacity(SubQuery::ALL.len());

        let supply = settle(mint, SubQuery::Supply, self.supply, &mut failed)
            .map(|s| ui_value(&s))
            .unwrap_or(SUPPLY_FALLBACK);

        let holders = settle(mint, SubQuery::LargestAccounts, self.largest_accounts, &mut failed)
            .map(into_holders)
            .unwrap_or(HOLDERS_FALLBACK);

        let authorities =
            settle(mint, SubQuery::MintInfo, self.authorities, &mut failed).unwrap_or(AUTHORITIES_FALLBACK);

        if failed.len() == SubQuery::ALL.len() {
            return Err(GatewayError::UpstreamUnavailable(mint.to_string()));
        }

        Ok(TokenDetail {
            supply,
            holders,
            mint_authority: authorities.mint_authority,
            freeze_authority: authorities.freeze_authority,
            liquidity_note: LIQUIDITY_NOTE.to_string(),
        })
    }
}

fn settle<T>(
    mint: &str,
    query: SubQuery,
    result: Result<T, GatewayError>,
    failed: &mut Vec<SubQuery>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{:?} sub-query failed for {}: {}; using fallback", query, mint, e);
            failed.push(query);
            None
        }
    }
}

// uiAmount can be null for very large amounts; fall back to the string form.
fn ui_value(amount: &UiTokenAmount) -> f64 {
    amount
        .ui_amount
        .or_else(|| amount.ui_amount_string.trim().parse().ok())
        .unwrap_or(0.0)
}

fn into_holders(accounts: Vec<TokenAccountBalance>) -> Vec<HolderEntry> {
    let mut holders: Vec<HolderEntry> = accounts
        .into_iter()
        .map(|account| HolderEntry {
            amount: ui_value(&account.amount),
            amount_display: account.amount.ui_amount_string,
            address: account.address,
        })
        .collect();

    holders.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    holders
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINT: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    fn amount(ui: Option<f64>, ui_string: &str) -> UiTokenAmount {
        serde_json::from_value(serde_json::json!({
            "uiAmount": ui,
            "decimals": 0,
            "amount": ui_string,
            "uiAmountString": ui_string,
        }))
        .unwrap()
    }

    fn balance(address: &str, ui: f64) -> TokenAccountBalance {
        TokenAccountBalance {
            address: address.to_string(),
            amount: amount(Some(ui), &ui.to_string()),
        }
    }

    fn rpc_failure() -> GatewayError {
        GatewayError::TransportError("connection refused".to_string())
    }

    #[test]
    fn test_all_parts_succeed() {
        let parts = TokenDetailParts {
            supply: Ok(amount(Some(1_000_000.0), "1000000")),
            largest_accounts: Ok(vec![balance("Small", 400_000.0), balance("Big", 600_000.0)]),
            authorities: Ok(MintAuthorities {
                mint_authority: Some("Auth".to_string()),
                freeze_authority: None,
            }),
        };

        let detail = parts.assemble(MINT).unwrap();
        assert_eq!(detail.supply, 1_000_000.0);
        assert_eq!(detail.holders[0].address, "Big");
        assert_eq!(detail.holders[1].address, "Small");
        assert_eq!(detail.mint_authority.as_deref(), Some("Auth"));
        assert_eq!(detail.liquidity_note, LIQUIDITY_NOTE);
    }

    #[test]
    fn test_partial_failure_uses_fallbacks() {
        let parts = TokenDetailParts {
            supply: Err(rpc_failure()),
            largest_accounts: Ok(vec![balance("Only", 10.0)]),
            authorities: Err(rpc_failure()),
        };

        let detail = parts.assemble(MINT).unwrap();
        assert_eq!(detail.supply, SUPPLY_FALLBACK);
        assert_eq!(detail.holders.len(), 1);
        assert_eq!(detail.mint_authority, None);
        assert_eq!(detail.freeze_authority, None);
        assert_eq!(detail.share_of(&detail.holders[0]), 0.0);
    }

    #[test]
    fn test_every_failure_is_unavailable() {
        let parts = TokenDetailParts {
            supply: Err(rpc_failure()),
            largest_accounts: Err(rpc_failure()),
            authorities: Err(rpc_failure()),
        };

        assert!(matches!(parts.assemble(MINT), Err(GatewayError::UpstreamUnavailable(_))));
    }

    #[test]
    fn test_null_ui_amount_reads_string_form() {
        assert_eq!(ui_value(&amount(None, "123.5")), 123.5);
        assert_eq!(ui_value(&amount(None, "")), 0.0);
    }
}
