use serde::{Deserialize, Serialize};

use crate::format::holder_percentage;

/// Placeholder returned until a DEX-specific liquidity source is wired in.
pub const LIQUIDITY_NOTE: &str = "N/A - requires DEX-specific data";

/// Normalized on-chain view of a token mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetail {
    #[serde(rename = "tokenSupply", default)]
    pub supply: f64,                          // UI amount (decimals applied)
    #[serde(rename = "largestAccounts", default)]
    pub holders: Vec<HolderEntry>,            // Descending by balance
    #[serde(default)]
    pub mint_authority: Option<String>,       // None once revoked
    #[serde(default)]
    pub freeze_authority: Option<String>,
    #[serde(rename = "liquidity", default = "default_liquidity_note")]
    pub liquidity_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderEntry {
    pub address: String,                      // Token account address
    #[serde(rename = "uiAmount", default)]
    pub amount: f64,
    #[serde(rename = "uiAmountString", default)]
    pub amount_display: String,
}

impl TokenDetail {
    /// Percentage of supply held by `holder`; 0 when supply is zero.
    pub fn share_of(&self, holder: &HolderEntry) -> f64 {
        holder_percentage(holder.amount, self.supply)
    }
}

impl HolderEntry {
    /// Display string, falling back to the numeric amount when the provider
    /// sent no preformatted value.
    pub fn display_amount(&self) -> String {
        if self.amount_display.trim().is_empty() {
            self.amount.to_string()
        } else {
            self.amount_display.clone()
        }
    }
}

fn default_liquidity_note() -> String {
    LIQUIDITY_NOTE.to_string()
}
