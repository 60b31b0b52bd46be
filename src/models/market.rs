use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::{format_usd_price, format_usd_volume, text_or, NOT_AVAILABLE, UNKNOWN};

/// One entry of the hot-pools ranking, after lossy projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingPool {
    pub pair_name: String,        // "Main/Side"
    pub pair_symbol: String,      // "MAIN/SIDE"
    pub price_usd: Option<f64>,
    pub volume_usd: Option<f64>,
    pub url: Option<String>,
}

impl TrendingPool {
    /// Builds the pair labels, substituting `Unknown` / `N/A` for missing
    /// names and symbols.
    pub fn new(
        main_name: Option<&str>,
        main_symbol: Option<&str>,
        side_name: Option<&str>,
        side_symbol: Option<&str>,
    ) -> Self {
        Self {
            pair_name: format!("{}/{}", text_or(main_name, UNKNOWN), text_or(side_name, UNKNOWN)),
            pair_symbol: format!(
                "{}/{}",
                text_or(main_symbol, NOT_AVAILABLE),
                text_or(side_symbol, NOT_AVAILABLE)
            ),
            price_usd: None,
            volume_usd: None,
            url: None,
        }
    }
}

/// Wire form of a trending pool: every field is display-ready text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingPoolView {
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub volume: String,
    pub url: String,
}

impl From<&TrendingPool> for TrendingPoolView {
    fn from(pool: &TrendingPool) -> Self {
        Self {
            name: pool.pair_name.clone(),
            symbol: pool.pair_symbol.clone(),
            price: format_usd_price(pool.price_usd),
            volume: format_usd_volume(pool.volume_usd),
            url: text_or(pool.url.as_deref(), NOT_AVAILABLE),
        }
    }
}

/// Social links of a token. All three absent means "nothing to show".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.telegram.is_none() && self.twitter.is_none() && self.website.is_none()
    }
}

/// Normalized yes/no audit flag. Anything the provider leaves out, or
/// reports in a shape we don't recognise, reads as `No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Yes,
    #[default]
    No,
}

impl Flag {
    pub fn from_upstream(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Flag::Yes,
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("yes") => Flag::Yes,
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => Flag::Yes,
            _ => Flag::No,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Yes => "yes",
            Flag::No => "no",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditReport {
    pub is_honeypot: Flag,
    pub is_mintable: Flag,
    pub slippage_modifiable: Flag,
    pub is_contract_renounced: Flag,
    pub is_potentially_scam: Flag,
}

impl AuditReport {
    /// Reads the five flags out of a provider record, field by field.
    pub fn from_upstream(data: &Value) -> Self {
        Self {
            is_honeypot: Flag::from_upstream(data.get("isHoneypot")),
            is_mintable: Flag::from_upstream(data.get("isMintable")),
            slippage_modifiable: Flag::from_upstream(data.get("slippageModifiable")),
            is_contract_renounced: Flag::from_upstream(data.get("isContractRenounced")),
            is_potentially_scam: Flag::from_upstream(data.get("isPotentiallyScam")),
        }
    }
}
