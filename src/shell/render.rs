//! Turns gateway replies into log blocks

use crate::error::ShellError;
use crate::format::{NOT_AVAILABLE, UNKNOWN};
use crate::models::{AuditReport, SocialLinks, TokenDetail, TrendingPoolView};

use super::client::GatewayReply;
use super::log::LogLine;

pub fn reply_lines(reply: &GatewayReply, holder_limit: usize) -> Vec<LogLine> {
    match reply {
        GatewayReply::TokenDetail(detail) => token_detail_lines(detail, holder_limit),
        GatewayReply::Trending(pools) => trending_lines(pools),
        GatewayReply::Socials(links) => socials_lines(links),
        GatewayReply::Audit(report) => audit_lines(report),
    }
}

pub fn error_line(error: &ShellError) -> LogLine {
    LogLine::error(format!("Error: {}", error))
}

pub fn token_detail_lines(detail: &TokenDetail, holder_limit: usize) -> Vec<LogLine> {
    let mut lines = vec![
        LogLine::heading("Token Details:"),
        LogLine::plain(format!("  Supply: {}", detail.supply)),
        LogLine::plain(format!(
            "  Mint Authority: {}",
            detail.mint_authority.as_deref().unwrap_or("Revoked or null")
        )),
        LogLine::plain(format!(
            "  Freeze Authority: {}",
            detail.freeze_authority.as_deref().unwrap_or("None")
        )),
        LogLine::plain(format!("  Liquidity: {}", detail.liquidity_note)),
        LogLine::heading(format!("Top {} Largest Accounts:", holder_limit)),
    ];

    lines.extend(detail.holders.iter().take(holder_limit).enumerate().map(|(i, holder)| {
        LogLine::plain(format!(
            "{}. Address: {}, Amount: {} ({:.2}%)",
            i + 1,
            holder.address,
            holder.display_amount(),
            detail.share_of(holder)
        ))
    }));

    lines
}

pub fn trending_lines(pools: &[TrendingPoolView]) -> Vec<LogLine> {
    if pools.is_empty() {
        return vec![LogLine::notice("No trending coins found on Dextools.")];
    }

    let mut lines = vec![LogLine::heading(format!(
        "Top {} Trending Coins on Dextools:",
        pools.len()
    ))];

    lines.extend(pools.iter().enumerate().map(|(i, pool)| {
        LogLine::plain(format!(
            "{}. Name: {} ({}) | Price: {} | Volume: {}",
            i + 1,
            or_default(&pool.name, UNKNOWN),
            or_default(&pool.symbol, NOT_AVAILABLE),
            or_default(&pool.price, NOT_AVAILABLE),
            or_default(&pool.volume, NOT_AVAILABLE),
        ))
    }));

    lines
}

pub fn socials_lines(links: &SocialLinks) -> Vec<LogLine> {
    vec![
        LogLine::heading("Social Links:"),
        LogLine::plain(format!("  Telegram: {}", links.telegram.as_deref().unwrap_or(NOT_AVAILABLE))),
        LogLine::plain(format!("  Twitter: {}", links.twitter.as_deref().unwrap_or(NOT_AVAILABLE))),
        LogLine::plain(format!("  Website: {}", links.website.as_deref().unwrap_or(NOT_AVAILABLE))),
    ]
}

pub fn audit_lines(report: &AuditReport) -> Vec<LogLine> {
    vec![
        LogLine::heading("Audit Information:"),
        LogLine::plain(format!("  Is Honeypot: {}", report.is_honeypot)),
        LogLine::plain(format!("  Is Mintable: {}", report.is_mintable)),
        LogLine::plain(format!("  Slippage Modifiable: {}", report.slippage_modifiable)),
        LogLine::plain(format!("  Is Contract Renounced: {}", report.is_contract_renounced)),
        LogLine::plain(format!("  Is Potentially Scam: {}", report.is_potentially_scam)),
    ]
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
