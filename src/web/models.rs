//! Request and Response DTOs for the Web API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AuditReport, SocialLinks, TrendingPoolView};

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Dextools
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    /// Kept as text so a malformed value falls back to the default instead
    /// of rejecting the request.
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub trending: Vec<TrendingPoolView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SocialsResponse {
    pub socials: SocialLinks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditResponse {
    pub audit: AuditReport,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
