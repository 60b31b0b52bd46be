pub mod market;
pub mod token;

// Re-export commonly used types
pub use market::{AuditReport, Flag, SocialLinks, TrendingPool, TrendingPoolView};
pub use token::{HolderEntry, TokenDetail, LIQUIDITY_NOTE};
