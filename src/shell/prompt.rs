//! Secondary prompts: commands that need one more line before they can run

use super::client::GatewayRequest;
use super::log::LogLine;

/// What the shell is waiting for. Resolving consumes the prompt, so each
/// one fires exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPrompt {
    TrendingSelection,
    SocialsAddress,
    AuditAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Dispatch(GatewayRequest),
    Rejected(LogLine),
}

/// Menu choice -> number of pools.
pub const TRENDING_CHOICES: [(&str, usize); 3] = [("1", 5), ("2", 10), ("3", 15)];

impl PendingPrompt {
    pub fn prompt_lines(&self) -> Vec<LogLine> {
        match self {
            PendingPrompt::TrendingSelection => std::iter::once(LogLine::heading(
                "Select the number of trending coins to display:",
            ))
            .chain(
                TRENDING_CHOICES
                    .iter()
                    .map(|(choice, limit)| LogLine::plain(format!("{}) Top {}", choice, limit))),
            )
            .collect(),
            PendingPrompt::SocialsAddress => vec![LogLine::heading("Enter contract address to check socials:")],
            PendingPrompt::AuditAddress => vec![LogLine::heading("Enter contract address to check audit:")],
        }
    }

    pub fn resolve(self, input: &str) -> Resolution {
        let input = input.trim();
        match self {
            PendingPrompt::TrendingSelection => match selection_limit(input) {
                Some(limit) => Resolution::Dispatch(GatewayRequest::Trending { limit }),
                None => Resolution::Rejected(LogLine::error("Invalid selection. Try again.")),
            },
            PendingPrompt::SocialsAddress | PendingPrompt::AuditAddress if input.is_empty() => {
                Resolution::Rejected(LogLine::error("No contract address entered."))
            }
            PendingPrompt::SocialsAddress => Resolution::Dispatch(GatewayRequest::Socials {
                address: input.to_string(),
            }),
            PendingPrompt::AuditAddress => Resolution::Dispatch(GatewayRequest::Audit {
                address: input.to_string(),
            }),
        }
    }
}

pub fn selection_limit(choice: &str) -> Option<usize> {
    TRENDING_CHOICES
        .iter()
        .find(|(c, _)| *c == choice.trim())
        .map(|(_, limit)| *limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_mapping() {
        assert_eq!(selection_limit("1"), Some(5));
        assert_eq!(selection_limit(" 2 "), Some(10));
        assert_eq!(selection_limit("3"), Some(15));
        assert_eq!(selection_limit("4"), None);
        assert_eq!(selection_limit(""), None);
    }

    #[test]
    fn test_trending_menu() {
        let lines = PendingPrompt::TrendingSelection.prompt_lines();
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Select the number of trending coins to display:", "1) Top 5", "2) Top 10", "3) Top 15"]
        );
    }

    #[test]
    fn test_resolve_address_prompts() {
        assert_eq!(
            PendingPrompt::AuditAddress.resolve("  Mint1 "),
            Resolution::Dispatch(GatewayRequest::Audit { address: "Mint1".to_string() })
        );
        assert!(matches!(PendingPrompt::SocialsAddress.resolve("   "), Resolution::Rejected(_)));
        assert!(matches!(PendingPrompt::TrendingSelection.resolve("top"), Resolution::Rejected(_)));
    }
}
