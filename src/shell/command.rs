//! Top-level command table

use super::log::{LineStyle, LogLine};

/// Name and description of every command, in help order.
pub const COMMAND_TABLE: &[(&str, &str)] = &[
    ("help", "Show available commands"),
    ("clear", "Clear the terminal"),
    ("check <address>", "Check token details (supply, distribution, mint authority)"),
    ("trending", "Fetch top trending coins from Dextools"),
    ("socials", "Fetch social links of a token"),
    ("audit", "Fetch security audit of a token"),
    ("exit", "Leave the terminal"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    /// `None` when the argument count is wrong.
    Check(Option<String>),
    Trending,
    Socials,
    Audit,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parses one trimmed, non-empty line. Names match case-sensitively.
    pub fn parse(input: &str) -> Option<Command> {
        let mut words = input.split_whitespace();
        let name = words.next()?;
        let args: Vec<&str> = words.collect();

        Some(match name {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "check" => match args.as_slice() {
                [address] => Command::Check(Some(address.to_string())),
                _ => Command::Check(None),
            },
            "trending" => Command::Trending,
            "socials" => Command::Socials,
            "audit" => Command::Audit,
            "exit" | "quit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        })
    }
}

pub fn help_lines() -> Vec<LogLine> {
    std::iter::once(LogLine::heading("Available commands:"))
        .chain(
            COMMAND_TABLE
                .iter()
                .map(|(name, description)| LogLine::new(format!("  {:<20}{}", name, description), LineStyle::Command)),
        )
        .collect()
}
