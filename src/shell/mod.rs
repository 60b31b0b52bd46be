//! Interactive command shell
//!
//! A single [`Shell`] owns the display log and the state machine below. The
//! runner feeds it input lines and settled gateway calls, one event at a
//! time; nothing else mutates it.
//!
//! ```text
//! Idle --check--------------------------> Busy --settle--> Idle
//! Idle --trending/socials/audit--> AwaitingSecondaryInput --line--> Busy | Idle
//! Idle --help/clear/unknown-------------> Idle
//! ```

pub mod client;
pub mod command;
pub mod log;
pub mod prompt;
pub mod render;
pub mod runner;

use tracing::{debug, warn};

use crate::error::ShellError;

use self::client::{GatewayReply, GatewayRequest};
use self::command::{help_lines, Command};
use self::log::{LogLine, ShellLog};
use self::prompt::{PendingPrompt, Resolution};

pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to the CUBE Terminal!",
    "Type 'help' for a list of commands.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    AwaitingSecondaryInput(PendingPrompt),
    /// A gateway call is outstanding. New input is refused until it settles.
    Busy(GatewayRequest),
}

#[derive(Debug)]
pub struct Shell {
    log: ShellLog,
    state: ShellState,
    holder_display_limit: usize,
    exit_requested: bool,
}

impl Shell {
    pub fn new(holder_display_limit: usize) -> Self {
        let mut log = ShellLog::default();
        log.append_block(WELCOME_LINES.iter().map(|l| LogLine::notice(*l)).collect());

        Self {
            log,
            state: ShellState::Idle,
            holder_display_limit,
            exit_requested: false,
        }
    }

    pub fn log(&self) -> &ShellLog {
        &self.log
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ShellState::Busy(_))
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Handles one line of input. Returns the gateway call to issue, if the
    /// line started one; the shell is then Busy until [`Shell::settle`].
    pub fn submit(&mut self, input: &str) -> Option<GatewayRequest> {
        match std::mem::replace(&mut self.state, ShellState::Idle) {
            ShellState::Busy(request) => {
                debug!("Rejecting input while {:?} is outstanding", request);
                self.state = ShellState::Busy(request);
                self.log
                    .push(LogLine::notice("Still waiting on the previous command. Try again in a moment."));
                None
            }
            ShellState::AwaitingSecondaryInput(prompt) => match prompt.resolve(input) {
                Resolution::Dispatch(request) => Some(self.begin(request)),
                Resolution::Rejected(line) => {
                    self.log.push(line);
                    None
                }
            },
            ShellState::Idle => self.dispatch(input),
        }
    }

    /// Records an input line that could not be decoded. State is unchanged,
    /// so a pending prompt still waits for its line.
    pub fn reject_unreadable_input(&mut self) {
        self.log.push(LogLine::error("Error: input was not valid UTF-8"));
    }

    /// Appends the outcome of the outstanding call and returns to Idle.
    pub fn settle(&mut self, outcome: Result<GatewayReply, ShellError>) {
        if !self.is_busy() {
            warn!("Ignoring a settled call while {:?}", self.state);
            return;
        }

        let block = match outcome {
            Ok(reply) => render::reply_lines(&reply, self.holder_display_limit),
            Err(e) => vec![render::error_line(&e)],
        };
        self.log.append_block(block);
        self.state = ShellState::Idle;
    }

    fn dispatch(&mut self, input: &str) -> Option<GatewayRequest> {
        let command = Command::parse(input)?;
        debug!("Dispatching {:?}", command);

        match command {
            Command::Help => self.log.append_block(help_lines()),
            Command::Clear => self.log.clear(),
            Command::Check(Some(address)) => return Some(self.begin(GatewayRequest::TokenDetail { address })),
            Command::Check(None) => self.log.push(LogLine::error("Usage: check <address>")),
            Command::Trending => self.await_input(PendingPrompt::TrendingSelection),
            Command::Socials => self.await_input(PendingPrompt::SocialsAddress),
            Command::Audit => self.await_input(PendingPrompt::AuditAddress),
            Command::Exit => {
                self.log.push(LogLine::notice("Goodbye."));
                self.exit_requested = true;
            }
            Command::Unknown(name) => self.log.append_block(vec![
                LogLine::error(format!("Unknown command: '{}'", name)),
                LogLine::notice("Type 'help' for a list of commands."),
            ]),
        }
        None
    }

    fn await_input(&mut self, prompt: PendingPrompt) {
        self.log.append_block(prompt.prompt_lines());
        self.state = ShellState::AwaitingSecondaryInput(prompt);
    }

    fn begin(&mut self, request: GatewayRequest) -> GatewayRequest {
        self.log.push(request.progress_line());
        self.state = ShellState::Busy(request.clone());
        request
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use super::client::{GatewayApi, GatewayRequest};
    use crate::error::ShellError;
    use crate::models::{AuditReport, SocialLinks, TokenDetail, TrendingPoolView};

    /// In-memory gateway: serves `pools` (clamped to the requested limit) and
    /// fails every other call with `failure`.
    pub struct FakeGateway {
        pub pools: Vec<TrendingPoolView>,
        pub failure: Option<(u16, String)>,
        pub calls: Mutex<Vec<GatewayRequest>>,
    }

    impl FakeGateway {
        pub fn with_pools(count: usize) -> Self {
            Self {
                pools: (0..count)
                    .map(|i| TrendingPoolView {
                        name: format!("Token{}/Wrapped SOL", i),
                        symbol: format!("T{}/SOL", i),
                        price: "$1.00".to_string(),
                        volume: "$1,000".to_string(),
                        url: "N/A".to_string(),
                    })
                    .collect(),
                failure: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16, message: &str) -> Self {
            Self {
                failure: Some((status, message.to_string())),
                ..Self::with_pools(0)
            }
        }

        fn record(&self, request: GatewayRequest) -> Result<(), ShellError> {
            self.calls.lock().unwrap().push(request);
            match &self.failure {
                Some((status, message)) => Err(ShellError::Gateway {
                    status: *status,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl GatewayApi for FakeGateway {
        async fn token_detail(&self, address: &str) -> Result<TokenDetail, ShellError> {
            self.record(GatewayRequest::TokenDetail { address: address.to_string() })?;
            Err(ShellError::Gateway {
                status: 500,
                message: "Failed to fetch token details.".to_string(),
            })
        }

        async fn trending(&self, limit: usize) -> Result<Vec<TrendingPoolView>, ShellError> {
            self.record(GatewayRequest::Trending { limit })?;
            Ok(self.pools.iter().take(limit).cloned().collect())
        }

        async fn socials(&self, address: &str) -> Result<SocialLinks, ShellError> {
            self.record(GatewayRequest::Socials { address: address.to_string() })?;
            Ok(SocialLinks {
                telegram: Some("https://t.me/example".to_string()),
                ..Default::default()
            })
        }

        async fn audit(&self, address: &str) -> Result<AuditReport, ShellError> {
            self.record(GatewayRequest::Audit { address: address.to_string() })?;
            Ok(AuditReport::default())
        }
    }
}
