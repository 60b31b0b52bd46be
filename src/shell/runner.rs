//! Event loop that drives a [`Shell`] from an input stream
//!
//! Input lines and settled gateway calls arrive on one task and are applied
//! to the shell strictly one at a time. Gateway calls run on spawned tasks
//! and report back over a channel.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::ShellError;

use super::client::{execute, GatewayApi, GatewayReply, GatewayRequest};
use super::log::{LineStyle, ShellLog};
use super::{Shell, ShellState};

type Outcome = Result<GatewayReply, ShellError>;

/// Runs one gateway call with an overall deadline. `check` results are held
/// back for `check_delay` either way, so the shell stays busy meanwhile.
pub async fn run_request(
    api: &dyn GatewayApi,
    request: &GatewayRequest,
    timeout: Duration,
    check_delay: Duration,
) -> Outcome {
    let outcome = match tokio::time::timeout(timeout, execute(api, request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ShellError::Timeout(timeout)),
    };

    if matches!(request, GatewayRequest::TokenDetail { .. }) && !check_delay.is_zero() {
        tokio::time::sleep(check_delay).await;
    }

    outcome
}

/// Reads lines from `input` until EOF or `exit`, writing the log to `output`
/// as it grows. On EOF an outstanding call is still awaited and rendered.
///
/// With `ansi` set, lines are colored and prompts are drawn.
pub async fn run<R, W>(
    mut shell: Shell,
    api: Arc<dyn GatewayApi>,
    config: &ShellConfig,
    input: R,
    mut output: W,
    ansi: bool,
) -> Result<Shell>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut lines = input.split(b'\n');
    let mut input_open = true;
    let mut renderer = Renderer::new(ansi);

    renderer.render(&shell, &mut output)?;

    loop {
        // An outstanding call is always awaited before leaving.
        if !shell.is_busy() && (shell.exit_requested() || !input_open) {
            break;
        }

        tokio::select! {
            segment = lines.next_segment(), if input_open => match segment? {
                Some(bytes) => match String::from_utf8(bytes) {
                    Ok(line) => {
                        if let Some(request) = shell.submit(line.trim_end_matches('\r')) {
                            spawn_request(&api, request, config, tx.clone());
                        }
                    }
                    Err(e) => {
                        warn!("Discarding unreadable input line: {}", e);
                        shell.reject_unreadable_input();
                    }
                },
                None => {
                    debug!("Input closed");
                    input_open = false;
                }
            },
            Some(outcome) = rx.recv() => shell.settle(outcome),
        }

        renderer.render(&shell, &mut output)?;
    }

    info!("Shell finished");
    Ok(shell)
}

fn spawn_request(
    api: &Arc<dyn GatewayApi>,
    request: GatewayRequest,
    config: &ShellConfig,
    tx: mpsc::UnboundedSender<Outcome>,
) {
    let api = Arc::clone(api);
    let timeout = config.request_timeout();
    let check_delay = config.check_display_delay();

    tokio::spawn(async move {
        let call = tokio::spawn(async move {
            run_request(&*api, &request, timeout, check_delay).await
        });
        // A panicking call must still settle, or the shell would stay busy.
        let outcome = call
            .await
            .unwrap_or_else(|e| Err(ShellError::Transport(format!("Request task failed: {}", e))));
        let _ = tx.send(outcome);
    });
}

/// Writes whatever the log gained since the last call.
struct Renderer {
    ansi: bool,
    rendered: usize,
    clears: u64,
}

impl Renderer {
    fn new(ansi: bool) -> Self {
        Self {
            ansi,
            rendered: 0,
            clears: 0,
        }
    }

    fn render<W: Write>(&mut self, shell: &Shell, out: &mut W) -> Result<()> {
        let log: &ShellLog = shell.log();

        if log.clears() != self.clears {
            self.clears = log.clears();
            self.rendered = 0;
            if self.ansi {
                write!(out, "\x1b[2J\x1b[H")?;
            }
        }

        if self.ansi && self.rendered < log.len() {
            // Move off the prompt drawn last time.
            write!(out, "\r\x1b[K")?;
        }

        for line in &log.lines()[self.rendered.min(log.len())..] {
            if self.ansi {
                writeln!(out, "{}{}\x1b[0m", color(line.style), line.text)?;
            } else {
                writeln!(out, "{}", line.text)?;
            }
        }
        self.rendered = log.len();

        if self.ansi {
            match shell.state() {
                ShellState::Idle => write!(out, "\x1b[36mλ\x1b[0m ")?,
                ShellState::AwaitingSecondaryInput(_) => write!(out, "\x1b[36m>\x1b[0m ")?,
                ShellState::Busy(_) => write!(out, "\x1b[2mLoading...\x1b[0m")?,
            }
        }

        out.flush()?;
        Ok(())
    }
}

fn color(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Plain => "",
        LineStyle::Heading => "\x1b[1m",
        LineStyle::Command => "\x1b[32m",
        LineStyle::Notice => "\x1b[33m",
        LineStyle::Error => "\x1b[31m",
    }
}
