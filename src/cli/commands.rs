use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::ChatBackend;
use crate::session::{script, Session};
use crate::utils::format;

pub const BANNER_TITLE: &str = "HubSystem v2.1";
pub const BANNER_LOCATION: &str = "Research Station Perimeter Alpha";

const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

/// Case-insensitive match against the exit keywords. Expects trimmed input.
pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS.iter().any(|k| input.eq_ignore_ascii_case(k))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Keyword,
    EndOfInput,
    Interrupted,
}

/// Interactive loop over a session. `interrupt` is cancelled by the
/// process-level Ctrl+C watcher.
pub struct Shell<B, W> {
    session: Session<B>,
    out: W,
    interrupt: CancellationToken,
}

impl<B: ChatBackend, W: Write> Shell<B, W> {
    pub fn new(session: Session<B>, out: W, interrupt: CancellationToken) -> Self {
        Self { session, out, interrupt }
    }

    pub fn session(&self) -> &Session<B> {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn print_banner(&mut self) -> Result<()> {
        writeln!(self.out, "{}", format::banner(BANNER_TITLE, BANNER_LOCATION))?;
        Ok(())
    }

    /// Submit the maintenance message silently. Returns `false` if the
    /// interrupt fired first. Backend errors propagate.
    pub async fn run_maintenance(&mut self) -> Result<bool> {
        let prompt = script::maintenance_prompt()?;
        let interrupt = self.interrupt.clone();
        let outcome = tokio::select! {
            biased;
            _ = interrupt.cancelled() => None,
            r = self.session.silent_exchange(prompt) => Some(r),
        };
        match outcome {
            Some(result) => {
                result.context("Routine maintenance exchange failed")?;
                info!("routine maintenance complete");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read lines until an exit keyword, end of input, or interrupt. Each
    /// other line (empty ones included) becomes one exchange whose tokens
    /// are written to the output as they arrive.
    pub async fn run<R>(&mut self, input: R) -> Result<ExitReason>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let reason = loop {
            write!(self.out, "\n{} ", format::user_label())?;
            self.out.flush()?;

            let line = tokio::select! {
                biased;
                _ = self.interrupt.cancelled() => None,
                line = lines.next_line() => Some(line.context("Failed to read input")?),
            };
            let line = match line {
                None => break ExitReason::Interrupted,
                Some(None) => break ExitReason::EndOfInput,
                Some(Some(line)) => line,
            };
            let line = line.trim();
            if is_exit_keyword(line) {
                break ExitReason::Keyword;
            }

            if !self.respond(line).await? {
                break ExitReason::Interrupted;
            }
        };
        writeln!(self.out)?;
        self.out.flush()?;
        info!(?reason, "session ended");
        Ok(reason)
    }

    /// One visible exchange. Returns `false` if interrupted mid-stream.
    async fn respond(&mut self, line: &str) -> Result<bool> {
        let Self { session, out, interrupt } = self;

        write!(out, "{} ", format::assistant_label())?;
        out.flush()?;

        let mut write_err: Option<std::io::Error> = None;
        let on_token = |token: &str| {
            if write_err.is_none() {
                if let Err(e) = out.write_all(token.as_bytes()).and_then(|_| out.flush()) {
                    write_err = Some(e);
                }
            }
        };
        let outcome = tokio::select! {
            biased;
            _ = interrupt.cancelled() => None,
            r = session.exchange(line, true, on_token) => Some(r),
        };

        let Some(result) = outcome else {
            writeln!(out)?;
            return Ok(false);
        };
        if let Some(e) = write_err {
            return Err(e).context("Failed to write response");
        }
        let reply = result?;
        writeln!(out)?;
        out.flush()?;
        debug!(chars = reply.chars().count(), "response displayed");
        Ok(true)
    }
}
