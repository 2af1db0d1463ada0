use tracing::warn;

use super::{Outcome, OutcomeKind, OutputSink, Verbosity};

/// Count of emitted outcomes per kind, regardless of routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub successes: usize,
    pub errors: usize,
    pub infos: usize,
}

impl OutcomeTally {
    fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Success => self.successes += 1,
            OutcomeKind::Error => self.errors += 1,
            OutcomeKind::Info => self.infos += 1,
        }
    }
}

/// Routes outcomes to the console and the optional log sink.
///
/// The two policies are independent: a message reaches a sink iff that
/// sink's [`Verbosity`] admits the message kind.
pub struct Reporter {
    console_policy: Verbosity,
    console: Box<dyn OutputSink>,
    log_policy: Verbosity,
    log: Option<Box<dyn OutputSink>>,
    tally: OutcomeTally,
}

impl Reporter {
    pub fn new(
        console_policy: Verbosity,
        console: Box<dyn OutputSink>,
        log_policy: Verbosity,
        log: Option<Box<dyn OutputSink>>,
    ) -> Self {
        Self {
            console_policy,
            console,
            log_policy,
            log,
            tally: OutcomeTally::default(),
        }
    }

    /// Reporter with a console sink only.
    pub fn console_only(console_policy: Verbosity, console: Box<dyn OutputSink>) -> Self {
        Self::new(console_policy, console, Verbosity::Disabled, None)
    }

    pub fn emit(&mut self, kind: OutcomeKind, message: &str) {
        self.tally.record(kind);

        if self.log_policy.admits(kind) {
            if let Some(log) = self.log.as_mut() {
                if let Err(e) = log.write_line(message) {
                    warn!("Failed to write to run log: {}", e);
                }
            }
        }

        if self.console_policy.admits(kind) {
            if let Err(e) = self.console.write_line(message) {
                warn!("Failed to write to console: {}", e);
            }
        }
    }

    pub fn report(&mut self, outcome: &Outcome) {
        self.emit(outcome.kind, &outcome.message);
    }

    pub fn tally(&self) -> OutcomeTally {
        self.tally
    }
}
