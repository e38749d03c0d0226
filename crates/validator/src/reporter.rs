//! Leveled narration for validation runs
//!
//! A [`Reporter`] is handed to each validator at construction. It forwards
//! messages to `tracing` only when its numeric level admits them, so a quiet
//! reporter (level 0) silences a run without touching its result.

/// Tracing target used for per-check narration
pub const TEST_TARGET: &str = "expfactory::test";

/// Message severity, ordered from always-shown to most chatty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning = 1,
    Info = 2,
    Test = 3,
    Debug = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporter {
    level: u8,
}

impl Reporter {
    pub const QUIET: u8 = 0;
    pub const DEFAULT_LEVEL: u8 = Severity::Info as u8;
    pub const MAX_LEVEL: u8 = Severity::Debug as u8;

    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(Self::MAX_LEVEL),
        }
    }

    pub fn quiet() -> Self {
        Self::new(Self::QUIET)
    }

    /// Build from the `quiet` flag validators historically accepted
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet { Self::quiet() } else { Self::default() }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_quiet(&self) -> bool {
        self.level == Self::QUIET
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        self.level >= severity as u8
    }

    pub fn warning(&self, message: &str) {
        if self.enabled(Severity::Warning) {
            tracing::warn!("{}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.enabled(Severity::Info) {
            tracing::info!("{}", message);
        }
    }

    /// Narrate a single check attempt
    pub fn test(&self, message: &str) {
        if self.enabled(Severity::Test) {
            tracing::info!(target: TEST_TARGET, "{}", message);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.enabled(Severity::Debug) {
            tracing::debug!("{}", message);
        }
    }

    /// Report why a check failed
    pub fn failure(&self, reason: &str) {
        if !self.is_quiet() {
            tracing::error!("{}", reason);
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVEL)
    }
}
