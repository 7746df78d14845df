//! Verification logging.
//!
//! Every UI action records structured pass/fail/step/info/warn events. The
//! logger is a capability object threaded through constructors rather than a
//! process-wide singleton, so tests can substitute a capturing implementation
//! without touching global state.

use std::sync::Mutex;
use std::time::SystemTime;

/// Severity of a verification event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An action or check is about to be performed
    Step,
    /// An action or check succeeded
    Pass,
    /// An action or check failed
    Fail,
    /// Informational detail
    Info,
    /// Degraded-but-tolerated condition
    Warn,
}

impl Severity {
    /// Get the event label used in log output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded verification event
#[derive(Debug, Clone)]
pub struct VerificationEvent {
    /// Event severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// When the event was recorded
    pub timestamp: SystemTime,
}

impl VerificationEvent {
    /// Create a new event stamped with the current time
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            timestamp: SystemTime::now(),
        }
    }
}

/// Capability trait for recording verification events.
///
/// Implementations must be cheap to call and must never fail: diagnostics
/// must not abort the flow they describe.
pub trait VerificationLog: Send + Sync {
    /// Record an event
    fn record(&self, severity: Severity, message: &str);

    /// Record a step event
    fn step(&self, message: &str) {
        self.record(Severity::Step, message);
    }

    /// Record a pass event
    fn pass(&self, message: &str) {
        self.record(Severity::Pass, message);
    }

    /// Record a fail event
    fn fail(&self, message: &str) {
        self.record(Severity::Fail, message);
    }

    /// Record an info event
    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    /// Record a warn event
    fn warn(&self, message: &str) {
        self.record(Severity::Warn, message);
    }
}

/// Production logger emitting `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing-backed logger
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl VerificationLog for TracingLogger {
    fn record(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Fail => {
                tracing::error!(target: "vitrina", event = severity.as_str(), "{message}");
            }
            Severity::Warn => {
                tracing::warn!(target: "vitrina", event = severity.as_str(), "{message}");
            }
            Severity::Step | Severity::Pass | Severity::Info => {
                tracing::info!(target: "vitrina", event = severity.as_str(), "{message}");
            }
        }
    }
}

/// In-memory logger for tests of the abstraction layer itself.
#[derive(Debug, Default)]
pub struct CapturingLogger {
    events: Mutex<Vec<VerificationEvent>>,
}

impl CapturingLogger {
    /// Create a new capturing logger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded events
    #[must_use]
    pub fn events(&self) -> Vec<VerificationEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Count events with the given severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.events()
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }

    /// Check if any recorded message contains the given fragment
    #[must_use]
    pub fn contains(&self, fragment: &str) -> bool {
        self.events().iter().any(|e| e.message.contains(fragment))
    }

    /// Clear all recorded events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl VerificationLog for CapturingLogger {
    fn record(&self, severity: Severity, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(VerificationEvent::new(severity, message));
        }
    }
}

/// Initialize a process-wide tracing subscriber for test binaries.
///
/// Respects `RUST_LOG`; defaults to `info` for the `vitrina` target. Safe to
/// call more than once — later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitrina=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
