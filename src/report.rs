//! Diagnostics reporting for the grouping pass.
//!
//! The builder reports coverage gaps (missing input, ineligible frames,
//! unmatched calibration) through an explicit sink rather than logging
//! directly, so callers can capture severities and messages.

use tracing::{error, info};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected operational condition, processing continues
    Info,
    /// Nothing to process
    Critical,
}

/// One diagnostic emitted during grouping
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }
}

/// Receiver for diagnostics emitted by the data set builder
pub trait ReportSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the tracing subscriber
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => info!("{}", diagnostic.message),
            Severity::Critical => error!("{}", diagnostic.message),
        }
    }
}

/// Collects diagnostics in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub diagnostics: Vec<Diagnostic>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics at the given severity
    pub fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// True if any collected message contains the given fragment
    pub fn contains(&self, fragment: &str) -> bool {
        self.diagnostics.iter().any(|d| d.message.contains(fragment))
    }
}

impl ReportSink for MemorySink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_by_severity() {
        let mut sink = MemorySink::new();
        sink.report(Diagnostic::info("no flats for obj1.fits"));
        sink.report(Diagnostic::critical("no input data"));

        assert_eq!(sink.diagnostics.len(), 2);
        assert_eq!(sink.with_severity(Severity::Info).len(), 1);
        assert_eq!(sink.with_severity(Severity::Critical).len(), 1);
        assert!(sink.contains("no input data"));
        assert!(!sink.contains("no darks"));
    }
}
