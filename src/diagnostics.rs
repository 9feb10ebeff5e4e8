//! Diagnostic sink.
//!
//! The graph reports recoverable anomalies (missing node, missing slot,
//! missing endpoint) through a [`DiagnosticSink`]. Sinks are never consulted
//! for control flow; dropping every record is a valid implementation.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Receiver for soft-failure reports.
pub trait DiagnosticSink: Send + Sync {
    fn log(&self, message: &str, severity: Severity, data: &serde_json::Value);
}

/// Forwards every record to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str, severity: Severity, data: &serde_json::Value) {
        match severity {
            Severity::Debug => tracing::debug!(%data, "{message}"),
            Severity::Info => tracing::info!(%data, "{message}"),
            Severity::Warning => tracing::warn!(%data, "{message}"),
            Severity::Error => tracing::error!(%data, "{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&self, _message: &str, _severity: Severity, _data: &serde_json::Value) {}
}

/// One captured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub data: serde_json::Value,
}

/// Keeps records in memory. Useful for embedders that surface anomalies
/// themselves, and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Return and forget every captured record.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&self, message: &str, severity: Severity, data: &serde_json::Value) {
        self.records.lock().push(Diagnostic {
            message: message.to_string(),
            severity,
            data: data.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_sink_captures_and_drains() {
        let sink = MemorySink::new();
        sink.log("node missing", Severity::Warning, &json!({"id": 3}));
        sink.log("slot missing", Severity::Debug, &json!({"token": "f"}));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[0].data["id"], 3);

        let drained = sink.drain();
        assert_eq!(drained[1].severity, Severity::Debug);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Debug < Severity::Warning);
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }

    #[test]
    fn test_null_and_tracing_sinks_accept_records() {
        NullSink.log("ignored", Severity::Error, &json!(null));
        TracingSink.log("forwarded", Severity::Info, &json!({"k": "v"}));
    }
}
