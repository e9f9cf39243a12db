use serde::Serialize;
use std::sync::Mutex;

/// Category of a classification diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A value no bucket could represent; stored as its description.
    UnsupportedValue,
    /// An array whose element type could not be established; stored as an
    /// empty string array.
    UntypedArray,
}

/// Record emitted when the classifier takes a lossy fallback path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Key whose value triggered the fallback.
    pub key: String,
    /// Which fallback was taken.
    pub kind: DiagnosticKind,
    /// Description of the offending value.
    pub detail: String,
}

/// Observer for classification diagnostics.
///
/// Classification itself never fails; the fallback paths report here so
/// operators can audit unexpected shapes.
pub trait Diagnostics {
    /// Receives one diagnostic record.
    fn record(&self, diagnostic: Diagnostic);
}

/// Discards every diagnostic. The default observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            key = %diagnostic.key,
            kind = ?diagnostic.kind,
            detail = %diagnostic.detail,
            "lossy fallback during classification"
        );
    }
}

/// Collects diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        if let Ok(mut records) = self.records.lock() {
            records.push(diagnostic);
        }
    }
}
