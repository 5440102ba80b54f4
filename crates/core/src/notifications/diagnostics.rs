//! Diagnostic sink for recovered badge failures.

use std::fmt;
use std::sync::{Arc, Mutex};

use log::warn;
use serde::Serialize;

use crate::watermarks::NotificationModule;

/// A failure the badge engine recovered from locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeDiagnostic {
    /// The viewer could not be loaded; all-zero badges were served.
    ViewerUnavailable { viewer_id: String, reason: String },
    /// The viewer's role is unknown; the staff view was served.
    UnrecognizedRole { viewer_id: String, role: String },
    /// Watermarks could not be read; every module was reported as zero.
    WatermarksUnavailable { viewer_id: String, reason: String },
    /// One record source failed; its module was reported as zero.
    SourceUnavailable {
        viewer_id: String,
        module: NotificationModule,
        reason: String,
    },
    /// `mark_as_viewed` could not persist the watermark.
    WatermarkWriteFailed {
        viewer_id: String,
        module: NotificationModule,
        reason: String,
    },
}

impl fmt::Display for BadgeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeDiagnostic::ViewerUnavailable { viewer_id, reason } => {
                write!(f, "viewer {} unavailable: {}", viewer_id, reason)
            }
            BadgeDiagnostic::UnrecognizedRole { viewer_id, role } => {
                write!(
                    f,
                    "viewer {} has unrecognized role '{}', serving staff view",
                    viewer_id, role
                )
            }
            BadgeDiagnostic::WatermarksUnavailable { viewer_id, reason } => {
                write!(f, "watermarks of viewer {} unavailable: {}", viewer_id, reason)
            }
            BadgeDiagnostic::SourceUnavailable {
                viewer_id,
                module,
                reason,
            } => write!(
                f,
                "{} records unavailable for viewer {}: {}",
                module, viewer_id, reason
            ),
            BadgeDiagnostic::WatermarkWriteFailed {
                viewer_id,
                module,
                reason,
            } => write!(
                f,
                "failed to mark {} as viewed for viewer {}: {}",
                module, viewer_id, reason
            ),
        }
    }
}

/// Receives diagnostics from the badge service.
///
/// `report()` must be fast and must not fail; the page render waits on it.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: BadgeDiagnostic);
}

/// Writes diagnostics to the `log` facade.
#[derive(Clone, Default)]
pub struct LogDiagnosticSink;

impl DiagnosticSink for LogDiagnosticSink {
    fn report(&self, diagnostic: BadgeDiagnostic) {
        warn!("Notification badges degraded: {}", diagnostic);
    }
}

/// Discards diagnostics.
#[derive(Clone, Default)]
pub struct NoOpDiagnosticSink;

impl DiagnosticSink for NoOpDiagnosticSink {
    fn report(&self, _diagnostic: BadgeDiagnostic) {}
}

/// Mock sink for testing - collects reported diagnostics.
#[derive(Clone, Default)]
pub struct MockDiagnosticSink {
    reported: Arc<Mutex<Vec<BadgeDiagnostic>>>,
}

impl MockDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<BadgeDiagnostic> {
        self.reported
            .lock()
            .map(|reported| reported.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MockDiagnosticSink {
    fn report(&self, diagnostic: BadgeDiagnostic) {
        if let Ok(mut reported) = self.reported.lock() {
            reported.push(diagnostic);
        }
    }
}
