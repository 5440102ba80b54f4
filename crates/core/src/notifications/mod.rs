//! Notifications module - unread-count aggregation for the portal badges.
//!
//! Counts are recomputed on every read by comparing record timestamps with
//! the viewer's per-module watermarks, scoped by role and territory.

mod aggregator;
mod badge_service;
mod diagnostics;
mod notifications_model;
mod predicates;


pub use aggregator::compute_counts;
pub use badge_service::{BadgeService, BadgeServiceTrait};
pub use diagnostics::{
    BadgeDiagnostic, DiagnosticSink, LogDiagnosticSink, MockDiagnosticSink, NoOpDiagnosticSink,
};
pub use notifications_model::CountResult;
pub use predicates::{predicate_table, CountPredicate, ModuleRule, PredicateTable, RecordSource};
