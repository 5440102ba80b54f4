//! Barangay Portal Core - notification badge engine.
//!
//! This crate contains the counting rules, street territories and the
//! badge service used by the portal's page headers. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod notifications;
pub mod records;
pub mod territory;
pub mod viewers;
pub mod watermarks;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
