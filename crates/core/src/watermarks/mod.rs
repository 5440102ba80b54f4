//! Watermarks module - per-viewer, per-module "last viewed" instants.
//!
//! Read state is inferred by comparing record timestamps with these
//! instants; nothing is stored per item.

mod watermarks_model;
mod watermarks_traits;

pub use watermarks_model::{NotificationModule, WatermarkSet};
pub use watermarks_traits::WatermarkRepositoryTrait;
