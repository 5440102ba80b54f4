//! Viewers module - who is looking at the badges.

mod viewers_model;
mod viewers_traits;

pub use viewers_model::{RoleView, Viewer, ViewerRole};
pub use viewers_traits::ViewerRepositoryTrait;
