//! SQLite storage implementation for notification watermarks.

mod model;
mod repository;

pub use model::NotificationViewDB;
pub use repository::WatermarkRepository;
