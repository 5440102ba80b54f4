//! SQLite storage implementation for viewers.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::ViewerRepository;
pub(crate) use repository::parse_user_id;
