//! Territory module - the static street partition shared by the encoder roles.

mod territory_model;
mod territory_table;

pub use territory_model::{EncoderRole, StreetSet, Territory};
pub use territory_table::{all_streets, owner_of, resolve_territory, streets_for};
