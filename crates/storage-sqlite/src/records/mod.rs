//! SQLite storage implementation for the record snapshots the badges count.

mod model;
mod repository;

pub use model::{
    ApplicationRowDB, AppointmentDB, ConcernDB, PatientRegistrationDB, RegistrationNotificationDB,
};
pub use repository::RecordRepository;
