//! Records module - read-only snapshots of the portal's domain records.

mod records_model;
mod records_traits;

pub use records_model::{
    ApplicationRecord, ApplicationStatus, AppointmentRecord, AppointmentStatus, ConcernRecord,
    ConcernStatus, PatientRegistrationRecord, RecordSnapshots, RegistrationNotificationRecord,
    RegistrationStatus, ResidentAccountRecord,
};
pub use records_traits::{RecordScope, RecordSourceTrait};
