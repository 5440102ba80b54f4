use crate::errors::Result;
use crate::records::{
    ApplicationRecord, AppointmentRecord, ConcernRecord, PatientRegistrationRecord,
    RegistrationNotificationRecord, ResidentAccountRecord,
};

/// Which records a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope<'a> {
    All,
    /// Only records submitted by (or addressed to) this account.
    OwnedBy(&'a str),
}

/// Read-only access to the portal's domain records, one query per module.
///
/// Each method fails independently; a failure only affects the badge of the
/// module it feeds.
pub trait RecordSourceTrait: Send + Sync {
    fn load_applications(&self, scope: RecordScope<'_>) -> Result<Vec<ApplicationRecord>>;

    fn load_concerns(&self, scope: RecordScope<'_>) -> Result<Vec<ConcernRecord>>;

    /// Resident accounts that are not yet verified.
    fn load_verification_candidates(&self) -> Result<Vec<ResidentAccountRecord>>;

    fn load_appointments(&self, scope: RecordScope<'_>) -> Result<Vec<AppointmentRecord>>;

    fn load_patient_registrations(
        &self,
        scope: RecordScope<'_>,
    ) -> Result<Vec<PatientRegistrationRecord>>;

    fn load_registration_notifications(
        &self,
        recipient_id: &str,
    ) -> Result<Vec<RegistrationNotificationRecord>>;
}
