use std::sync::Arc;

use barangay_portal_core::records::{
    ApplicationRecord, AppointmentRecord, ConcernRecord, PatientRegistrationRecord, RecordScope,
    RecordSourceTrait, RegistrationNotificationRecord, ResidentAccountRecord,
};
use barangay_portal_core::Result;
use diesel::prelude::*;

use super::model::{
    ApplicationRowDB, AppointmentDB, ConcernDB, PatientRegistrationDB, RegistrationNotificationDB,
};
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::{
    applications, appointments, community_concerns, patient_registration_notifications,
    patient_registrations, users,
};
use crate::viewers::{parse_user_id, UserDB};

/// Read-only source of the record snapshots. Every load is a single query
/// on a pooled connection.
pub struct RecordRepository {
    pool: Arc<DbPool>,
}

enum Owner {
    Anyone,
    User(i32),
    /// The scope names an id no account can have.
    Nobody,
}

impl From<RecordScope<'_>> for Owner {
    fn from(scope: RecordScope<'_>) -> Self {
        match scope {
            RecordScope::All => Owner::Anyone,
            RecordScope::OwnedBy(viewer_id) => match parse_user_id(viewer_id) {
                Some(user_id) => Owner::User(user_id),
                None => Owner::Nobody,
            },
        }
    }
}

impl RecordRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RecordRepository { pool }
    }
}

impl RecordSourceTrait for RecordRepository {
    fn load_applications(&self, scope: RecordScope<'_>) -> Result<Vec<ApplicationRecord>> {
        let mut query = applications::table
            .left_join(users::table)
            .select((
                applications::id,
                applications::user_id,
                applications::status,
                users::street.nullable(),
                applications::created_at,
                applications::updated_at,
                applications::processed_date,
            ))
            .into_boxed();
        match Owner::from(scope) {
            Owner::Anyone => {}
            Owner::User(user_id) => query = query.filter(applications::user_id.eq(user_id)),
            Owner::Nobody => return Ok(Vec::new()),
        }

        let mut conn = get_connection(&self.pool)?;
        let rows = query.load::<ApplicationRowDB>(&mut conn).into_core()?;
        Ok(rows.into_iter().map(ApplicationRecord::from).collect())
    }

    fn load_concerns(&self, scope: RecordScope<'_>) -> Result<Vec<ConcernRecord>> {
        let mut query = community_concerns::table
            .select(ConcernDB::as_select())
            .into_boxed();
        match Owner::from(scope) {
            Owner::Anyone => {}
            Owner::User(user_id) => query = query.filter(community_concerns::user_id.eq(user_id)),
            Owner::Nobody => return Ok(Vec::new()),
        }

        let mut conn = get_connection(&self.pool)?;
        let rows = query.load::<ConcernDB>(&mut conn).into_core()?;
        Ok(rows.into_iter().map(ConcernRecord::from).collect())
    }

    fn load_verification_candidates(&self) -> Result<Vec<ResidentAccountRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .filter(
                users::account_verified
                    .is_null()
                    .or(users::account_verified.eq(false)),
            )
            .filter(users::purok_endorsement.is_not_null())
            .filter(users::valid_id.is_not_null())
            .select(UserDB::as_select())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(ResidentAccountRecord::from).collect())
    }

    fn load_appointments(&self, scope: RecordScope<'_>) -> Result<Vec<AppointmentRecord>> {
        let mut query = appointments::table
            .select(AppointmentDB::as_select())
            .into_boxed();
        match Owner::from(scope) {
            Owner::Anyone => {}
            Owner::User(user_id) => query = query.filter(appointments::user_id.eq(user_id)),
            Owner::Nobody => return Ok(Vec::new()),
        }

        let mut conn = get_connection(&self.pool)?;
        let rows = query.load::<AppointmentDB>(&mut conn).into_core()?;
        Ok(rows.into_iter().map(AppointmentRecord::from).collect())
    }

    fn load_patient_registrations(
        &self,
        scope: RecordScope<'_>,
    ) -> Result<Vec<PatientRegistrationRecord>> {
        let mut query = patient_registrations::table
            .select(PatientRegistrationDB::as_select())
            .into_boxed();
        match Owner::from(scope) {
            Owner::Anyone => {}
            Owner::User(user_id) => {
                query = query.filter(patient_registrations::user_id.eq(user_id))
            }
            Owner::Nobody => return Ok(Vec::new()),
        }

        let mut conn = get_connection(&self.pool)?;
        let rows = query.load::<PatientRegistrationDB>(&mut conn).into_core()?;
        Ok(rows
            .into_iter()
            .map(PatientRegistrationRecord::from)
            .collect())
    }

    fn load_registration_notifications(
        &self,
        recipient_id: &str,
    ) -> Result<Vec<RegistrationNotificationRecord>> {
        let Some(user_id) = parse_user_id(recipient_id) else {
            return Ok(Vec::new());
        };
        let mut conn = get_connection(&self.pool)?;
        let rows = patient_registration_notifications::table
            .filter(patient_registration_notifications::user_id.eq(user_id))
            .filter(patient_registration_notifications::is_read.eq(false))
            .select(RegistrationNotificationDB::as_select())
            .load::<RegistrationNotificationDB>(&mut conn)
            .into_core()?;
        Ok(rows
            .into_iter()
            .map(RegistrationNotificationRecord::from)
            .collect())
    }
}
