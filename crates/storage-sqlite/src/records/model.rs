//! Database models for the portal records read by the badge counts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use barangay_portal_core::records::{
    ApplicationRecord, ApplicationStatus, AppointmentRecord, AppointmentStatus, ConcernRecord,
    ConcernStatus, PatientRegistrationRecord, RegistrationNotificationRecord, RegistrationStatus,
};

/// An application joined with its applicant's street.
#[derive(Queryable, PartialEq, Debug, Clone)]
pub struct ApplicationRowDB {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub street: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub processed_date: Option<NaiveDateTime>,
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::community_concerns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConcernDB {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub admin_response: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub processed_date: Option<NaiveDateTime>,
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AppointmentDB {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::patient_registrations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PatientRegistrationDB {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::patient_registration_notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RegistrationNotificationDB {
    pub id: i32,
    pub user_id: i32,
    pub registration_id: Option<i32>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

// Conversion to domain models
impl From<ApplicationRowDB> for ApplicationRecord {
    fn from(db: ApplicationRowDB) -> Self {
        Self {
            id: db.id.to_string(),
            applicant_id: db.user_id.to_string(),
            status: ApplicationStatus::parse(&db.status),
            street: db.street,
            created_at: db.created_at,
            updated_at: db.updated_at,
            processed_at: db.processed_date,
        }
    }
}

impl From<ConcernDB> for ConcernRecord {
    fn from(db: ConcernDB) -> Self {
        Self {
            id: db.id.to_string(),
            reporter_id: db.user_id.to_string(),
            status: ConcernStatus::parse(&db.status),
            admin_response: db.admin_response,
            created_at: db.created_at,
            updated_at: db.updated_at,
            processed_at: db.processed_date,
        }
    }
}

impl From<AppointmentDB> for AppointmentRecord {
    fn from(db: AppointmentDB) -> Self {
        Self {
            id: db.id.to_string(),
            patient_id: db.user_id.to_string(),
            status: AppointmentStatus::parse(&db.status),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<PatientRegistrationDB> for PatientRegistrationRecord {
    fn from(db: PatientRegistrationDB) -> Self {
        Self {
            id: db.id.to_string(),
            patient_id: db.user_id.to_string(),
            status: RegistrationStatus::parse(&db.status),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<RegistrationNotificationDB> for RegistrationNotificationRecord {
    fn from(db: RegistrationNotificationDB) -> Self {
        Self {
            id: db.id.to_string(),
            recipient_id: db.user_id.to_string(),
            registration_id: db.registration_id.map(|id| id.to_string()),
            is_read: db.is_read,
            created_at: db.created_at,
        }
    }
}
