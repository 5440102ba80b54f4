//! Database models for portal accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use barangay_portal_core::records::ResidentAccountRecord;
use barangay_portal_core::viewers::{Viewer, ViewerRole};

/// Database model for the portal's `users` table (badge-relevant columns only).
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: i32,
    pub role: String,
    pub street: Option<String>,
    pub purok_endorsement: Option<String>,
    pub valid_id: Option<String>,
    pub account_verified: Option<bool>,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for Viewer {
    fn from(db: UserDB) -> Self {
        Viewer::new(db.id.to_string(), ViewerRole::parse(&db.role))
    }
}

impl From<UserDB> for ResidentAccountRecord {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id.to_string(),
            role: ViewerRole::parse(&db.role),
            account_verified: db.account_verified.unwrap_or(false),
            purok_endorsement: db.purok_endorsement,
            valid_id: db.valid_id,
            street: db.street,
            created_at: db.created_at,
        }
    }
}
