//! Database model for `notification_views`.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One "last viewed" row per (viewer, module).
#[derive(Insertable, Queryable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::notification_views)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NotificationViewDB {
    pub user_id: String,
    pub module: String,
    pub last_viewed: NaiveDateTime,
}
