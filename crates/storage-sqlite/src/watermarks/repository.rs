use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use barangay_portal_core::watermarks::{
    NotificationModule, WatermarkRepositoryTrait, WatermarkSet,
};
use barangay_portal_core::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;

use super::model::NotificationViewDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::notification_views;

pub struct WatermarkRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WatermarkRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WatermarkRepository { pool, writer }
    }
}

#[async_trait]
impl WatermarkRepositoryTrait for WatermarkRepository {
    fn get_watermark(
        &self,
        viewer_id: &str,
        module: NotificationModule,
    ) -> Result<Option<NaiveDateTime>> {
        let mut conn = get_connection(&self.pool)?;
        notification_views::table
            .filter(notification_views::user_id.eq(viewer_id))
            .filter(notification_views::module.eq(module.as_str()))
            .select(notification_views::last_viewed)
            .first::<NaiveDateTime>(&mut conn)
            .optional()
            .into_core()
    }

    fn get_watermarks(&self, viewer_id: &str) -> Result<WatermarkSet> {
        let mut conn = get_connection(&self.pool)?;
        let rows = notification_views::table
            .filter(notification_views::user_id.eq(viewer_id))
            .select(NotificationViewDB::as_select())
            .load::<NotificationViewDB>(&mut conn)
            .into_core()?;

        let mut marks = WatermarkSet::new();
        for row in rows {
            match NotificationModule::from_str(&row.module) {
                Ok(module) => marks.set(module, row.last_viewed),
                Err(_) => warn!(
                    "Ignoring watermark for unknown module '{}' (viewer {})",
                    row.module, row.user_id
                ),
            }
        }
        Ok(marks)
    }

    async fn set_watermark(
        &self,
        viewer_id: &str,
        module: NotificationModule,
        viewed_at: NaiveDateTime,
    ) -> Result<()> {
        let row = NotificationViewDB {
            user_id: viewer_id.to_string(),
            module: module.as_str().to_string(),
            last_viewed: viewed_at,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(notification_views::table)
                    .values(&row)
                    .on_conflict((notification_views::user_id, notification_views::module))
                    .do_update()
                    .set(notification_views::last_viewed.eq(row.last_viewed))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete_watermarks(&self, viewer_id: &str) -> Result<usize> {
        let viewer_id = viewer_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    notification_views::table.filter(notification_views::user_id.eq(viewer_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
