use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::watermarks::{NotificationModule, WatermarkSet};

/// Storage of "last viewed" instants.
///
/// Absence of a stored row is equivalent to `None`. Writes are upserts with
/// last-write-wins semantics; concurrent writers are not serialized against
/// each other.
#[async_trait]
pub trait WatermarkRepositoryTrait: Send + Sync {
    fn get_watermark(
        &self,
        viewer_id: &str,
        module: NotificationModule,
    ) -> Result<Option<NaiveDateTime>>;

    /// Loads every watermark of a viewer in one read.
    fn get_watermarks(&self, viewer_id: &str) -> Result<WatermarkSet>;

    async fn set_watermark(
        &self,
        viewer_id: &str,
        module: NotificationModule,
        viewed_at: NaiveDateTime,
    ) -> Result<()>;

    /// Removes all watermarks of a viewer. Returns the number of rows removed.
    async fn delete_watermarks(&self, viewer_id: &str) -> Result<usize>;
}
