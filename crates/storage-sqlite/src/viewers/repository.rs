use std::sync::Arc;

use barangay_portal_core::viewers::{Viewer, ViewerRepositoryTrait};
use barangay_portal_core::Result;
use diesel::prelude::*;

use super::model::UserDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct ViewerRepository {
    pool: Arc<DbPool>,
}

impl ViewerRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ViewerRepository { pool }
    }
}

/// Portal user ids are integers; anything else cannot name an account.
pub(crate) fn parse_user_id(viewer_id: &str) -> Option<i32> {
    viewer_id.trim().parse().ok()
}

impl ViewerRepositoryTrait for ViewerRepository {
    fn get_viewer(&self, viewer_id: &str) -> Result<Option<Viewer>> {
        let Some(user_id) = parse_user_id(viewer_id) else {
            return Ok(None);
        };
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(Viewer::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use barangay_portal_core::territory::EncoderRole;
    use barangay_portal_core::viewers::ViewerRole;
    use tempfile::tempdir;

    fn setup() -> (ViewerRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        (ViewerRepository::new(Arc::clone(&pool)), pool, temp_dir)
    }

    fn insert_user(pool: &DbPool, role: &str) -> i32 {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        diesel::insert_into(users::table)
            .values((
                users::role.eq(role),
                users::created_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .returning(users::id)
            .get_result(&mut conn)
            .expect("Failed to insert user")
    }

    #[test]
    fn test_get_viewer_maps_role_column() {
        let (repo, pool, _dir) = setup();
        let staff = insert_user(&pool, "admin");
        let encoder = insert_user(&pool, "encoder2");
        let odd = insert_user(&pool, "treasurer");

        let viewer = repo.get_viewer(&staff.to_string()).unwrap().unwrap();
        assert_eq!(viewer.role, ViewerRole::BarangayStaff);

        let viewer = repo.get_viewer(&encoder.to_string()).unwrap().unwrap();
        assert_eq!(viewer.role, ViewerRole::Encoder(EncoderRole::Encoder2));

        let viewer = repo.get_viewer(&odd.to_string()).unwrap().unwrap();
        assert!(!viewer.role.is_recognized());
    }

    #[test]
    fn test_get_viewer_unknown_ids() {
        let (repo, _pool, _dir) = setup();
        assert!(repo.get_viewer("9999").unwrap().is_none());
        assert!(repo.get_viewer("not-a-number").unwrap().is_none());
    }
}
