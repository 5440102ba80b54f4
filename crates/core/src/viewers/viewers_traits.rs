use crate::errors::Result;
use crate::viewers::Viewer;

/// Read access to the accounts owned by the surrounding portal.
pub trait ViewerRepositoryTrait: Send + Sync {
    /// Loads a viewer by id. `Ok(None)` when no such account exists.
    fn get_viewer(&self, viewer_id: &str) -> Result<Option<Viewer>>;
}
