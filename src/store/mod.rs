//! Store Adapter: symmetrical load/save over two interchangeable backends.
//!
//! Both operations are non-atomic and not safe against concurrent writers;
//! two open sessions silently clobber each other's last write.

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::errors::Result;
use crate::types::{ProjectCollection, ProjectRecord};

/// The backend currently selected by the UI. Exactly one is active at a
/// time; collections are never merged across backends.
#[derive(Clone, Debug)]
pub enum ProjectStore {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl ProjectStore {
    /// Human-readable backend name for status messages.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStore::Local(_) => "Local Storage",
            ProjectStore::Remote(_) => "Remote Server",
        }
    }

    pub async fn load(&self) -> Result<ProjectCollection> {
        match self {
            ProjectStore::Local(store) => store.load(),
            ProjectStore::Remote(store) => store.load().await,
        }
    }

    pub async fn save(&self, projects: &[ProjectRecord]) -> Result<()> {
        match self {
            ProjectStore::Local(store) => store.save(projects),
            ProjectStore::Remote(store) => store.save(projects).await,
        }
    }
}
