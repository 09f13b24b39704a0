use awc::Client;
use log::info;
use serde::Deserialize;

use crate::errors::{FolioError, Result};
use crate::types::{ProjectCollection, ProjectRecord};

pub const ACCESS_KEY_HEADER: &str = "X-Access-Key";

/// Remote backend: one hosted JSON document behind GET/PUT, authenticated
/// with a static pre-shared key. Last write wins; concurrent sessions will
/// clobber each other and that is accepted.
#[derive(Clone, Debug)]
pub struct RemoteStore {
    url: String,
    access_key: String,
}

/// The document host wraps GET responses as `{ "record": [...] }`; a plain
/// array is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentEnvelope {
    Wrapped { record: ProjectCollection },
    Bare(ProjectCollection),
}

impl RemoteStore {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        RemoteStore {
            url: url.into(),
            access_key: access_key.into(),
        }
    }

    pub async fn load(&self) -> Result<ProjectCollection> {
        let client = Client::default();
        let mut response = client
            .get(self.url.as_str())
            .insert_header((ACCESS_KEY_HEADER, self.access_key.as_str()))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FolioError::HttpStatus(response.status().as_u16()));
        }
        let body = response.body().await?;
        info!("remote document size: {}", body.len());
        let projects = match serde_json::from_slice::<DocumentEnvelope>(&body)? {
            DocumentEnvelope::Wrapped { record } => record,
            DocumentEnvelope::Bare(projects) => projects,
        };
        info!("loaded {} projects from {}", projects.len(), self.url);
        Ok(projects)
    }

    /// PUTs the bare array; the whole document is replaced on every save.
    pub async fn save(&self, projects: &[ProjectRecord]) -> Result<()> {
        let client = Client::default();
        let response = client
            .put(self.url.as_str())
            .insert_header((ACCESS_KEY_HEADER, self.access_key.as_str()))
            .send_json(&projects)
            .await?;
        if !response.status().is_success() {
            return Err(FolioError::HttpStatus(response.status().as_u16()));
        }
        info!("saved {} projects to {}", projects.len(), self.url);
        Ok(())
    }
}
