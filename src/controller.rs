use log::error;
use uuid::Uuid;

use crate::errors::{FolioError, Result};
use crate::store::ProjectStore;
use crate::types::{ProjectCollection, ProjectRecord};
use crate::view::{ProjectView, StatusLevel};

/// Session state: the in-memory collection exists only between a `load` and
/// the next backend switch. Mutating actions are rejected while Unloaded.
enum State {
    Unloaded,
    Loaded(ProjectCollection),
}

/// Mediates between UI actions and the Store Adapter, holding the one
/// authoritative in-memory collection per session. Every mutation persists
/// the whole collection back to the selected backend; on persist failure the
/// in-memory change is reverted so memory never diverges from storage.
pub struct Controller<V: ProjectView> {
    store: ProjectStore,
    state: State,
    view: V,
}

impl<V: ProjectView> Controller<V> {
    pub fn new(store: ProjectStore, view: V) -> Self {
        Controller {
            store,
            state: State::Unloaded,
            view,
        }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        match &self.state {
            State::Loaded(projects) => projects,
            State::Unloaded => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Re-renders the current list on demand (the `list` action).
    pub fn render(&mut self) {
        self.rerender();
    }

    /// Discards the in-memory collection and returns to Unloaded.
    pub fn select_backend(&mut self, store: ProjectStore) {
        self.store = store;
        self.state = State::Unloaded;
        let message = format!(
            "Data source changed to {}. Please load projects.",
            self.store.label()
        );
        self.view.status(StatusLevel::Info, &message);
    }

    pub async fn load(&mut self) -> Result<()> {
        match self.store.load().await {
            Ok(projects) => {
                let message = format!(
                    "Loaded {} projects from {}",
                    projects.len(),
                    self.store.label()
                );
                self.state = State::Loaded(projects);
                self.rerender();
                self.view.status(StatusLevel::Success, &message);
                Ok(())
            }
            Err(e) => {
                self.report("loading projects", &e);
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, record: ProjectRecord) -> Result<()> {
        match self.try_create(record).await {
            Ok(title) => {
                let message = format!(
                    "Project \"{}\" created successfully ({})",
                    title,
                    self.store.label()
                );
                self.rerender();
                self.view.status(StatusLevel::Success, &message);
                Ok(())
            }
            Err(e) => {
                self.report("creating project", &e);
                Err(e)
            }
        }
    }

    pub async fn update(&mut self, index: usize, record: ProjectRecord) -> Result<()> {
        match self.try_update(index, record).await {
            Ok(title) => {
                let message = format!(
                    "Project \"{}\" updated successfully ({})",
                    title,
                    self.store.label()
                );
                self.rerender();
                self.view.status(StatusLevel::Success, &message);
                Ok(())
            }
            Err(e) => {
                self.report("updating project", &e);
                Err(e)
            }
        }
    }

    /// Returns `Ok(false)` when the confirmation callback declines; nothing
    /// is mutated in that case.
    pub async fn delete<F>(&mut self, index: usize, confirm: F) -> Result<bool>
    where
        F: FnOnce(&ProjectRecord) -> bool,
    {
        match self.try_delete(index, confirm).await {
            Ok(Some(title)) => {
                let message = format!(
                    "Project \"{}\" deleted successfully ({})",
                    title,
                    self.store.label()
                );
                self.rerender();
                self.view.status(StatusLevel::Success, &message);
                Ok(true)
            }
            Ok(None) => {
                self.view.status(StatusLevel::Info, "Delete cancelled.");
                Ok(false)
            }
            Err(e) => {
                self.report("deleting project", &e);
                Err(e)
            }
        }
    }

    async fn try_create(&mut self, mut record: ProjectRecord) -> Result<String> {
        record.validate()?;
        record.normalize();
        record.id = Some(Uuid::new_v4());
        let title = record.title.clone();
        self.collection_mut()?.push(record);
        if let Err(error) = self.persist().await {
            self.collection_mut()?.pop();
            return Err(error);
        }
        Ok(title)
    }

    async fn try_update(&mut self, index: usize, mut record: ProjectRecord) -> Result<String> {
        record.validate()?;
        record.normalize();
        let projects = self.collection_mut()?;
        let len = projects.len();
        if index >= len {
            return Err(FolioError::OutOfBounds { index, len });
        }
        // positional identity stays; the synthetic id survives edits
        record.id = projects[index].id;
        let title = record.title.clone();
        let previous = std::mem::replace(&mut projects[index], record);
        if let Err(error) = self.persist().await {
            self.collection_mut()?[index] = previous;
            return Err(error);
        }
        Ok(title)
    }

    async fn try_delete<F>(&mut self, index: usize, confirm: F) -> Result<Option<String>>
    where
        F: FnOnce(&ProjectRecord) -> bool,
    {
        let projects = self.collection_mut()?;
        let len = projects.len();
        if index >= len {
            return Err(FolioError::OutOfBounds { index, len });
        }
        if !confirm(&projects[index]) {
            return Ok(None);
        }
        let removed = projects.remove(index);
        if let Err(error) = self.persist().await {
            self.collection_mut()?.insert(index, removed);
            return Err(error);
        }
        Ok(Some(removed.title))
    }

    fn collection_mut(&mut self) -> Result<&mut ProjectCollection> {
        match &mut self.state {
            State::Loaded(projects) => Ok(projects),
            State::Unloaded => Err(FolioError::Unloaded),
        }
    }

    async fn persist(&self) -> Result<()> {
        match &self.state {
            State::Loaded(projects) => self.store.save(projects).await,
            State::Unloaded => Err(FolioError::Unloaded),
        }
    }

    fn rerender(&mut self) {
        let projects = match &self.state {
            State::Loaded(projects) => projects.clone(),
            State::Unloaded => Vec::new(),
        };
        self.view.render_list(&projects);
    }

    fn report(&mut self, action: &str, e: &FolioError) {
        error!("error {}: {}", action, e);
        let message = format!("Error {}: {}", action, e);
        self.view.status(StatusLevel::Error, &message);
    }

    #[cfg(test)]
    pub(crate) fn view(&self) -> &V {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LocalStore, RemoteStore};

    use actix_web::{web, App, HttpResponse};
    use tempdir::TempDir;

    #[derive(Default)]
    struct RecordingView {
        statuses: Vec<(StatusLevel, String)>,
        renders: Vec<usize>,
    }

    impl ProjectView for RecordingView {
        fn render_list(&mut self, projects: &[ProjectRecord]) {
            self.renders.push(projects.len());
        }

        fn status(&mut self, level: StatusLevel, message: &str) {
            self.statuses.push((level, message.to_string()));
        }
    }

    fn record(title: &str) -> ProjectRecord {
        ProjectRecord::new(title, "a.png", "A", "d", "#", "")
    }

    fn local_controller(dir: &TempDir) -> Controller<RecordingView> {
        let store = ProjectStore::Local(LocalStore::new(dir.path().join("projects.json")));
        Controller::new(store, RecordingView::default())
    }

    fn on_disk(dir: &TempDir) -> ProjectCollection {
        LocalStore::new(dir.path().join("projects.json"))
            .load()
            .unwrap()
    }

    #[actix_rt::test]
    async fn create_appends_defaults_and_persists() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        ctl.load().await.unwrap();
        assert!(ctl.projects().is_empty());

        ctl.create(record("A")).await.unwrap();
        assert_eq!(ctl.projects().len(), 1);
        let created = &ctl.projects()[0];
        assert_eq!(created.title, "A");
        assert_eq!(created.link_text, "Read More");
        assert!(created.id.is_some());

        assert_eq!(on_disk(&dir).as_slice(), ctl.projects());
        // list re-rendered after load and after create
        assert_eq!(ctl.view().renders, vec![0, 1]);
    }

    #[actix_rt::test]
    async fn mutations_rejected_while_unloaded() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        assert!(matches!(
            ctl.create(record("A")).await,
            Err(FolioError::Unloaded)
        ));
        assert!(matches!(
            ctl.update(0, record("A")).await,
            Err(FolioError::Unloaded)
        ));
        assert!(matches!(
            ctl.delete(0, |_| true).await,
            Err(FolioError::Unloaded)
        ));
    }

    #[actix_rt::test]
    async fn update_replaces_only_target() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        ctl.load().await.unwrap();
        for title in ["A", "B", "C"] {
            ctl.create(record(title)).await.unwrap();
        }
        let old_id = ctl.projects()[1].id;

        ctl.update(1, record("B2")).await.unwrap();
        assert_eq!(ctl.projects().len(), 3);
        assert_eq!(ctl.projects()[0].title, "A");
        assert_eq!(ctl.projects()[1].title, "B2");
        assert_eq!(ctl.projects()[1].id, old_id);
        assert_eq!(ctl.projects()[2].title, "C");
        assert_eq!(on_disk(&dir).as_slice(), ctl.projects());
    }

    #[actix_rt::test]
    async fn update_out_of_bounds_is_reported() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        ctl.load().await.unwrap();
        ctl.create(record("A")).await.unwrap();
        assert!(matches!(
            ctl.update(5, record("X")).await,
            Err(FolioError::OutOfBounds { index: 5, len: 1 })
        ));
        assert_eq!(ctl.projects()[0].title, "A");
    }

    #[actix_rt::test]
    async fn delete_needs_confirmation() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        ctl.load().await.unwrap();
        for title in ["A", "B", "C"] {
            ctl.create(record(title)).await.unwrap();
        }

        let deleted = ctl.delete(1, |_| false).await.unwrap();
        assert!(!deleted);
        assert_eq!(ctl.projects().len(), 3);
        assert_eq!(on_disk(&dir).len(), 3);

        let deleted = ctl
            .delete(1, |doomed| {
                assert_eq!(doomed.title, "B");
                true
            })
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(ctl.projects().len(), 2);
        assert_eq!(ctl.projects()[0].title, "A");
        assert_eq!(ctl.projects()[1].title, "C");
        assert_eq!(on_disk(&dir).as_slice(), ctl.projects());
    }

    #[actix_rt::test]
    async fn switching_backend_discards_state() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        ctl.load().await.unwrap();
        ctl.create(record("A")).await.unwrap();

        let other = TempDir::new("folio-ctl-other").unwrap();
        ctl.select_backend(ProjectStore::Local(LocalStore::new(
            other.path().join("projects.json"),
        )));
        assert!(!ctl.is_loaded());
        assert!(ctl.projects().is_empty());
        assert!(matches!(
            ctl.create(record("B")).await,
            Err(FolioError::Unloaded)
        ));
    }

    #[actix_rt::test]
    async fn invalid_record_is_rejected_before_any_mutation() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let mut ctl = local_controller(&dir);
        ctl.load().await.unwrap();
        let mut bad = record("A");
        bad.title.clear();
        assert!(matches!(
            ctl.create(bad).await,
            Err(FolioError::Validation(_))
        ));
        assert!(ctl.projects().is_empty());
        assert!(on_disk(&dir).is_empty());
    }

    #[actix_rt::test]
    async fn failed_persist_reverts_create() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let path = dir.path().join("blocker").join("projects.json");
        let store = ProjectStore::Local(LocalStore::new(&path));
        let mut ctl = Controller::new(store, RecordingView::default());
        ctl.load().await.unwrap();

        // a plain file where the parent dir should go makes every save fail
        std::fs::write(dir.path().join("blocker"), b"").unwrap();
        assert!(matches!(
            ctl.create(record("A")).await,
            Err(FolioError::Transport(_))
        ));
        assert!(ctl.projects().is_empty());
    }

    #[actix_rt::test]
    async fn failed_persist_reverts_update_and_delete() {
        let dir = TempDir::new("folio-ctl").unwrap();
        let path = dir.path().join("blocker").join("projects.json");
        let store = ProjectStore::Local(LocalStore::new(&path));
        let mut ctl = Controller::new(store, RecordingView::default());
        ctl.load().await.unwrap();
        ctl.create(record("A")).await.unwrap();

        std::fs::remove_dir_all(dir.path().join("blocker")).unwrap();
        std::fs::write(dir.path().join("blocker"), b"").unwrap();

        assert!(matches!(
            ctl.update(0, record("A2")).await,
            Err(FolioError::Transport(_))
        ));
        assert_eq!(ctl.projects()[0].title, "A");

        assert!(matches!(
            ctl.delete(0, |_| true).await,
            Err(FolioError::Transport(_))
        ));
        assert_eq!(ctl.projects().len(), 1);
        assert_eq!(ctl.projects()[0].title, "A");
    }

    #[actix_rt::test]
    async fn failed_remote_load_keeps_prior_state() {
        let srv = actix_test::start(|| {
            App::new().route(
                "/b/broken",
                web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
            )
        });
        let store = ProjectStore::Remote(RemoteStore::new(srv.url("/b/broken"), "key"));
        let mut ctl = Controller::new(store, RecordingView::default());

        assert!(matches!(
            ctl.load().await,
            Err(FolioError::HttpStatus(500))
        ));
        assert!(!ctl.is_loaded());
        assert!(ctl.projects().is_empty());
        assert!(ctl
            .view()
            .statuses
            .iter()
            .any(|(level, message)| *level == StatusLevel::Error
                && message.contains("status: 500")));
    }
}
