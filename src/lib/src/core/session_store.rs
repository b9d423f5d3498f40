//! # SessionStore
//!
//! Holds the session of the one project that is open. Opening a different
//! project replaces it, closing or deleting the project discards it.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::core::backend::{HttpBackend, ProjectBackend};
use crate::core::session::Session;
use crate::error::LoomError;
use crate::model::{RecentProject, RecordId};
use crate::view::StatusMessage;

pub struct SessionStore {
    backend: Arc<dyn ProjectBackend>,
    page_size: usize,
    preview_debounce: Duration,
    current: Option<Arc<Session>>,
}

impl SessionStore {
    pub fn new(
        backend: Arc<dyn ProjectBackend>,
        page_size: usize,
        preview_debounce: Duration,
    ) -> SessionStore {
        SessionStore {
            backend,
            page_size,
            preview_debounce,
            current: None,
        }
    }

    /// Store talking to the server in `config`
    pub fn from_config(config: &ClientConfig) -> Result<SessionStore, LoomError> {
        config.validate()?;
        let backend = Arc::new(HttpBackend::new(config.clone()));
        Ok(SessionStore::new(
            backend,
            config.default_page_size,
            config.preview_debounce(),
        ))
    }

    /// Session for `project_id`. The open session is reused if it is for the
    /// same project, otherwise a new one replaces it once page 1 has loaded.
    pub async fn open(&mut self, project_id: &RecordId) -> Result<Arc<Session>, LoomError> {
        if let Some(session) = &self.current {
            if session.id() == project_id {
                return Ok(session.clone());
            }
        }

        let session = Session::open(
            self.backend.clone(),
            project_id.clone(),
            self.page_size,
            self.preview_debounce,
        )
        .await?;
        let session = Arc::new(session);
        if let Some(previous) = self.current.replace(session.clone()) {
            previous.dispose();
        }
        Ok(session)
    }

    pub fn current(&self) -> Result<Arc<Session>, LoomError> {
        match &self.current {
            Some(session) => Ok(session.clone()),
            None => Err(LoomError::no_active_session()),
        }
    }

    pub fn is_open(&self, project_id: &RecordId) -> bool {
        self.current
            .as_ref()
            .is_some_and(|session| session.id() == project_id)
    }

    pub fn close(&mut self) {
        if let Some(session) = self.current.take() {
            session.dispose();
        }
    }

    pub async fn recent(&self) -> Result<Vec<RecentProject>, LoomError> {
        self.backend.list_recent().await
    }

    /// Delete the project on the server, closing it first if it is open
    pub async fn delete(&mut self, project_id: &RecordId) -> Result<StatusMessage, LoomError> {
        let status = self.backend.delete(project_id).await?;
        if self.is_open(project_id) {
            self.close();
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{self, FakeBackend};

    fn store(backend: Arc<FakeBackend>) -> SessionStore {
        SessionStore::new(backend, test::TEST_PAGE_SIZE, Duration::from_millis(300))
    }

    #[tokio::test]
    async fn test_open_replace_close() -> Result<(), LoomError> {
        test::init_test_env();
        let backend = Arc::new(FakeBackend::new(3, 10));
        let mut store = store(backend.clone());
        assert!(matches!(store.current(), Err(LoomError::NoActiveSession(_))));

        let first = store.open(&RecordId::from("1")).await?;
        let again = store.open(&RecordId::from("1")).await?;
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(backend.count_calls("get_page"), 1);

        let second = store.open(&RecordId::from("2")).await?;
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(store.current()?.id(), &RecordId::from("2"));

        store.close();
        assert!(store.current().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_open_keeps_current() -> Result<(), LoomError> {
        let backend = Arc::new(FakeBackend::new(3, 10));
        let mut store = store(backend.clone());
        store.open(&RecordId::from("1")).await?;

        backend.fail_next(LoomError::project_not_found("2"));
        let result = store.open(&RecordId::from("2")).await;
        assert!(matches!(result, Err(LoomError::ProjectNotFound(_))));
        assert!(store.is_open(&RecordId::from("1")));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_open_project_disposes() -> Result<(), LoomError> {
        let backend = Arc::new(FakeBackend::new(3, 10));
        let mut store = store(backend.clone());
        store.open(&RecordId::from("1")).await?;

        store.delete(&RecordId::from("7")).await?;
        assert!(store.is_open(&RecordId::from("1")));

        let status = store.delete(&RecordId::from("1")).await?;
        assert!(status.success);
        assert!(store.current().is_err());
        Ok(())
    }
}
