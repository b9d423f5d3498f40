//! # VersionHistoryController
//!
//! Save, revert and undo for the open project. The log and checkpoint lists
//! belong to the server: they are fetched when first needed, cached until
//! the history changes, and never edited locally.

use parking_lot::{Mutex, MutexGuard, RwLock};
use std::sync::Arc;

use crate::core::dispatcher::{Mutation, TransformDispatcher};
use crate::core::session::SessionState;
use crate::error::LoomError;
use crate::model::{undoable_count, Checkpoint, ConfirmDialog, LogEntry, Notice, Project, RecordId};

pub const NOTHING_TO_UNDO_MSG: &str = "Nothing to undo.";

/// State after a successful revert or undo
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryOutcome {
    pub project: Project,
    /// Freshly fetched after the change, `None` if that fetch failed
    pub undoable_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    Undone(HistoryOutcome),
    NothingToUndo,
}

#[derive(Debug, Default)]
struct HistoryCache {
    logs: Option<Vec<LogEntry>>,
    checkpoints: Option<Vec<Checkpoint>>,
    /// Bumped on every invalidation, fetches that started before it are not cached
    generation: u64,
    /// `SessionState::history_generation` the cached lists were fetched at
    valid_for: u64,
}

impl HistoryCache {
    fn clear(&mut self) {
        self.logs = None;
        self.checkpoints = None;
        self.generation += 1;
    }
}

#[derive(Clone)]
pub struct VersionHistoryController {
    dispatcher: TransformDispatcher,
    state: Arc<RwLock<SessionState>>,
    cache: Arc<Mutex<HistoryCache>>,
}

impl VersionHistoryController {
    pub fn new(
        dispatcher: TransformDispatcher,
        state: Arc<RwLock<SessionState>>,
    ) -> VersionHistoryController {
        VersionHistoryController {
            dispatcher,
            state,
            cache: Arc::new(Mutex::new(HistoryCache::default())),
        }
    }

    /// Drop cached logs and checkpoints so the next read goes to the server
    pub fn invalidate(&self) {
        self.cache.lock().clear();
    }

    /// The cache, emptied first if a mutation was applied since it was filled
    fn current_cache(&self) -> MutexGuard<'_, HistoryCache> {
        let history_generation = self.state.read().history_generation;
        let mut cache = self.cache.lock();
        if cache.valid_for != history_generation {
            cache.clear();
            cache.valid_for = history_generation;
        }
        cache
    }

    /// Cached log if there is one, otherwise fetched
    pub async fn logs(&self) -> Result<Vec<LogEntry>, LoomError> {
        let cached = self.current_cache().logs.clone();
        if let Some(logs) = cached {
            return Ok(logs);
        }
        self.refresh_logs().await
    }

    pub async fn refresh_logs(&self) -> Result<Vec<LogEntry>, LoomError> {
        let generation = self.current_cache().generation;
        let logs = self
            .dispatcher
            .backend()
            .list_logs(self.dispatcher.project_id())
            .await?;
        let mut cache = self.current_cache();
        if cache.generation == generation {
            cache.logs = Some(logs.clone());
        }
        Ok(logs)
    }

    /// Cached checkpoints (newest first) if there are any, otherwise fetched
    pub async fn checkpoints(&self) -> Result<Vec<Checkpoint>, LoomError> {
        let cached = self.current_cache().checkpoints.clone();
        if let Some(checkpoints) = cached {
            return Ok(checkpoints);
        }
        let generation = self.current_cache().generation;
        let checkpoints = self
            .dispatcher
            .backend()
            .list_checkpoints(self.dispatcher.project_id())
            .await?;
        let mut cache = self.current_cache();
        if cache.generation == generation {
            cache.checkpoints = Some(checkpoints.clone());
        }
        Ok(checkpoints)
    }

    /// Entries undo can still reverse. Always read from the server, a revert
    /// may have invalidated entries the cache still shows.
    pub async fn undoable_count(&self) -> Result<usize, LoomError> {
        let logs = self.refresh_logs().await?;
        Ok(undoable_count(&logs))
    }

    /// Create a checkpoint of the current state. Stays on the current page.
    pub async fn save(&self, message: impl AsRef<str>) -> Result<Project, LoomError> {
        let message = message.as_ref().trim();
        if message.is_empty() {
            return Err(LoomError::required_field("Commit message"));
        }
        let page_opts = self.state.read().pagination.opts();
        let project = self
            .dispatcher
            .mutate(
                Mutation::Save {
                    message: message.to_string(),
                },
                page_opts,
            )
            .await?;
        self.invalidate();
        Ok(project)
    }

    /// Ask for confirmation before reverting. `None` reverts to the uploaded data.
    pub fn request_revert(&self, checkpoint_id: Option<RecordId>) {
        self.state.write().confirm = Some(ConfirmDialog::Revert { checkpoint_id });
    }

    pub fn cancel_revert(&self) {
        self.state.write().confirm = None;
    }

    pub fn pending_revert(&self) -> Option<ConfirmDialog> {
        self.state.read().confirm.clone()
    }

    /// Send the revert the open confirm dialog is for. The dialog stays open if
    /// the request fails so it can be retried.
    pub async fn confirm_revert(&self) -> Result<HistoryOutcome, LoomError> {
        let checkpoint_id = match self.pending_revert() {
            Some(ConfirmDialog::Revert { checkpoint_id }) => checkpoint_id,
            None => return Err(LoomError::no_revert_requested()),
        };
        let page_opts = self.state.read().pagination.first_page_opts();
        let project = self
            .dispatcher
            .mutate(Mutation::Revert { checkpoint_id }, page_opts)
            .await?;
        self.state.write().confirm = None;
        Ok(self.after_history_change(project).await)
    }

    /// Reverse the most recent unapplied operation. With nothing to undo no
    /// request is sent and an info notice is shown.
    pub async fn undo(&self) -> Result<UndoOutcome, LoomError> {
        if self.dispatcher.is_busy() {
            return Err(LoomError::busy());
        }
        let count = match self.undoable_count().await {
            Ok(count) => count,
            Err(err) => {
                if err.is_remote() {
                    self.state.write().notice = Some(Notice::from_error(&err));
                }
                return Err(err);
            }
        };
        if count == 0 {
            log::debug!("undo on project {} with nothing to undo", self.dispatcher.project_id());
            self.state.write().notice = Some(Notice::info(NOTHING_TO_UNDO_MSG));
            return Ok(UndoOutcome::NothingToUndo);
        }
        let page_opts = self.state.read().pagination.first_page_opts();
        let project = self.dispatcher.mutate(Mutation::Undo, page_opts).await?;
        Ok(UndoOutcome::Undone(self.after_history_change(project).await))
    }

    /// The table was replaced: previews refer to columns that may be gone, the
    /// cached history is stale and the undo count is read again.
    async fn after_history_change(&self, project: Project) -> HistoryOutcome {
        self.state.write().open_panel = None;
        self.invalidate();
        let undoable_count = match self.undoable_count().await {
            Ok(count) => Some(count),
            Err(err) => {
                log::warn!("could not refresh the log after a history change: {err}");
                None
            }
        };
        HistoryOutcome {
            project,
            undoable_count,
        }
    }
}
