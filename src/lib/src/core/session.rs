//! # Session
//!
//! Everything the client holds for one open project: the table, its page
//! window, the open panel and confirm dialog, and the last notice. Created
//! by [`Session::open`], dropped when the project is closed.

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::constants::DEFAULT_EXPORT_STEM;
use crate::core::backend::ProjectBackend;
use crate::core::column_order::ColumnOrder;
use crate::core::dispatcher::TransformDispatcher;
use crate::core::history::VersionHistoryController;
use crate::core::pagination::PaginationState;
use crate::core::preview::PreviewChannel;
use crate::error::LoomError;
use crate::model::{ConfirmDialog, DisplayRow, Notice, Operation, Panel, Project, RecordId};
use crate::opts::{ExportOpts, PaginateOpts};
use crate::util;
use crate::view::ProfileResponse;

#[derive(Serialize, Debug, Clone)]
pub struct SessionState {
    pub project: Project,
    pub pagination: PaginationState,
    pub open_panel: Option<Panel>,
    pub confirm: Option<ConfirmDialog>,
    pub notice: Option<Notice>,
    /// Tag of the newest page read, see `TransformDispatcher::fetch_page`
    pub read_generation: u64,
    /// Count of mutations applied on the server, cached history is only
    /// valid for the count it was fetched at
    pub history_generation: u64,
}

pub struct Session {
    state: Arc<RwLock<SessionState>>,
    dispatcher: TransformDispatcher,
    history: VersionHistoryController,
    preview: PreviewChannel,
}

impl Session {
    /// Load page 1 of `project_id`
    pub async fn open(
        backend: Arc<dyn ProjectBackend>,
        project_id: RecordId,
        page_size: usize,
        preview_debounce: Duration,
    ) -> Result<Session, LoomError> {
        let mut pagination = PaginationState::new(page_size)?;
        let page_opts = PaginateOpts::first_page(page_size);
        let response = backend.get_page(&project_id, &page_opts).await?;
        pagination.update_total_rows(response.total_rows());
        log::debug!(
            "opened project {} with {} columns, {} rows",
            project_id,
            response.columns.len(),
            pagination.total_rows()
        );

        let project = Project::from_response(project_id.clone(), response);
        let state = Arc::new(RwLock::new(SessionState {
            project,
            pagination,
            open_panel: None,
            confirm: None,
            notice: None,
            read_generation: 0,
            history_generation: 0,
        }));
        let dispatcher = TransformDispatcher::new(backend.clone(), project_id.clone(), state.clone());
        let history = VersionHistoryController::new(dispatcher.clone(), state.clone());
        let preview = PreviewChannel::new(backend, project_id, preview_debounce);
        Ok(Session {
            state,
            dispatcher,
            history,
            preview,
        })
    }

    pub fn id(&self) -> &RecordId {
        self.dispatcher.project_id()
    }

    pub fn dispatcher(&self) -> &TransformDispatcher {
        &self.dispatcher
    }

    pub fn history(&self) -> &VersionHistoryController {
        &self.history
    }

    pub fn preview(&self) -> &PreviewChannel {
        &self.preview
    }

    /// A copy of everything the view renders from
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn project(&self) -> Project {
        self.state.read().project.clone()
    }

    pub fn pagination(&self) -> PaginationState {
        self.state.read().pagination
    }

    pub fn display_columns(&self) -> Vec<String> {
        self.state.read().project.display_columns()
    }

    pub fn display_rows(&self) -> Vec<DisplayRow> {
        let state = self.state.read();
        state
            .project
            .display_rows(state.pagination.page(), state.pagination.page_size())
    }

    /// Controls that mutate should be disabled while this is true
    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub async fn apply(&self, operation: Operation) -> Result<Project, LoomError> {
        self.dispatcher.apply(operation).await
    }

    /// Fetch page `n`. Out of range pages and stale responses give `None`.
    pub async fn go_to_page(&self, n: usize) -> Result<Option<Project>, LoomError> {
        let page_opts = self.state.read().pagination.go_to_page(n);
        match page_opts {
            Some(page_opts) => self.dispatcher.fetch_page(page_opts).await,
            None => Ok(None),
        }
    }

    /// Change the page size and fetch page 1
    pub async fn set_page_size(&self, page_size: usize) -> Result<Option<Project>, LoomError> {
        let page_opts = self.state.write().pagination.set_page_size(page_size)?;
        self.dispatcher.fetch_page(page_opts).await
    }

    /// Fetch the current page again
    pub async fn reload(&self) -> Result<Option<Project>, LoomError> {
        let page_opts = self.state.read().pagination.opts();
        self.dispatcher.fetch_page(page_opts).await
    }

    /// Drag the data column at display position `source` to `target`, both
    /// 0-based over the data columns. Display only, nothing is sent.
    pub fn reorder_column(&self, source: usize, target: usize) -> Result<(), LoomError> {
        let mut state = self.state.write();
        let column_count = state.project.column_count();
        state.project.column_order.reconcile(column_count);
        state.project.column_order.reorder(source, target)
    }

    /// Replace the display order, `order[display - 1] = backend`
    pub fn set_column_order(&self, order: Vec<usize>) -> Result<(), LoomError> {
        let mut state = self.state.write();
        let column_count = state.project.column_count();
        if order.len() != column_count {
            return Err(LoomError::validation(format!(
                "Column order has {} entries, the table has {column_count} columns",
                order.len()
            )));
        }
        let column_order = ColumnOrder::from_order(order, column_count);
        state.project.column_order = column_order;
        Ok(())
    }

    pub fn open_panel(&self, panel: Panel) {
        self.state.write().open_panel = Some(panel);
    }

    pub fn close_panel(&self) {
        self.state.write().open_panel = None;
    }

    pub fn open_panel_kind(&self) -> Option<Panel> {
        self.state.read().open_panel
    }

    /// The last notice, until it expires
    pub fn notice(&self) -> Option<Notice> {
        let mut state = self.state.write();
        let expired = state
            .notice
            .as_ref()
            .is_some_and(|notice| notice.is_expired(Utc::now()));
        if expired {
            state.notice = None;
        }
        state.notice.clone()
    }

    pub fn dismiss_notice(&self) {
        self.state.write().notice = None;
    }

    /// Download the table into `dir` as `{project name}.{ext}`, or `export.{ext}`
    /// when the project has no name
    pub async fn export_to(&self, dir: impl AsRef<Path>, opts: &ExportOpts) -> Result<PathBuf, LoomError> {
        let bytes = self.dispatcher.backend().export(self.id(), opts).await?;
        let name = util::fs::sanitize_file_stem(&self.state.read().project.name);
        let stem = if name.is_empty() {
            DEFAULT_EXPORT_STEM.to_string()
        } else {
            name
        };
        let path = dir
            .as_ref()
            .join(format!("{stem}.{}", opts.format.extension()));
        util::fs::write_to_path(&path, &bytes)?;
        log::info!("exported project {} to {:?}", self.id(), path);
        Ok(path)
    }

    /// Statistics over the whole table. Not cached, the server profiles the
    /// current table on each call.
    pub async fn profile(&self) -> Result<ProfileResponse, LoomError> {
        match self.dispatcher.backend().profile(self.id()).await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                if err.is_remote() {
                    self.state.write().notice = Some(Notice::from_error(&err));
                }
                Err(err)
            }
        }
    }

    /// Stop pending previews, called when the session is replaced or closed
    pub fn dispose(&self) {
        self.preview.cancel();
        log::debug!("disposed session for project {}", self.id());
    }
}
