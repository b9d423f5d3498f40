//! # TransformDispatcher
//!
//! Sends mutations of the open project to the server one at a time. Operations
//! arrive in display coordinates and are translated to backend indices first.
//! A successful response replaces the table wholesale, a failed one leaves it
//! untouched.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::backend::ProjectBackend;
use crate::core::column_order::ColumnOrder;
use crate::core::session::SessionState;
use crate::error::LoomError;
use crate::model::operation::{
    AddColParams, ChangeCellValueParams, DelColParams, FillEmptyParams, RenameColParams,
    RowParams,
};
use crate::model::{BackendOperation, Notice, Operation, Project, RecordId};
use crate::opts::PaginateOpts;
use crate::view::ProjectResponse;

/// Everything that changes the project on the server
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Transform(BackendOperation),
    Save { message: String },
    /// `None` restores the uploaded data
    Revert { checkpoint_id: Option<RecordId> },
    Undo,
}

impl Mutation {
    fn name(&self) -> &'static str {
        match self {
            Mutation::Transform(operation) => operation.operation_type(),
            Mutation::Save { .. } => "save",
            Mutation::Revert { .. } => "revert",
            Mutation::Undo => "undo",
        }
    }

    fn success_message(&self) -> String {
        match self {
            Mutation::Transform(operation) => {
                format!("{} applied", operation.operation_type())
            }
            Mutation::Save { message } => format!("Checkpoint \"{message}\" saved"),
            Mutation::Revert {
                checkpoint_id: Some(checkpoint_id),
            } => format!("Reverted to checkpoint {checkpoint_id}"),
            Mutation::Revert {
                checkpoint_id: None,
            } => String::from("Reverted to the original data"),
            Mutation::Undo => String::from("Last change undone"),
        }
    }
}

/// Marks the session busy for as long as it lives
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<InFlightGuard, LoomError> {
        match flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => Ok(InFlightGuard { flag: flag.clone() }),
            Err(_) => Err(LoomError::busy()),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn absolute_row(row_in_page: usize, row_offset: usize) -> usize {
    row_offset + row_in_page
}

fn check_row(row_in_page: usize, rows_on_page: usize) -> Result<(), LoomError> {
    if row_in_page >= rows_on_page {
        return Err(LoomError::validation(format!(
            "Row {row_in_page} does not exist, the page has {rows_on_page} rows"
        )));
    }
    Ok(())
}

/// Turn a display coordinate operation into the one the server expects.
///
/// Column index fields go through `order`, row index fields are offset by the
/// rows of the pages before the current one. Name based operations pass
/// through unchanged.
pub fn translate(
    operation: Operation,
    order: &ColumnOrder,
    column_count: usize,
    row_offset: usize,
    rows_on_page: usize,
) -> Result<BackendOperation, LoomError> {
    let translated = match operation {
        Operation::AddRow { row_params } => {
            if row_params.index > rows_on_page {
                return Err(LoomError::validation(format!(
                    "Cannot insert at row {}, the page has {rows_on_page} rows",
                    row_params.index
                )));
            }
            Operation::AddRow {
                row_params: RowParams {
                    index: absolute_row(row_params.index, row_offset),
                },
            }
        }
        Operation::DelRow { row_params } => {
            check_row(row_params.index, rows_on_page)?;
            Operation::DelRow {
                row_params: RowParams {
                    index: absolute_row(row_params.index, row_offset),
                },
            }
        }
        Operation::AddCol { col_params } => Operation::AddCol {
            col_params: AddColParams {
                index: order.insert_position(col_params.index, column_count)?,
                name: col_params.name,
            },
        },
        Operation::DelCol { col_params } => Operation::DelCol {
            col_params: DelColParams {
                index: order.to_backend(col_params.index, column_count)?,
            },
        },
        Operation::RenameCol { rename_col_params } => Operation::RenameCol {
            rename_col_params: RenameColParams {
                col_index: order.to_backend(rename_col_params.col_index, column_count)?,
                new_name: rename_col_params.new_name,
            },
        },
        Operation::ChangeCellValue { change_cell_value } => {
            let col_index = order.to_backend(change_cell_value.col_index, column_count)?;
            check_row(change_cell_value.row_index, rows_on_page)?;
            Operation::ChangeCellValue {
                change_cell_value: ChangeCellValueParams {
                    col_index,
                    row_index: absolute_row(change_cell_value.row_index, row_offset),
                    fill_value: change_cell_value.fill_value,
                },
            }
        }
        Operation::FillEmpty { fill_empty_params } => {
            let index = match fill_empty_params.index {
                Some(display_index) => Some(order.to_backend(display_index, column_count)?),
                None => None,
            };
            Operation::FillEmpty {
                fill_empty_params: FillEmptyParams {
                    index,
                    fill_value: fill_empty_params.fill_value,
                },
            }
        }
        // Column names are unaffected by the display order
        op @ (Operation::Filter { .. }
        | Operation::Sort { .. }
        | Operation::DropDuplicate { .. }
        | Operation::AdvQueryFilter { .. }
        | Operation::PivotTables { .. }
        | Operation::CastDataType { .. }
        | Operation::TrimWhitespace { .. }
        | Operation::StringReplace { .. }
        | Operation::Melt { .. }
        | Operation::Sample { .. }
        | Operation::Groupby { .. }) => op,
    };
    Ok(BackendOperation::from_translated(translated))
}

#[derive(Clone)]
pub struct TransformDispatcher {
    backend: Arc<dyn ProjectBackend>,
    project_id: RecordId,
    state: Arc<RwLock<SessionState>>,
    in_flight: Arc<AtomicBool>,
}

impl TransformDispatcher {
    pub fn new(
        backend: Arc<dyn ProjectBackend>,
        project_id: RecordId,
        state: Arc<RwLock<SessionState>>,
    ) -> TransformDispatcher {
        TransformDispatcher {
            backend,
            project_id,
            state,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn backend(&self) -> &Arc<dyn ProjectBackend> {
        &self.backend
    }

    pub fn project_id(&self) -> &RecordId {
        &self.project_id
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Translate against the table as it is right now
    pub fn translate(&self, operation: Operation) -> Result<BackendOperation, LoomError> {
        let state = self.state.read();
        translate(
            operation,
            &state.project.column_order,
            state.project.column_count(),
            state.pagination.offset(),
            state.project.rows.len(),
        )
    }

    /// Validate, translate and send one transform. Operations that can reorder
    /// or resize the row set come back on page 1, value edits keep the page.
    /// Translation happens under the in-flight guard so the indices sent match
    /// the table no other mutation can replace meanwhile.
    pub async fn apply(&self, operation: Operation) -> Result<Project, LoomError> {
        operation.validate()?;
        let guard = InFlightGuard::acquire(&self.in_flight)?;
        let resets_pagination = operation.resets_pagination();
        let backend_operation = self.translate(operation)?;
        let page_opts = {
            let state = self.state.read();
            if resets_pagination {
                state.pagination.first_page_opts()
            } else {
                state.pagination.opts()
            }
        };
        self.send(Mutation::Transform(backend_operation), page_opts, guard)
            .await
    }

    /// Send `mutation` and replace the table with the response. Rejected with
    /// `Busy` while another mutation is in flight.
    pub async fn mutate(
        &self,
        mutation: Mutation,
        page_opts: PaginateOpts,
    ) -> Result<Project, LoomError> {
        let guard = InFlightGuard::acquire(&self.in_flight)?;
        self.send(mutation, page_opts, guard).await
    }

    /// Holds `_guard` until the response is applied
    async fn send(
        &self,
        mutation: Mutation,
        page_opts: PaginateOpts,
        _guard: InFlightGuard,
    ) -> Result<Project, LoomError> {
        log::debug!(
            "dispatcher::mutate {} on project {} page {:?}",
            mutation.name(),
            self.project_id,
            page_opts
        );

        let result = match &mutation {
            Mutation::Transform(operation) => {
                self.backend
                    .transform(&self.project_id, operation, &page_opts)
                    .await
            }
            Mutation::Save { message } => {
                self.backend
                    .save(&self.project_id, message, &page_opts)
                    .await
            }
            Mutation::Revert { checkpoint_id } => {
                self.backend
                    .revert(&self.project_id, checkpoint_id.as_ref(), &page_opts)
                    .await
            }
            Mutation::Undo => self.backend.undo(&self.project_id, &page_opts).await,
        };

        match result {
            Ok(response) => {
                let project = {
                    let mut state = self.state.write();
                    // Page reads still in flight predate this snapshot, and
                    // the server has logged a new entry
                    state.read_generation += 1;
                    state.history_generation += 1;
                    replace(&mut state, response, &page_opts)
                };
                log::info!("{} applied to project {}", mutation.name(), self.project_id);
                self.state.write().notice = Some(Notice::success(mutation.success_message()));
                Ok(project)
            }
            Err(err) => {
                log::debug!("{} failed on project {}: {err}", mutation.name(), self.project_id);
                if err.is_remote() {
                    self.state.write().notice = Some(Notice::from_error(&err));
                }
                Err(err)
            }
        }
    }

    /// Read a page. `None` when a newer read or a mutation completed while
    /// this one was in flight, the response is then dropped.
    pub async fn fetch_page(&self, page_opts: PaginateOpts) -> Result<Option<Project>, LoomError> {
        let generation = {
            let mut state = self.state.write();
            state.read_generation += 1;
            state.read_generation
        };

        let response = self.backend.get_page(&self.project_id, &page_opts).await?;

        let mut state = self.state.write();
        if state.read_generation != generation {
            log::warn!(
                "discarding stale page {} of project {}",
                page_opts.page_num,
                self.project_id
            );
            return Ok(None);
        }
        Ok(Some(replace(&mut state, response, &page_opts)))
    }
}

/// Swap in a server snapshot
fn replace(state: &mut SessionState, response: ProjectResponse, page_opts: &PaginateOpts) -> Project {
    let total_rows = response.total_rows();
    state.project.replace_with(response);
    state.pagination.update_total_rows(total_rows);
    state.pagination.set_page(page_opts);
    state.project.clone()
}
