//! Helpers for our unit and integration tests
//!

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use env_logger::Env;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::ClientConfig;
use crate::core::backend::ProjectBackend;
use crate::core::session::Session;
use crate::error::LoomError;
use crate::model::{
    BackendOperation, Cell, ChartColumn, ChartData, Checkpoint, LogEntry, Operation,
    RecentProject, RecordId,
};
use crate::opts::{ChartOpts, ExportOpts, PaginateOpts};
use crate::view::profile::{ColumnProfile, DatasetSummary, ProfileDtype};
use crate::view::{ProfileResponse, ProjectResponse, StatusMessage};

pub const TEST_PROJECT_ID: &str = "42";
pub const TEST_PAGE_SIZE: usize = 10;

pub fn init_test_env() {
    let env = Env::default();
    if env_logger::try_init_from_env(env).is_ok() {
        log::debug!("Logger initialized");
    }
}

/// Client config pointing at a mock server url
pub fn config_for_url(url: impl AsRef<str>) -> ClientConfig {
    ClientConfig::for_host(url)
}

pub fn test_timestamp(minutes: i64) -> NaiveDateTime {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap_or_default();
    start + Duration::minutes(minutes)
}

pub fn log_entry(id: usize, action_type: &str, applied: bool) -> LogEntry {
    LogEntry {
        id: RecordId::from(id.to_string()),
        action_type: action_type.to_string(),
        action_details: None,
        timestamp: test_timestamp(id as i64),
        checkpoint_id: None,
        applied,
    }
}

/// Column names `c0..c{n}`
pub fn column_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("c{i}")).collect()
}

/// In-memory server. Keeps a table of `columns` x `total_rows`, the log and
/// checkpoints, and records every call so tests can assert what was sent.
pub struct FakeBackend {
    state: Mutex<FakeState>,
    /// When set, mutations wait for `release()` before answering
    gated: AtomicBool,
    gate: Notify,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[derive(Default)]
struct FakeState {
    columns: Vec<String>,
    total_rows: usize,
    logs: Vec<LogEntry>,
    checkpoints: Vec<Checkpoint>,
    sent: Vec<BackendOperation>,
    calls: Vec<String>,
    fail_next: Option<LoomError>,
    next_log_id: usize,
}

impl FakeBackend {
    pub fn new(column_count: usize, total_rows: usize) -> FakeBackend {
        FakeBackend {
            state: Mutex::new(FakeState {
                columns: column_names(column_count),
                total_rows,
                next_log_id: 1,
                ..FakeState::default()
            }),
            gated: AtomicBool::new(false),
            gate: Notify::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Hold every mutation until `release()`
    pub fn hold_mutations(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.gated.store(false, Ordering::SeqCst);
        self.gate.notify_waiters();
        self.gate.notify_one();
    }

    /// The next request that reaches the server fails with `err`
    pub fn fail_next(&self, err: LoomError) {
        self.state.lock().fail_next = Some(err);
    }

    pub fn set_logs(&self, logs: Vec<LogEntry>) {
        self.state.lock().logs = logs;
    }

    pub fn set_checkpoints(&self, checkpoints: Vec<Checkpoint>) {
        self.state.lock().checkpoints = checkpoints;
    }

    pub fn sent(&self) -> Vec<BackendOperation> {
        self.state.lock().sent.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == name).count()
    }

    pub fn columns(&self) -> Vec<String> {
        self.state.lock().columns.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: &str) -> Result<(), LoomError> {
        let mut state = self.state.lock();
        state.calls.push(call.to_string());
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn enter_mutation(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if self.gated.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
    }

    fn exit_mutation(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn page(&self, page_opts: &PaginateOpts) -> ProjectResponse {
        let state = self.state.lock();
        page_of(&state.columns, state.total_rows, page_opts)
    }

    fn push_log(state: &mut FakeState, action_type: &str) {
        let id = state.next_log_id;
        state.next_log_id += 1;
        state.logs.push(log_entry(id, action_type, false));
    }

    fn apply(state: &mut FakeState, operation: &Operation) {
        match operation {
            Operation::AddCol { col_params } => {
                let index = col_params.index.min(state.columns.len());
                state.columns.insert(index, col_params.name.to_owned());
            }
            Operation::DelCol { col_params } => {
                if col_params.index < state.columns.len() {
                    state.columns.remove(col_params.index);
                }
            }
            Operation::RenameCol { rename_col_params } => {
                if let Some(column) = state.columns.get_mut(rename_col_params.col_index) {
                    column.clone_from(&rename_col_params.new_name);
                }
            }
            Operation::AddRow { .. } => state.total_rows += 1,
            Operation::DelRow { .. } => state.total_rows = state.total_rows.saturating_sub(1),
            Operation::Filter { .. } | Operation::AdvQueryFilter { .. } => {
                state.total_rows /= 2;
            }
            _ => {}
        }
    }

    async fn mutation(
        &self,
        call: &str,
        page_opts: &PaginateOpts,
        apply: impl FnOnce(&mut FakeState),
    ) -> Result<ProjectResponse, LoomError> {
        self.enter_mutation().await;
        let result = self.record(call);
        self.exit_mutation();
        result?;
        {
            let mut state = self.state.lock();
            apply(&mut state);
        }
        Ok(self.page(page_opts))
    }
}

/// The rows of one page of a `columns` x `total_rows` table. Cell values are
/// `r{row}_{column}` so tests can check which rows came back.
pub fn page_of(columns: &[String], total_rows: usize, page_opts: &PaginateOpts) -> ProjectResponse {
    let start = (page_opts.page_num.max(1) - 1) * page_opts.page_size;
    let end = (start + page_opts.page_size).min(total_rows);
    let rows: Vec<Vec<Cell>> = (start..end)
        .map(|r| {
            columns
                .iter()
                .map(|c| Cell::String(format!("r{r}_{c}")))
                .collect()
        })
        .collect();
    let dtypes: BTreeMap<String, String> = columns
        .iter()
        .map(|c| (c.to_owned(), String::from("object")))
        .collect();
    ProjectResponse {
        project_id: Some(RecordId::from(TEST_PROJECT_ID)),
        filename: Some(String::from("people.csv")),
        columns: columns.to_vec(),
        rows,
        dtypes: Some(dtypes),
        row_count: Some(total_rows),
        ..ProjectResponse::default()
    }
}

#[async_trait]
impl ProjectBackend for FakeBackend {
    async fn get_page(
        &self,
        _project_id: &RecordId,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        // Let concurrent reads interleave like real requests would
        tokio::task::yield_now().await;
        self.record("get_page")?;
        Ok(self.page(page_opts))
    }

    async fn transform(
        &self,
        _project_id: &RecordId,
        operation: &BackendOperation,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        let operation = operation.clone();
        self.mutation("transform", page_opts, move |state| {
            FakeBackend::apply(state, operation.operation());
            FakeBackend::push_log(state, operation.operation_type());
            state.sent.push(operation);
        })
        .await
    }

    async fn save(
        &self,
        _project_id: &RecordId,
        commit_message: &str,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        let message = commit_message.to_string();
        self.mutation("save", page_opts, move |state| {
            let id = state.checkpoints.len() + 1;
            state.checkpoints.push(Checkpoint {
                id: RecordId::from(id.to_string()),
                message,
                created_at: test_timestamp(100 + id as i64),
            });
            for log in state.logs.iter_mut() {
                log.applied = true;
            }
        })
        .await
    }

    async fn revert(
        &self,
        _project_id: &RecordId,
        _checkpoint_id: Option<&RecordId>,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        self.mutation("revert", page_opts, |state| {
            state.logs.retain(|log| log.applied);
        })
        .await
    }

    async fn undo(
        &self,
        _project_id: &RecordId,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        self.mutation("undo", page_opts, |state| {
            if let Some(pos) = state.logs.iter().rposition(|log| !log.applied) {
                state.logs.remove(pos);
            }
        })
        .await
    }

    async fn list_logs(&self, _project_id: &RecordId) -> Result<Vec<LogEntry>, LoomError> {
        self.record("list_logs")?;
        Ok(self.state.lock().logs.clone())
    }

    async fn list_checkpoints(&self, _project_id: &RecordId) -> Result<Vec<Checkpoint>, LoomError> {
        self.record("list_checkpoints")?;
        let mut checkpoints = self.state.lock().checkpoints.clone();
        crate::model::checkpoint::sort_newest_first(&mut checkpoints);
        Ok(checkpoints)
    }

    async fn export(&self, _project_id: &RecordId, opts: &ExportOpts) -> Result<Bytes, LoomError> {
        self.record("export")?;
        let state = self.state.lock();
        let mut csv = String::new();
        if opts.include_header {
            csv.push_str(&state.columns.join(","));
            csv.push('\n');
        }
        Ok(Bytes::from(csv))
    }

    async fn chart_columns(&self, _project_id: &RecordId) -> Result<Vec<ChartColumn>, LoomError> {
        self.record("chart_columns")?;
        let state = self.state.lock();
        Ok(state
            .columns
            .iter()
            .map(|name| ChartColumn {
                name: name.to_owned(),
                dtype: String::from("categorical"),
            })
            .collect())
    }

    async fn chart_data(
        &self,
        _project_id: &RecordId,
        opts: &ChartOpts,
    ) -> Result<ChartData, LoomError> {
        self.record("chart_data")?;
        Ok(ChartData {
            chart_type: opts.chart_type.as_str().to_string(),
            data: serde_json::json!([{"x": opts.x_column, "y": 1}]),
            x_column: opts.x_column.to_owned(),
            y_column: opts.y_column.clone(),
            grouped: None,
            series: None,
        })
    }

    async fn profile(&self, _project_id: &RecordId) -> Result<ProfileResponse, LoomError> {
        self.record("profile")?;
        let state = self.state.lock();
        Ok(ProfileResponse {
            summary: DatasetSummary {
                row_count: state.total_rows,
                column_count: state.columns.len(),
                missing_count: 0,
                memory_usage_bytes: (state.total_rows * state.columns.len() * 8) as u64,
                duplicate_row_count: 0,
            },
            columns: state
                .columns
                .iter()
                .map(|name| ColumnProfile {
                    name: name.to_owned(),
                    dtype: ProfileDtype::Categorical,
                    missing_count: 0,
                    missing_percentage: 0.0,
                    unique_count: state.total_rows,
                    numeric_stats: None,
                    categorical_stats: None,
                })
                .collect(),
        })
    }

    async fn list_recent(&self) -> Result<Vec<RecentProject>, LoomError> {
        self.record("list_recent")?;
        Ok(vec![RecentProject {
            project_id: RecordId::from(TEST_PROJECT_ID),
            name: String::from("people"),
            description: None,
            last_modified: test_timestamp(0),
        }])
    }

    async fn delete(&self, _project_id: &RecordId) -> Result<StatusMessage, LoomError> {
        self.record("delete")?;
        Ok(StatusMessage {
            success: true,
            message: Some(String::from("Project deleted")),
        })
    }
}

/// # Run a test against a session on an in-memory server
///
/// Opens project `TEST_PROJECT_ID` with `column_count` columns and
/// `total_rows` rows at a page size of `TEST_PAGE_SIZE`.
///
/// ```ignore
/// test::run_session_test(4, 30, |session, backend| async move {
///     session.apply(Operation::del_col(1)).await?;
///     assert_eq!(backend.columns().len(), 3);
///     Ok(())
/// })
/// .await
/// ```
pub async fn run_session_test<T, Fut>(
    column_count: usize,
    total_rows: usize,
    test: T,
) -> Result<(), LoomError>
where
    T: FnOnce(Session, Arc<FakeBackend>) -> Fut,
    Fut: Future<Output = Result<(), LoomError>>,
{
    init_test_env();
    let backend = Arc::new(FakeBackend::new(column_count, total_rows));
    let session = Session::open(
        backend.clone(),
        RecordId::from(TEST_PROJECT_ID),
        TEST_PAGE_SIZE,
        std::time::Duration::from_millis(crate::constants::DEFAULT_PREVIEW_DEBOUNCE_MS),
    )
    .await?;
    test(session, backend).await
}
