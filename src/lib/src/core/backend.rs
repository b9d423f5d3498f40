//! The seam between the controllers and the server. `HttpBackend` forwards to
//! `api::client`, tests swap in an in-memory implementation.

use async_trait::async_trait;
use bytes::Bytes;

use crate::api;
use crate::config::ClientConfig;
use crate::error::LoomError;
use crate::model::{
    BackendOperation, ChartColumn, ChartData, Checkpoint, LogEntry, RecentProject, RecordId,
};
use crate::opts::{ChartOpts, ExportOpts, PaginateOpts};
use crate::view::{ProfileResponse, ProjectResponse, StatusMessage};

#[async_trait]
pub trait ProjectBackend: Send + Sync {
    async fn get_page(
        &self,
        project_id: &RecordId,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError>;

    async fn transform(
        &self,
        project_id: &RecordId,
        operation: &BackendOperation,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError>;

    async fn save(
        &self,
        project_id: &RecordId,
        commit_message: &str,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError>;

    async fn revert(
        &self,
        project_id: &RecordId,
        checkpoint_id: Option<&RecordId>,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError>;

    async fn undo(
        &self,
        project_id: &RecordId,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError>;

    async fn list_logs(&self, project_id: &RecordId) -> Result<Vec<LogEntry>, LoomError>;

    async fn list_checkpoints(&self, project_id: &RecordId) -> Result<Vec<Checkpoint>, LoomError>;

    async fn export(&self, project_id: &RecordId, opts: &ExportOpts) -> Result<Bytes, LoomError>;

    async fn chart_columns(&self, project_id: &RecordId) -> Result<Vec<ChartColumn>, LoomError>;

    async fn chart_data(
        &self,
        project_id: &RecordId,
        opts: &ChartOpts,
    ) -> Result<ChartData, LoomError>;

    async fn profile(&self, project_id: &RecordId) -> Result<ProfileResponse, LoomError>;

    async fn list_recent(&self) -> Result<Vec<RecentProject>, LoomError>;

    async fn delete(&self, project_id: &RecordId) -> Result<StatusMessage, LoomError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> HttpBackend {
        HttpBackend { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl ProjectBackend for HttpBackend {
    async fn get_page(
        &self,
        project_id: &RecordId,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        api::client::projects::get(&self.config, project_id, page_opts).await
    }

    async fn transform(
        &self,
        project_id: &RecordId,
        operation: &BackendOperation,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        api::client::transform::transform(&self.config, project_id, operation, page_opts).await
    }

    async fn save(
        &self,
        project_id: &RecordId,
        commit_message: &str,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        api::client::transform::save(&self.config, project_id, commit_message, page_opts).await
    }

    async fn revert(
        &self,
        project_id: &RecordId,
        checkpoint_id: Option<&RecordId>,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        api::client::transform::revert(&self.config, project_id, checkpoint_id, page_opts).await
    }

    async fn undo(
        &self,
        project_id: &RecordId,
        page_opts: &PaginateOpts,
    ) -> Result<ProjectResponse, LoomError> {
        api::client::transform::undo(&self.config, project_id, page_opts).await
    }

    async fn list_logs(&self, project_id: &RecordId) -> Result<Vec<LogEntry>, LoomError> {
        api::client::logs::list(&self.config, project_id).await
    }

    async fn list_checkpoints(&self, project_id: &RecordId) -> Result<Vec<Checkpoint>, LoomError> {
        api::client::logs::list_checkpoints(&self.config, project_id).await
    }

    async fn export(&self, project_id: &RecordId, opts: &ExportOpts) -> Result<Bytes, LoomError> {
        api::client::projects::export(&self.config, project_id, opts).await
    }

    async fn chart_columns(&self, project_id: &RecordId) -> Result<Vec<ChartColumn>, LoomError> {
        api::client::charts::list_columns(&self.config, project_id).await
    }

    async fn chart_data(
        &self,
        project_id: &RecordId,
        opts: &ChartOpts,
    ) -> Result<ChartData, LoomError> {
        api::client::charts::get_data(&self.config, project_id, opts).await
    }

    async fn profile(&self, project_id: &RecordId) -> Result<ProfileResponse, LoomError> {
        api::client::profiling::get(&self.config, project_id).await
    }

    async fn list_recent(&self) -> Result<Vec<RecentProject>, LoomError> {
        api::client::projects::list_recent(&self.config).await
    }

    async fn delete(&self, project_id: &RecordId) -> Result<StatusMessage, LoomError> {
        api::client::projects::delete(&self.config, project_id).await
    }
}
