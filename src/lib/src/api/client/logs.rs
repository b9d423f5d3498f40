use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::LoomError;
use crate::model::log_entry;
use crate::model::{Checkpoint, LogEntry, RecordId};
use crate::view::CheckpointsResponse;

/// Transformation log of a project, oldest first
pub async fn list(config: &ClientConfig, project_id: &RecordId) -> Result<Vec<LogEntry>, LoomError> {
    let uri = format!("/logs/{project_id}");
    let url = api::endpoint::url_from_config(config, &uri)?;
    log::debug!("api::client::logs::list {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    let mut logs: Vec<LogEntry> = client::parse_json_response(&url, res).await?;
    log_entry::sort_ascending(&mut logs);
    Ok(logs)
}

/// Checkpoints of a project, newest first. A project without checkpoints may
/// answer 404, which is an empty list.
pub async fn list_checkpoints(
    config: &ClientConfig,
    project_id: &RecordId,
) -> Result<Vec<Checkpoint>, LoomError> {
    let uri = format!("/logs/checkpoints/{project_id}");
    let url = api::endpoint::url_from_config(config, &uri)?;
    log::debug!("api::client::logs::list_checkpoints {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        log::debug!("no checkpoints for project {project_id}");
        return Ok(vec![]);
    }
    let response: CheckpointsResponse = client::parse_json_response(&url, res).await?;
    Ok(response.into_checkpoints())
}
