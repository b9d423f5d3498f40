use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::LoomError;
use crate::model::RecordId;
use crate::view::ProfileResponse;

/// Column statistics over the project's whole table, recomputed by the server
/// on every call
pub async fn get(config: &ClientConfig, project_id: &RecordId) -> Result<ProfileResponse, LoomError> {
    let uri = format!("/projects/{project_id}/profile");
    let url = api::endpoint::url_from_config(config, &uri)?;
    log::debug!("api::client::profiling::get {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(LoomError::project_not_found(project_id));
    }
    client::parse_json_response(&url, res).await
}
