use bytes::Bytes;

use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::LoomError;
use crate::model::{RecentProject, RecordId};
use crate::opts::{ExportOpts, PaginateOpts};
use crate::view::{ProjectResponse, RecentProjectView, StatusMessage};

/// One page of the project's current table
pub async fn get(
    config: &ClientConfig,
    project_id: &RecordId,
    page_opts: &PaginateOpts,
) -> Result<ProjectResponse, LoomError> {
    let uri = format!("/projects/get/{project_id}");
    let url = api::endpoint::url_with_query(config, &uri, page_opts.query_pairs())?;
    log::debug!("api::client::projects::get {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(LoomError::project_not_found(project_id));
    }
    client::parse_json_response(&url, res).await
}

pub async fn list_recent(config: &ClientConfig) -> Result<Vec<RecentProject>, LoomError> {
    let url = api::endpoint::url_from_config(config, "/projects/recent")?;
    log::debug!("api::client::projects::list_recent {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    let projects: Vec<RecentProjectView> = client::parse_json_response(&url, res).await?;
    Ok(projects.into_iter().map(RecentProject::from).collect())
}

pub async fn delete(
    config: &ClientConfig,
    project_id: &RecordId,
) -> Result<StatusMessage, LoomError> {
    let uri = format!("/projects/{project_id}");
    let url = api::endpoint::url_from_config(config, &uri)?;
    log::debug!("api::client::projects::delete {}", url);

    let client = client::new_for_config(config)?;
    let res = client.delete(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(LoomError::project_not_found(project_id));
    }
    client::parse_json_response(&url, res).await
}

/// Download the whole table. Non default csv options use the customised csv
/// endpoint.
pub async fn export(
    config: &ClientConfig,
    project_id: &RecordId,
    opts: &ExportOpts,
) -> Result<Bytes, LoomError> {
    let url = if opts.is_customized_csv() {
        let uri = format!("/export/csv/{project_id}");
        let include_header = if opts.include_header { "true" } else { "false" };
        api::endpoint::url_with_query(
            config,
            &uri,
            &[
                ("delimiter", opts.delimiter.as_str()),
                ("include_header", include_header),
                ("encoding", opts.encoding.as_str()),
            ],
        )?
    } else {
        let uri = format!("/projects/{project_id}/export");
        api::endpoint::url_with_query(config, &uri, &[("format", opts.format.extension())])?
    };
    log::debug!("api::client::projects::export {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(LoomError::project_not_found(project_id));
    }
    client::parse_bytes_body(&url, res).await
}
