//! Mutating requests. Each returns the project's table after the change.

use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::LoomError;
use crate::model::{BackendOperation, RecordId};
use crate::opts::PaginateOpts;
use crate::view::ProjectResponse;

pub async fn transform(
    config: &ClientConfig,
    project_id: &RecordId,
    operation: &BackendOperation,
    page_opts: &PaginateOpts,
) -> Result<ProjectResponse, LoomError> {
    let uri = format!("/projects/{project_id}/transform");
    let url = api::endpoint::url_with_query(config, &uri, page_opts.query_pairs())?;
    log::debug!(
        "api::client::transform::transform {} {}",
        operation.operation_type(),
        url
    );

    let client = client::new_for_config(config)?;
    let res = client.post(&url).json(operation).send().await?;
    client::parse_json_response(&url, res).await
}

/// Create a checkpoint of the current state
pub async fn save(
    config: &ClientConfig,
    project_id: &RecordId,
    commit_message: &str,
    page_opts: &PaginateOpts,
) -> Result<ProjectResponse, LoomError> {
    let uri = format!("/projects/{project_id}/save");
    let mut params = vec![("commit_message", commit_message.to_string())];
    params.extend(page_opts.query_pairs());
    let url = api::endpoint::url_with_query(config, &uri, params)?;
    log::debug!("api::client::transform::save {}", url);

    let client = client::new_for_config(config)?;
    let res = client.post(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(LoomError::project_not_found(project_id));
    }
    client::parse_json_response(&url, res).await
}

/// Restore the project to `checkpoint_id`, or to the uploaded data when `None`
pub async fn revert(
    config: &ClientConfig,
    project_id: &RecordId,
    checkpoint_id: Option<&RecordId>,
    page_opts: &PaginateOpts,
) -> Result<ProjectResponse, LoomError> {
    let uri = format!("/projects/{project_id}/revert");
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(checkpoint_id) = checkpoint_id {
        params.push(("checkpoint_id", checkpoint_id.to_string()));
    }
    params.extend(page_opts.query_pairs());
    let url = api::endpoint::url_with_query(config, &uri, params)?;
    log::debug!("api::client::transform::revert {}", url);

    let client = client::new_for_config(config)?;
    let res = client.post(&url).send().await?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(match checkpoint_id {
            Some(checkpoint_id) => LoomError::checkpoint_not_found(checkpoint_id),
            None => LoomError::project_not_found(project_id),
        });
    }
    client::parse_json_response(&url, res).await
}

/// Reverse the most recent unapplied operation
pub async fn undo(
    config: &ClientConfig,
    project_id: &RecordId,
    page_opts: &PaginateOpts,
) -> Result<ProjectResponse, LoomError> {
    let uri = format!("/projects/{project_id}/undo");
    let url = api::endpoint::url_with_query(config, &uri, page_opts.query_pairs())?;
    log::debug!("api::client::transform::undo {}", url);

    let client = client::new_for_config(config)?;
    let res = client.post(&url).send().await?;
    client::parse_json_response(&url, res).await
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use crate::api;
    use crate::error::LoomError;
    use crate::model::{BackendOperation, Operation, RecordId};
    use crate::opts::PaginateOpts;
    use crate::test;

    #[tokio::test]
    async fn test_transform_posts_backend_operation() -> Result<(), LoomError> {
        test::init_test_env();
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());

        let mock = server
            .mock("POST", "/projects/3/transform")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("page_size".into(), "50".into()),
            ]))
            .match_body(Matcher::Json(json!({
                "operation_type": "delCol",
                "col_params": {"index": 2}
            })))
            .with_status(200)
            .with_body(r#"{"columns": ["a", "b"], "rows": [[1, 2]], "dtypes": {"a": "int64"}}"#)
            .create_async()
            .await;

        let operation = BackendOperation::from_translated(Operation::del_col(2));
        let response = api::client::transform::transform(
            &config,
            &RecordId::from("3"),
            &operation,
            &PaginateOpts::new(1, 50),
        )
        .await?;
        mock.assert();
        assert_eq!(response.columns.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_transform_error_detail() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());
        let _mock = server
            .mock("POST", "/projects/3/transform")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"detail": "Column index out of range"}"#)
            .create_async()
            .await;

        let operation = BackendOperation::from_translated(Operation::del_col(7));
        let err = api::client::transform::transform(
            &config,
            &RecordId::from("3"),
            &operation,
            &PaginateOpts::default(),
        )
        .await
        .unwrap_err();
        match &err {
            LoomError::Transform(err) => assert_eq!(err.status, 400),
            other => panic!("expected a transform error, got {other:?}"),
        }
        assert_eq!(err.user_message(), "Column index out of range");
    }

    #[tokio::test]
    async fn test_save_sends_commit_message() -> Result<(), LoomError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());
        let mock = server
            .mock("POST", "/projects/3/save")
            .match_query(Matcher::UrlEncoded(
                "commit_message".into(),
                "removed outliers".into(),
            ))
            .with_status(200)
            .with_body(r#"{"columns": ["a"], "rows": []}"#)
            .create_async()
            .await;

        api::client::transform::save(
            &config,
            &RecordId::from("3"),
            "removed outliers",
            &PaginateOpts::default(),
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn test_revert_missing_checkpoint() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());
        let _mock = server
            .mock("POST", "/projects/3/revert")
            .match_query(Matcher::UrlEncoded("checkpoint_id".into(), "44".into()))
            .with_status(404)
            .with_body(r#"{"detail": "Checkpoint not found"}"#)
            .create_async()
            .await;

        let result = api::client::transform::revert(
            &config,
            &RecordId::from("3"),
            Some(&RecordId::from("44")),
            &PaginateOpts::default(),
        )
        .await;
        assert!(matches!(result, Err(LoomError::CheckpointNotFound(_))));
    }
}
