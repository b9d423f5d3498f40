use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::LoomError;
use crate::model::{ChartColumn, ChartData, RecordId};
use crate::opts::ChartOpts;
use crate::view::ChartColumnsResponse;

/// Columns that can be charted and their chart dtype
pub async fn list_columns(
    config: &ClientConfig,
    project_id: &RecordId,
) -> Result<Vec<ChartColumn>, LoomError> {
    let uri = format!("/projects/{project_id}/chart/columns");
    let url = api::endpoint::url_from_config(config, &uri)?;
    log::debug!("api::client::charts::list_columns {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    let response: ChartColumnsResponse = client::parse_json_response(&url, res).await?;
    Ok(response.columns)
}

pub async fn get_data(
    config: &ClientConfig,
    project_id: &RecordId,
    opts: &ChartOpts,
) -> Result<ChartData, LoomError> {
    opts.validate()?;
    let uri = format!("/projects/{project_id}/chart/data");
    let url = api::endpoint::url_with_query(config, &uri, opts.query_pairs())?;
    log::debug!("api::client::charts::get_data {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    client::parse_json_response(&url, res).await
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use crate::api;
    use crate::error::LoomError;
    use crate::model::RecordId;
    use crate::opts::{ChartOpts, ChartType};
    use crate::test;

    #[tokio::test]
    async fn test_get_chart_data() -> Result<(), LoomError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());
        let mock = server
            .mock("GET", "/projects/2/chart/data")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("chart_type".into(), "bar".into()),
                Matcher::UrlEncoded("x_column".into(), "city".into()),
                Matcher::UrlEncoded("y_column".into(), "sales".into()),
                Matcher::UrlEncoded("agg_function".into(), "mean".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"chart_type": "bar", "x_column": "city", "y_column": "sales",
                    "data": [{"x": "Oslo", "y": 12.5}]}"#,
            )
            .create_async()
            .await;

        let opts = ChartOpts::new(ChartType::Bar, "city").with_y("sales");
        let data = api::client::charts::get_data(&config, &RecordId::from("2"), &opts).await?;
        mock.assert();
        assert_eq!(data.x_column, "city");
        assert_eq!(data.grouped, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_opts_send_nothing() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());
        let mock = server
            .mock("GET", "/projects/2/chart/data")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let opts = ChartOpts::new(ChartType::Scatter, "age");
        let result = api::client::charts::get_data(&config, &RecordId::from("2"), &opts).await;
        assert!(matches!(result, Err(LoomError::Validation(_))));
        mock.assert();
    }

    #[tokio::test]
    async fn test_list_columns() -> Result<(), LoomError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for_url(server.url());
        let _mock = server
            .mock("GET", "/projects/2/chart/columns")
            .with_status(200)
            .with_body(r#"{"columns": [{"name": "age", "dtype": "numeric"}]}"#)
            .create_async()
            .await;

        let columns = api::client::charts::list_columns(&config, &RecordId::from("2")).await?;
        assert_eq!(columns[0].dtype, "numeric");
        Ok(())
    }
}
