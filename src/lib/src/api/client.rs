//! # API Client - requests against a DataLoom server
//!
//! One module per server resource. Every function builds its url from the
//! [`ClientConfig`], sends one request and decodes the body into a `view`
//! record. Non 2xx statuses become [`LoomError::Transform`] carrying the
//! server's detail, transport failures become [`LoomError::Network`].

use bytes::Bytes;
use reqwest::{header, Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::constants;
use crate::error::LoomError;
use crate::view::ErrorResponse;

pub mod charts;
pub mod logs;
pub mod profiling;
pub mod projects;
pub mod transform;

const VERSION: &str = constants::DATALOOM_VERSION;
const USER_AGENT: &str = "DataLoom";

pub fn new_for_config(config: &ClientConfig) -> Result<Client, LoomError> {
    match builder_for_config(config)?.timeout(config.timeout()).build() {
        Ok(client) => Ok(client),
        Err(reqwest_err) => Err(LoomError::Network(reqwest_err)),
    }
}

fn builder_for_config(config: &ClientConfig) -> Result<ClientBuilder, LoomError> {
    let builder = Client::builder().user_agent(format!("{USER_AGENT}/{VERSION}"));
    match &config.auth_token {
        Some(auth_token) => {
            log::debug!("Setting auth token for host: {}", config.host);
            let auth_header = format!("Bearer {auth_token}");
            let mut auth_value = match header::HeaderValue::from_str(auth_header.as_str()) {
                Ok(header) => header,
                Err(err) => {
                    log::debug!("api::client::builder_for_config invalid header value: {}", err);
                    return Err(LoomError::basic_str(
                        "Error setting request auth. Please check your DataLoom config.",
                    ));
                }
            };
            auth_value.set_sensitive(true);
            let mut headers = header::HeaderMap::new();
            headers.insert(header::AUTHORIZATION, auth_value);
            Ok(builder.default_headers(headers))
        }
        None => {
            log::trace!("No auth token set for host: {}", config.host);
            Ok(builder)
        }
    }
}

/// Body of a 2xx response, or the server's error as a `Transform` error
pub async fn parse_json_body(url: &str, res: reqwest::Response) -> Result<String, LoomError> {
    let status = res.status();
    let body = res.text().await?;

    log::debug!("url: {url}\nstatus: {status}\nbody: {body}");

    if status.is_success() {
        Ok(body)
    } else {
        Err(error_from_body(url, status, &body))
    }
}

/// Decode a 2xx json body into `T`
pub async fn parse_json_response<T: DeserializeOwned>(
    url: &str,
    res: reqwest::Response,
) -> Result<T, LoomError> {
    let body = parse_json_body(url, res).await?;
    let response: Result<T, serde_json::Error> = serde_json::from_str(&body);
    match response {
        Ok(response) => Ok(response),
        Err(err) => {
            log::debug!("Could not deserialize response from [{url}] {err}");
            Err(LoomError::basic_str(format!(
                "Could not deserialize response from [{url}]\n{err}\n'{body}'"
            )))
        }
    }
}

/// Raw bytes of a 2xx response, used for file downloads
pub async fn parse_bytes_body(url: &str, res: reqwest::Response) -> Result<Bytes, LoomError> {
    let status = res.status();
    if status.is_success() {
        let bytes = res.bytes().await?;
        log::debug!("url: {url}\nstatus: {status}\n{} bytes", bytes.len());
        Ok(bytes)
    } else {
        let body = res.text().await?;
        log::debug!("url: {url}\nstatus: {status}\nbody: {body}");
        Err(error_from_body(url, status, &body))
    }
}

pub fn error_from_body(url: &str, status: StatusCode, body: &str) -> LoomError {
    let detail = ErrorResponse::parse(body).detail();
    LoomError::transform(status.as_u16(), url, detail)
}
