use url::Url;

use crate::config::ClientConfig;
use crate::error::LoomError;

/// Full url for `uri` on the configured server
pub fn url_from_config(config: &ClientConfig, uri: &str) -> Result<String, LoomError> {
    let url = format!("{}{}", config.base_url(), uri);
    // Parse to fail early on a malformed host
    Url::parse(&url)?;
    Ok(url)
}

/// Full url for `uri` with the query pairs url encoded
pub fn url_with_query<I, K, V>(config: &ClientConfig, uri: &str, pairs: I) -> Result<String, LoomError>
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<(K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let base = format!("{}{}", config.base_url(), uri);
    let url = Url::parse_with_params(&base, pairs)?;
    Ok(url.to_string())
}
