//! Source page retrieval.

use std::time::Duration;

use crate::{Error, Result};

/// `GET url` once and return the body. Transport failures and non-success
/// statuses are [`Error::Fetch`]; there is no retry.
pub async fn fetch_markup(url: &str, user_agent: &str) -> Result<String> {
  let client = reqwest::Client::builder()
    .user_agent(user_agent)
    .timeout(Duration::from_secs(30))
    .build()
    .map_err(Error::Fetch)?;

  let resp = client
    .get(url)
    .send()
    .await
    .and_then(reqwest::Response::error_for_status)
    .map_err(Error::Fetch)?;

  resp.text().await.map_err(Error::Fetch)
}
