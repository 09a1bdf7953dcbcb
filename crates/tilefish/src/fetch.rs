//! Blocking HTTP retrieval of dataset documents.

use std::time::Duration;

use tilefish_core::dataset::DatasetDescriptor;
use tilefish_core::tree::RawNode;
use url::Url;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_REDIRECTS: usize = 10;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid dataset URL `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request to `{url}` failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to `{url}` returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Dataset at `{url}` is not a valid data tree: {message}")]
    Malformed { url: String, message: String },
}

/// Fetches and parses the dataset's JSON document (blocking).
///
/// Exactly one attempt, no retry: any failure here maps to the chart's
/// failed state, and the caller decides what to show for it.
pub fn fetch_dataset(dataset: &DatasetDescriptor) -> Result<RawNode> {
    let url = Url::parse(&dataset.source_url).map_err(|e| FetchError::InvalidUrl {
        url: dataset.source_url.clone(),
        message: e.to_string(),
    })?;

    tracing::debug!(dataset = %dataset.key, url = %url, "fetching dataset");

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("tilefish/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let response = client
        .get(url.as_str())
        .header("Accept", "application/json")
        .send()
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "dataset fetch rejected");
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(|e| FetchError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let root = RawNode::from_json_str(&body).map_err(|e| FetchError::Malformed {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(url = %url, bytes = body.len(), "dataset fetched");
    Ok(root)
}
