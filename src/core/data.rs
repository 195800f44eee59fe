use awc::{http::StatusCode, Client};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::types::ProjectRecord;

/// Message shown when the backend answers with a non-success status.
pub const STATUS_FAILURE_MESSAGE: &str = "Failed to fetch project data";
/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("project identifier is empty")]
    EmptyIdentifier,
    #[error("invalid project service URL `{0}`")]
    BaseUrl(String),
    #[error("{0}")]
    Connect(String),
    #[error("project service responded with {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Body(String),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The text a failed page displays. Network, status and decode failures
    /// all collapse into this one string.
    pub fn user_message(&self) -> String {
        let message = match self {
            FetchError::Status(_) => STATUS_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Client for the identifier-keyed read endpoint of the project service.
///
/// Wraps an awc [`Client`], so it lives on a single actix worker thread.
#[derive(Clone)]
pub struct ProjectQuery {
    client: Client,
    base_url: String,
    body_limit: usize,
}

impl ProjectQuery {
    pub fn new(base_url: &str) -> Self {
        // No request timeout: a pending read stays pending until the peer answers.
        let client = Client::builder().disable_timeout().finish();
        ProjectQuery::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        ProjectQuery {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The identifier is opaque: it becomes one percent-encoded path segment.
    pub fn project_url(&self, identifier: &str) -> Result<Url, FetchError> {
        let invalid = || FetchError::BaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "projects", identifier]);
        Ok(url)
    }

    pub async fn fetch_project(&self, identifier: &str) -> Result<ProjectRecord, FetchError> {
        if identifier.is_empty() {
            return Err(FetchError::EmptyIdentifier);
        }
        let url = self.project_url(identifier)?;
        match self.client.get(url.as_str()).send().await {
            Ok(mut response) => {
                let status = response.status();
                if !status.is_success() {
                    warn!(%url, %status, "Project service rejected request");
                    return Err(FetchError::Status(status));
                }
                match response.body().limit(self.body_limit).await {
                    Ok(body) => {
                        debug!(%url, size = body.len(), "Project data received");
                        match serde_json::from_slice::<ProjectRecord>(&body) {
                            Ok(record) => Ok(record),
                            Err(error) => {
                                warn!(%url, %error, "Project data structure is incorrect");
                                Err(error.into())
                            }
                        }
                    }
                    Err(error) => {
                        warn!(%url, %error, "Project data could not be read");
                        Err(FetchError::Body(error.to_string()))
                    }
                }
            }
            Err(error) => {
                warn!(%url, %error, "Error requesting project data");
                Err(FetchError::Connect(error.to_string()))
            }
        }
    }
}
