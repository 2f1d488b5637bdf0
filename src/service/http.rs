//! REST implementation of [`EmployeeService`] over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::debug;

use super::EmployeeService;
use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeDraft, EmployeeId, SortKey};

/// Employee backend client.
///
/// Talks to `{base_url}/employees`. Each operation expects one exact success
/// status; any other status becomes an error.
#[derive(Debug, Clone)]
pub struct HttpEmployeeService {
    client: Client,
    base_url: Url,
}

impl HttpEmployeeService {
    /// Create a client from the API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| AppError::config(format!("Invalid API base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "API base URL cannot be a base: {}",
                config.base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Build `{base}/employees[/{id}]`, percent-encoding the id.
    fn url(&self, id: Option<&EmployeeId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("employees");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    /// Map a response to an error unless it carries the expected status.
    async fn expect_status(response: Response, expected: StatusCode, id: Option<&EmployeeId>) -> Result<Response> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }
        if status.is_success() {
            return Err(AppError::server(
                status.as_u16(),
                format!("unexpected status, expected {expected}"),
            ));
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };

        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => AppError::not_found(id.as_str()),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => AppError::rejected(message),
            _ => AppError::server(status.as_u16(), message),
        })
    }
}

#[async_trait]
impl EmployeeService for HttpEmployeeService {
    async fn list(&self, sort: Option<SortKey>) -> Result<Vec<Employee>> {
        let mut url = self.url(None);
        if let Some(key) = sort {
            url.query_pairs_mut().append_pair("sort", key.as_param());
        }
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = Self::expect_status(response, StatusCode::OK, None).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, id: &EmployeeId) -> Result<Employee> {
        let url = self.url(Some(id));
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = Self::expect_status(response, StatusCode::OK, Some(id)).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let url = self.url(None);
        debug!("POST {url}");

        let response = self.client.post(url).json(draft).send().await?;
        let response = Self::expect_status(response, StatusCode::CREATED, None).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<()> {
        let url = self.url(Some(id));
        debug!("PUT {url}");

        let response = self.client.put(url).json(draft).send().await?;
        Self::expect_status(response, StatusCode::CREATED, Some(id)).await?;
        Ok(())
    }

    async fn remove(&self, id: &EmployeeId) -> Result<()> {
        let url = self.url(Some(id));
        debug!("DELETE {url}");

        let response = self.client.delete(url).send().await?;
        Self::expect_status(response, StatusCode::OK, Some(id)).await?;
        Ok(())
    }
}
