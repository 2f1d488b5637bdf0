//! Remote employee service: the seam between controllers and the backend.

pub mod http;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Employee, EmployeeDraft, EmployeeId, SortKey};

pub use http::HttpEmployeeService;

/// CRUD operations on employee records.
///
/// Every call is a single request; nothing is retried or cached.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// List records ordered by `sort`, or by the backend default when `None`.
    async fn list(&self, sort: Option<SortKey>) -> Result<Vec<Employee>>;

    /// Fetch one record.
    async fn get(&self, id: &EmployeeId) -> Result<Employee>;

    /// Persist a new record and return it with its assigned id.
    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee>;

    /// Replace the fields of an existing record.
    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<()>;

    /// Delete a record.
    async fn remove(&self, id: &EmployeeId) -> Result<()>;
}
