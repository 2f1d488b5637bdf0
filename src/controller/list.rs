//! List view controller: fetch, sort, delete, and refresh-after-delete.

use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeId, SortKey};
use crate::notify::Notifier;
use crate::service::EmployeeService;

/// List view state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Work the view asked for, to be run off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ListRequest {
    /// `list(sort)`.
    Fetch(Option<SortKey>),
    /// `remove(id)`, then `list(None)` if it succeeded.
    Delete(EmployeeId),
}

/// Result of a [`ListRequest`].
#[derive(Debug)]
pub enum ListOutcome {
    Fetched(Result<Vec<Employee>>),
    Deleted { id: EmployeeId, refresh: Result<Vec<Employee>> },
    DeleteFailed { id: EmployeeId, error: AppError },
}

impl ListRequest {
    /// Perform the request against the backend.
    pub async fn run(self, service: &dyn EmployeeService) -> ListOutcome {
        match self {
            ListRequest::Fetch(sort) => ListOutcome::Fetched(service.list(sort).await),
            ListRequest::Delete(id) => match service.remove(&id).await {
                Ok(()) => ListOutcome::Deleted {
                    refresh: service.list(None).await,
                    id,
                },
                Err(error) => ListOutcome::DeleteFailed { id, error },
            },
        }
    }
}

/// Owns the employee sequence shown by the list view.
///
/// Each operation is split into a begin step that moves to `Loading` and
/// returns a [`ListRequest`], and [`apply`](Self::apply) which folds the
/// outcome back in. Outcomes are applied in arrival order.
#[derive(Debug, Default)]
pub struct ListController {
    state: ListState,
    /// State to return to if a pending delete fails.
    before_delete: ListState,
    sort: SortKey,
    employees: Vec<Employee>,
}

impl ListController {
    /// Create a controller with `sort` pre-selected.
    pub fn new(sort: SortKey) -> Self {
        Self {
            sort,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// Initial fetch. Uses the backend default order unless another key is pre-selected.
    pub fn mount(&mut self) -> ListRequest {
        self.state = ListState::Loading;
        if self.sort == SortKey::default() {
            ListRequest::Fetch(None)
        } else {
            ListRequest::Fetch(Some(self.sort))
        }
    }

    /// Select a sort key and refetch.
    pub fn set_sort(&mut self, sort: SortKey) -> ListRequest {
        self.sort = sort;
        self.state = ListState::Loading;
        ListRequest::Fetch(Some(sort))
    }

    /// Refetch with the current sort key.
    pub fn refresh(&mut self) -> ListRequest {
        self.state = ListState::Loading;
        ListRequest::Fetch(Some(self.sort))
    }

    /// Delete a record. The current sequence stays visible until the outcome arrives.
    pub fn delete(&mut self, id: EmployeeId) -> ListRequest {
        self.before_delete = std::mem::replace(&mut self.state, ListState::Loading);
        ListRequest::Delete(id)
    }

    /// Fold a finished request into the view state.
    pub fn apply(&mut self, outcome: ListOutcome, notifier: &mut Notifier) {
        match outcome {
            ListOutcome::Fetched(Ok(employees)) => {
                debug!("Loaded {} employees", employees.len());
                self.employees = employees;
                self.state = ListState::Loaded;
            }
            ListOutcome::Fetched(Err(e)) => {
                notifier.report(&e);
                self.state = ListState::Failed(e.to_string());
            }
            ListOutcome::Deleted { id, refresh } => {
                debug!("Deleted employee {id}");
                // Refresh ran with the backend default order.
                self.sort = SortKey::default();
                match refresh {
                    Ok(employees) => {
                        self.employees = employees;
                        self.state = ListState::Loaded;
                    }
                    Err(e) => {
                        notifier.report(&e);
                        self.state = ListState::Failed(e.to_string());
                    }
                }
                notifier.success("Employee deleted successfully.");
            }
            ListOutcome::DeleteFailed { id, error } => {
                debug!("Delete of {id} failed");
                notifier.report(&error);
                self.state = std::mem::take(&mut self.before_delete);
            }
        }
    }

    /// Records whose name contains `query`, case-insensitively.
    pub fn visible(&self, query: &str) -> Vec<&Employee> {
        let query = query.trim().to_lowercase();
        self.employees
            .iter()
            .filter(|e| query.is_empty() || e.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Mount, run, and apply in one step.
    pub async fn load(&mut self, service: &dyn EmployeeService, notifier: &mut Notifier) {
        let outcome = self.mount().run(service).await;
        self.apply(outcome, notifier);
    }

    /// Change the sort key, run, and apply in one step.
    pub async fn sort_by(&mut self, sort: SortKey, service: &dyn EmployeeService, notifier: &mut Notifier) {
        let outcome = self.set_sort(sort).run(service).await;
        self.apply(outcome, notifier);
    }

    /// Delete, refresh, and apply in one step.
    pub async fn remove(&mut self, id: EmployeeId, service: &dyn EmployeeService, notifier: &mut Notifier) {
        let outcome = self.delete(id).run(service).await;
        self.apply(outcome, notifier);
    }
}
