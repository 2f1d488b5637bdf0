//! View controllers. Each owns its view's state and talks to the backend only
//! through [`EmployeeService`](crate::service::EmployeeService).

pub mod form;
pub mod list;

pub use form::{FormController, FormEvent, FormMode, FormOutcome, FormRequest, FormSlot, FormState};
pub use list::{ListController, ListOutcome, ListRequest, ListState};
