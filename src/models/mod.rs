//! Data models for employee records.

pub mod employee;

pub use employee::{
    DATETIME_LOCAL_FORMAT, Employee, EmployeeDraft, EmployeeField, EmployeeId, SortKey, parse_datetime_local,
};
