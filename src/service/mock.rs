//! In-memory [`EmployeeService`] for controller tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::EmployeeService;
use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeDraft, EmployeeId, SortKey};

/// Operation kinds, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Remove,
}

/// A recorded service call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(Option<SortKey>),
    Get(EmployeeId),
    Create(EmployeeDraft),
    Update(EmployeeId, EmployeeDraft),
    Remove(EmployeeId),
}

#[derive(Default)]
struct State {
    records: Vec<Employee>,
    next_id: u32,
    calls: Vec<Call>,
    failing: HashSet<Op>,
}

/// Fake backend holding records in a `Vec`, sorting like the real one.
#[derive(Default)]
pub struct MockEmployeeService {
    state: Mutex<State>,
}

impl MockEmployeeService {
    pub fn with_records(records: Vec<Employee>) -> Self {
        let svc = Self::default();
        svc.state.lock().unwrap().records = records;
        svc
    }

    /// Make every call of `op` fail with a 500 until [`recover`](Self::recover).
    pub fn fail(&self, op: Op) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.state.lock().unwrap().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn records(&self) -> Vec<Employee> {
        self.state.lock().unwrap().records.clone()
    }

    fn enter(&self, op: Op, call: Call) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(&op) {
            return Err(AppError::server(500, "Internal Server Error"));
        }
        Ok(state)
    }
}

/// Build a record for tests.
pub fn employee(id: &str, name: &str, role: &str, department: &str, admission: Option<&str>) -> Employee {
    Employee {
        id: EmployeeId::from(id),
        name: name.to_string(),
        role: role.to_string(),
        department: department.to_string(),
        admission_date: admission.and_then(crate::models::parse_datetime_local),
    }
}

#[async_trait]
impl EmployeeService for MockEmployeeService {
    async fn list(&self, sort: Option<SortKey>) -> Result<Vec<Employee>> {
        let state = self.enter(Op::List, Call::List(sort))?;
        let mut records = state.records.clone();
        match sort.unwrap_or_default() {
            SortKey::Name => records.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Role => records.sort_by(|a, b| a.role.cmp(&b.role)),
            SortKey::Department => records.sort_by(|a, b| a.department.cmp(&b.department)),
            SortKey::AdmissionDate => records.sort_by_key(|e| e.admission_date),
        }
        Ok(records)
    }

    async fn get(&self, id: &EmployeeId) -> Result<Employee> {
        let state = self.enter(Op::Get, Call::Get(id.clone()))?;
        state
            .records
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(id.as_str()))
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let mut state = self.enter(Op::Create, Call::Create(draft.clone()))?;
        state.next_id += 1;
        let record = Employee {
            id: EmployeeId::new(format!("gen-{}", state.next_id)),
            name: draft.name.clone(),
            role: draft.role.clone(),
            department: draft.department.clone(),
            admission_date: draft.admission_date,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<()> {
        let mut state = self.enter(Op::Update, Call::Update(id.clone(), draft.clone()))?;
        let record = state
            .records
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| AppError::not_found(id.as_str()))?;
        record.name = draft.name.clone();
        record.role = draft.role.clone();
        record.department = draft.department.clone();
        record.admission_date = draft.admission_date;
        Ok(())
    }

    async fn remove(&self, id: &EmployeeId) -> Result<()> {
        let mut state = self.enter(Op::Remove, Call::Remove(id.clone()))?;
        let before = state.records.len();
        state.records.retain(|e| &e.id != id);
        if state.records.len() == before {
            return Err(AppError::not_found(id.as_str()));
        }
        Ok(())
    }
}
