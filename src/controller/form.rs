//! Form view controller: blank-for-create or load-for-edit, field binding, validate-then-submit.

use tracing::debug;

use crate::error::Result;
use crate::models::{DATETIME_LOCAL_FORMAT, Employee, EmployeeDraft, EmployeeField, EmployeeId, parse_datetime_local};
use crate::notify::Notifier;
use crate::service::EmployeeService;
use crate::validation::{FieldViolation, Rule, validate};

/// Which kind of form this is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Edit an existing record. Without an id nothing is fetched.
    Edit { id: Option<EmployeeId> },
}

/// Form view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Editing,
    Loading,
    Submitting,
    Saved,
}

/// Backend work requested by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormRequest {
    Load(EmployeeId),
    Create(EmployeeDraft),
    Update(EmployeeId, EmployeeDraft),
}

/// Result of a [`FormRequest`].
#[derive(Debug)]
pub enum FormOutcome {
    Loaded(Result<Employee>),
    Created(Result<Employee>),
    Updated(Result<()>),
}

/// What the shell should do after an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    BackToList,
}

impl FormRequest {
    /// Perform the request against the backend.
    pub async fn run(self, service: &dyn EmployeeService) -> FormOutcome {
        match self {
            FormRequest::Load(id) => FormOutcome::Loaded(service.get(&id).await),
            FormRequest::Create(draft) => FormOutcome::Created(service.create(&draft).await),
            FormRequest::Update(id, draft) => FormOutcome::Updated(service.update(&id, &draft).await),
        }
    }
}

/// Owns the draft being edited.
#[derive(Debug)]
pub struct FormController {
    mode: FormMode,
    state: FormState,
    draft: EmployeeDraft,
    /// Raw admission date text, kept so invalid input is not lost.
    admission_input: String,
}

impl FormController {
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    pub fn edit(id: Option<EmployeeId>) -> Self {
        Self::with_mode(FormMode::Edit { id })
    }

    fn with_mode(mode: FormMode) -> Self {
        Self {
            mode,
            state: FormState::Editing,
            draft: EmployeeDraft::default(),
            admission_input: String::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, FormState::Loading | FormState::Submitting)
    }

    /// Current text of a field as shown in its input.
    pub fn field_text(&self, field: EmployeeField) -> &str {
        self.draft.text(field).unwrap_or(self.admission_input.as_str())
    }

    /// Whether the admission date text is empty or parses.
    pub fn admission_date_valid(&self) -> bool {
        self.admission_input.trim().is_empty() || self.draft.admission_date.is_some()
    }

    /// Fetch request for edit mode; `None` in create mode or without an id.
    pub fn mount(&mut self) -> Option<FormRequest> {
        match &self.mode {
            FormMode::Edit { id: Some(id) } => {
                self.state = FormState::Loading;
                Some(FormRequest::Load(id.clone()))
            }
            _ => None,
        }
    }

    /// Set one field, leaving the others untouched.
    pub fn set_field(&mut self, field: EmployeeField, value: &str) {
        match field {
            EmployeeField::Name => self.draft.name = value.to_string(),
            EmployeeField::Role => self.draft.role = value.to_string(),
            EmployeeField::Department => self.draft.department = value.to_string(),
            EmployeeField::AdmissionDate => {
                self.admission_input = value.to_string();
                self.draft.admission_date = parse_datetime_local(value);
            }
        }
    }

    /// Validate and build the save request.
    ///
    /// Every violation is reported; on any violation nothing is submitted and
    /// the draft is left as is.
    pub fn submit(&mut self, notifier: &mut Notifier) -> Option<FormRequest> {
        if self.is_busy() {
            return None;
        }

        let mut violations = validate(&self.draft).err().unwrap_or_default();
        if !self.admission_date_valid() {
            violations.push(FieldViolation::new(EmployeeField::AdmissionDate, Rule::InvalidDate));
        }
        if !violations.is_empty() {
            for v in &violations {
                notifier.error(v.message());
            }
            return None;
        }

        let request = match &self.mode {
            FormMode::Create => FormRequest::Create(self.draft.clone()),
            FormMode::Edit { id: Some(id) } => FormRequest::Update(id.clone(), self.draft.clone()),
            FormMode::Edit { id: None } => {
                notifier.error("No employee selected to update.");
                return None;
            }
        };
        self.state = FormState::Submitting;
        Some(request)
    }

    /// Fold a finished request into the form.
    pub fn apply(&mut self, outcome: FormOutcome, notifier: &mut Notifier) -> Option<FormEvent> {
        match outcome {
            FormOutcome::Loaded(Ok(employee)) => {
                debug!("Loaded employee {}", employee.id);
                self.draft = employee.to_draft();
                self.admission_input = self
                    .draft
                    .admission_date
                    .map(|d| d.format(DATETIME_LOCAL_FORMAT).to_string())
                    .unwrap_or_default();
                self.state = FormState::Editing;
                None
            }
            FormOutcome::Created(Ok(employee)) => {
                debug!("Created employee {}", employee.id);
                self.state = FormState::Saved;
                notifier.success("Employee created successfully!");
                Some(FormEvent::BackToList)
            }
            FormOutcome::Updated(Ok(())) => {
                self.state = FormState::Saved;
                notifier.success("Employee updated successfully!");
                Some(FormEvent::BackToList)
            }
            FormOutcome::Loaded(Err(e)) | FormOutcome::Created(Err(e)) | FormOutcome::Updated(Err(e)) => {
                notifier.report(&e);
                self.state = FormState::Editing;
                None
            }
        }
    }

    /// Mount, run, and apply in one step.
    pub async fn load(&mut self, service: &dyn EmployeeService, notifier: &mut Notifier) {
        if let Some(request) = self.mount() {
            let outcome = request.run(service).await;
            self.apply(outcome, notifier);
        }
    }

    /// Submit, run, and apply in one step.
    pub async fn save(&mut self, service: &dyn EmployeeService, notifier: &mut Notifier) -> Option<FormEvent> {
        let request = self.submit(notifier)?;
        let outcome = request.run(service).await;
        self.apply(outcome, notifier)
    }
}

/// The open form, if any, tagged with a number that changes on every open and close.
///
/// Outcomes carry the number current when their request was dispatched;
/// those for a form that has since closed are dropped.
#[derive(Debug, Default)]
pub struct FormSlot {
    seq: u64,
    form: Option<FormController>,
}

impl FormSlot {
    /// Replace any open form and return the new form's number.
    pub fn open(&mut self, form: FormController) -> u64 {
        self.seq += 1;
        self.form = Some(form);
        self.seq
    }

    pub fn close(&mut self) {
        self.seq += 1;
        self.form = None;
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        self.form.as_mut()
    }

    /// Apply an outcome dispatched under `seq` if that form is still open.
    pub fn apply(&mut self, seq: u64, outcome: FormOutcome, notifier: &mut Notifier) -> Option<FormEvent> {
        if seq != self.seq {
            debug!("Dropping outcome for a closed form");
            return None;
        }
        self.form.as_mut()?.apply(outcome, notifier)
    }
}
