use crate::core::error::AppError;
use crate::features::departments::models::Department;

pub const SELECT_DEPARTMENT_MESSAGE: &str = "Please select a department first";
pub const REASSIGN_FAILED_MESSAGE: &str = "Failed to reassign complaint. Please try again.";
pub const REASSIGN_BUSY_MESSAGE: &str = "A reassignment for this complaint is already in progress";

/// Department picker for one complaint.
///
/// The displayed department only changes after the backend confirms the
/// reassignment; a failed request leaves it as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignmentControl {
    complaint_id: String,
    displayed: Option<Department>,
    selected: Option<Department>,
    in_flight: bool,
    error: Option<String>,
}

impl ReassignmentControl {
    pub fn new(complaint_id: impl Into<String>, displayed: Option<Department>) -> Self {
        Self {
            complaint_id: complaint_id.into(),
            displayed,
            selected: None,
            in_flight: false,
            error: None,
        }
    }

    pub fn complaint_id(&self) -> &str {
        &self.complaint_id
    }

    pub fn displayed(&self) -> Option<Department> {
        self.displayed
    }

    pub fn selected(&self) -> Option<Department> {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The trigger is disabled while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Department currently stored by the backend
    pub fn load_displayed(&mut self, displayed: Option<Department>) {
        self.displayed = displayed;
    }

    pub fn select(&mut self, department: Department) {
        self.selected = Some(department);
        self.error = None;
    }

    /// Start a request for the selected department
    pub fn begin(&mut self) -> Result<Department, AppError> {
        if self.in_flight {
            return Err(AppError::Conflict(REASSIGN_BUSY_MESSAGE.to_string()));
        }
        let department = match self.selected {
            Some(department) => department,
            None => {
                self.error = Some(SELECT_DEPARTMENT_MESSAGE.to_string());
                return Err(AppError::Validation(SELECT_DEPARTMENT_MESSAGE.to_string()));
            }
        };
        self.in_flight = true;
        self.error = None;
        Ok(department)
    }

    /// Record the backend's answer for the request started by `begin`
    pub fn finish(&mut self, outcome: &Result<(), AppError>) {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                self.displayed = self.selected.take();
                self.error = None;
            }
            Err(_) => {
                self.error = Some(REASSIGN_FAILED_MESSAGE.to_string());
            }
        }
    }
}
