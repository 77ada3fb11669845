//! Drafts, references and read views for the HR core.
//!
//! Persisted records are the sea-orm models from the `entity` crate; the
//! types here describe what callers hand in and what composite views hand
//! back.

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

pub use entity::departments::Model as Department;
pub use entity::employees::Model as Employee;

pub type DepartmentId = i32;
pub type EmployeeId = i32;

/// Input for creating or rewriting a department.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
}

impl DepartmentDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Trims the name and rejects it when blank.
    pub(crate) fn normalized(self) -> HrResult<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(HrError::required("department name"));
        }
        Ok(Self {
            name: name.to_string(),
            description: blank_to_none(self.description),
            manager: blank_to_none(self.manager),
        })
    }
}

/// How an employee draft points at its department.
///
/// An `id` always wins over a `name`. A name-only reference is looked up by
/// exact match and created when missing; `description` and `manager` are only
/// used for that creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    #[serde(default)]
    pub id: Option<DepartmentId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
}

impl DepartmentRef {
    pub fn by_id(id: DepartmentId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }
}

/// Input for creating or rewriting an employee.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<DepartmentRef>,
}

impl EmployeeDraft {
    pub fn new(first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_department(mut self, department: DepartmentRef) -> Self {
        self.department = Some(department);
        self
    }
}

/// Validated employee fields with the department already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub position: Option<String>,
    pub department_id: Option<DepartmentId>,
}

impl EmployeeRecord {
    /// Checks required fields; the department link starts empty.
    pub(crate) fn validate(draft: &EmployeeDraft) -> HrResult<Self> {
        let first_name = draft.first_name.trim();
        if first_name.is_empty() {
            return Err(HrError::required("first name"));
        }
        let email = draft.email.trim();
        if email.is_empty() {
            return Err(HrError::required("email"));
        }
        Ok(Self {
            first_name: first_name.to_string(),
            last_name: blank_to_none(draft.last_name.clone()),
            email: email.to_string(),
            position: blank_to_none(draft.position.clone()),
            department_id: None,
        })
    }
}

/// Department row plus the number of employees linked to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub id: DepartmentId,
    pub name: String,
    pub description: Option<String>,
    pub manager: Option<String>,
    pub employee_count: u64,
}

impl DepartmentSummary {
    pub fn new(department: Department, employee_count: u64) -> Self {
        Self {
            id: department.id,
            name: department.name,
            description: department.description,
            manager: department.manager,
            employee_count,
        }
    }
}

/// Employee row with its department name looked up.
///
/// `department_name` is `None` both for unlinked employees and for dangling
/// links; the two are told apart by `employee.department_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    pub department_name: Option<String>,
}

impl EmployeeView {
    pub fn is_dangling(&self) -> bool {
        self.employee.department_id.is_some() && self.department_name.is_none()
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
