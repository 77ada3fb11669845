use async_graphql::{ID, InputObject, SimpleObject};
use platform_api::{ApiResult, parse_id};
use products_hr::{
    DepartmentDraft, DepartmentRef, DepartmentSummary, EmployeeDraft, EmployeeView,
};

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Department")]
pub struct DepartmentNode {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub manager: Option<String>,
    #[graphql(name = "employeeCount")]
    pub employee_count: u64,
}

impl From<DepartmentSummary> for DepartmentNode {
    fn from(summary: DepartmentSummary) -> Self {
        Self {
            id: ID::from(summary.id.to_string()),
            name: summary.name,
            description: summary.description,
            manager: summary.manager,
            employee_count: summary.employee_count,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Employee")]
pub struct EmployeeNode {
    pub id: ID,
    #[graphql(name = "firstName")]
    pub first_name: String,
    #[graphql(name = "lastName")]
    pub last_name: Option<String>,
    pub email: String,
    pub position: Option<String>,
    #[graphql(name = "departmentId")]
    pub department_id: Option<ID>,
    #[graphql(name = "departmentName")]
    pub department_name: Option<String>,
}

impl From<EmployeeView> for EmployeeNode {
    fn from(view: EmployeeView) -> Self {
        let employee = view.employee;
        Self {
            id: ID::from(employee.id.to_string()),
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            position: employee.position,
            department_id: employee.department_id.map(|id| ID::from(id.to_string())),
            department_name: view.department_name,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct DepartmentInput {
    pub name: String,
    pub description: Option<String>,
    pub manager: Option<String>,
}

impl From<DepartmentInput> for DepartmentDraft {
    fn from(input: DepartmentInput) -> Self {
        DepartmentDraft {
            name: input.name,
            description: input.description,
            manager: input.manager,
        }
    }
}

/// Department reference on an employee: by `id`, or by `name` (created when
/// missing).
#[derive(InputObject, Clone)]
pub struct DepartmentRefInput {
    pub id: Option<ID>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager: Option<String>,
}

impl DepartmentRefInput {
    fn into_ref(self) -> ApiResult<DepartmentRef> {
        let id = self.id.as_ref().map(parse_id).transpose()?;
        Ok(DepartmentRef {
            id,
            name: self.name,
            description: self.description,
            manager: self.manager,
        })
    }
}

#[derive(InputObject, Clone)]
pub struct EmployeeInput {
    #[graphql(name = "firstName")]
    pub first_name: String,
    #[graphql(name = "lastName")]
    pub last_name: Option<String>,
    pub email: String,
    pub position: Option<String>,
    /// Omitting this on update unlinks the employee from its department.
    pub department: Option<DepartmentRefInput>,
}

impl EmployeeInput {
    pub fn into_draft(self) -> ApiResult<EmployeeDraft> {
        let department = self
            .department
            .map(DepartmentRefInput::into_ref)
            .transpose()?;
        Ok(EmployeeDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            position: self.position,
            department,
        })
    }
}
