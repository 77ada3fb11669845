//! Aggregation: department headcounts and employee views with department names.

use std::{collections::HashMap, sync::Arc};

use tracing::instrument;

use crate::error::HrResult;
use crate::model::{Department, DepartmentSummary, EmployeeId, EmployeeView};
use crate::store::HrStore;

/// Read-side composites spanning departments and employees.
pub struct Aggregation<S> {
    store: Arc<S>,
}

impl<S> Clone for Aggregation<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: HrStore> Aggregation<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn count_employees_in_department(&self, department: &Department) -> HrResult<u64> {
        self.store.count_employees_in_department(department.id).await
    }

    /// One summary per department. Employees whose department no longer
    /// exists are not counted anywhere.
    #[instrument(name = "hr.departments.summaries", skip_all)]
    pub async fn department_summaries(&self) -> HrResult<Vec<DepartmentSummary>> {
        let departments = self.store.list_departments().await?;
        let mut summaries = Vec::with_capacity(departments.len());
        for department in departments {
            let count = self.count_employees_in_department(&department).await?;
            summaries.push(DepartmentSummary::new(department, count));
        }
        Ok(summaries)
    }

    #[instrument(name = "hr.employees.views", skip_all)]
    pub async fn employee_views(&self) -> HrResult<Vec<EmployeeView>> {
        let names: HashMap<_, _> = self
            .store
            .list_departments()
            .await?
            .into_iter()
            .map(|department| (department.id, department.name))
            .collect();
        let employees = self.store.list_employees().await?;
        Ok(employees
            .into_iter()
            .map(|employee| {
                let department_name = employee
                    .department_id
                    .and_then(|id| names.get(&id).cloned());
                EmployeeView {
                    employee,
                    department_name,
                }
            })
            .collect())
    }

    pub async fn employee_view(&self, id: EmployeeId) -> HrResult<Option<EmployeeView>> {
        let Some(employee) = self.store.find_employee(id).await? else {
            return Ok(None);
        };
        let department_name = match employee.department_id {
            Some(department_id) => self
                .store
                .find_department(department_id)
                .await?
                .map(|d| d.name),
            None => None,
        };
        Ok(Some(EmployeeView {
            employee,
            department_name,
        }))
    }
}
