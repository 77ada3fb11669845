//! Employee Registry: CRUD for employees, with every department assignment
//! routed through the resolver.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{HrError, HrResult};
use crate::model::{Employee, EmployeeDraft, EmployeeId, EmployeeRecord};
use crate::resolver::DepartmentResolver;
use crate::store::HrStore;

pub struct EmployeeRegistry<S> {
    store: Arc<S>,
    resolver: DepartmentResolver<S>,
}

impl<S> Clone for EmployeeRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resolver: self.resolver.clone(),
        }
    }
}

impl<S: HrStore> EmployeeRegistry<S> {
    pub fn new(store: Arc<S>, resolver: DepartmentResolver<S>) -> Self {
        Self { store, resolver }
    }

    #[instrument(name = "hr.employees.list", skip_all)]
    pub async fn list(&self) -> HrResult<Vec<Employee>> {
        self.store.list_employees().await
    }

    pub async fn get_by_id(&self, id: EmployeeId) -> HrResult<Option<Employee>> {
        self.store.find_employee(id).await
    }

    /// Email uniqueness is left to the store, which reports it as `Conflict`.
    #[instrument(name = "hr.employees.create", skip_all)]
    pub async fn create(&self, draft: EmployeeDraft) -> HrResult<Employee> {
        let record = self.prepare(&draft).await?;
        let created = self.store.insert_employee(&record).await?;
        info!(
            id = created.id,
            department_id = ?created.department_id,
            "employee created"
        );
        Ok(created)
    }

    /// Overwrites every field from the draft, including the department link:
    /// a draft without a department unlinks the employee.
    #[instrument(name = "hr.employees.update", skip(self, draft))]
    pub async fn update(&self, id: EmployeeId, draft: EmployeeDraft) -> HrResult<Employee> {
        let existing = self
            .store
            .find_employee(id)
            .await?
            .ok_or_else(|| HrError::employee_not_found(id))?;
        let record = self.prepare(&draft).await?;
        if existing.department_id != record.department_id {
            info!(
                from = ?existing.department_id,
                to = ?record.department_id,
                "employee department changed"
            );
        }
        self.store.update_employee(existing.id, &record).await
    }

    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, id: EmployeeId) -> HrResult<()> {
        let existing = self
            .store
            .find_employee(id)
            .await?
            .ok_or_else(|| HrError::employee_not_found(id))?;
        self.store.delete_employee(existing.id).await
    }

    /// Validates before resolving so a rejected draft never creates a
    /// department as a side effect.
    async fn prepare(&self, draft: &EmployeeDraft) -> HrResult<EmployeeRecord> {
        let mut record = EmployeeRecord::validate(draft)?;
        let department = self.resolver.resolve(draft.department.as_ref()).await?;
        record.department_id = department.map(|d| d.id);
        Ok(record)
    }
}
