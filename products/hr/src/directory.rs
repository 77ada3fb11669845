//! Department Directory: existence and name uniqueness for departments.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{HrError, HrResult};
use crate::model::{Department, DepartmentDraft, DepartmentId};
use crate::store::HrStore;

pub struct DepartmentDirectory<S> {
    store: Arc<S>,
}

impl<S> Clone for DepartmentDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: HrStore> DepartmentDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[instrument(name = "hr.departments.list", skip_all)]
    pub async fn list(&self) -> HrResult<Vec<Department>> {
        self.store.list_departments().await
    }

    #[instrument(name = "hr.departments.get", skip(self))]
    pub async fn get_by_id(&self, id: DepartmentId) -> HrResult<Department> {
        self.store
            .find_department(id)
            .await?
            .ok_or_else(|| HrError::department_not_found(id))
    }

    /// Absence is a normal outcome here, not an error.
    pub async fn find_by_name(&self, name: &str) -> HrResult<Option<Department>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.store.find_department_by_name(name).await
    }

    #[instrument(name = "hr.departments.create", skip_all, fields(name = %draft.name))]
    pub async fn create(&self, draft: DepartmentDraft) -> HrResult<Department> {
        let draft = draft.normalized()?;
        if self
            .store
            .find_department_by_name(&draft.name)
            .await?
            .is_some()
        {
            return Err(HrError::duplicate_department(&draft.name));
        }
        // The storage constraint still catches a create that races this check.
        let created = self.store.insert_department(&draft).await?;
        info!(id = created.id, "department created");
        Ok(created)
    }

    #[instrument(name = "hr.departments.update", skip(self, draft))]
    pub async fn update(&self, id: DepartmentId, draft: DepartmentDraft) -> HrResult<Department> {
        let current = self.get_by_id(id).await?;
        let draft = draft.normalized()?;
        if current.name != draft.name {
            if let Some(other) = self.store.find_department_by_name(&draft.name).await? {
                if other.id != id {
                    return Err(HrError::duplicate_department(&draft.name));
                }
            }
        }
        self.store.update_department(id, &draft).await
    }

    /// Removes the department even when employees still point at it.
    #[instrument(name = "hr.departments.delete", skip(self))]
    pub async fn delete(&self, id: DepartmentId) -> HrResult<()> {
        let department = self.get_by_id(id).await?;
        let referencing = self.store.count_employees_in_department(id).await?;
        self.store.delete_department(department.id).await?;
        if referencing > 0 {
            warn!(
                id,
                name = %department.name,
                employees = referencing,
                "department deleted while still referenced"
            );
        }
        Ok(())
    }
}
