//! Entity Store: the persistence seam of the HR core.

use async_trait::async_trait;
use entity::{departments, employees};
use platform_db::{DbPool, is_unique_violation};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::error::{HrError, HrResult};
use crate::model::{
    Department, DepartmentDraft, DepartmentId, Employee, EmployeeId, EmployeeRecord,
};

/// Keyed storage for departments and employees.
///
/// Writes that break a unique constraint fail with [`HrError::Conflict`];
/// updates and deletes of a missing id fail with [`HrError::NotFound`].
#[async_trait]
pub trait HrStore: Send + Sync {
    async fn list_departments(&self) -> HrResult<Vec<Department>>;

    async fn find_department(&self, id: DepartmentId) -> HrResult<Option<Department>>;

    /// Exact, case-sensitive match.
    async fn find_department_by_name(&self, name: &str) -> HrResult<Option<Department>>;

    async fn insert_department(&self, draft: &DepartmentDraft) -> HrResult<Department>;

    async fn update_department(
        &self,
        id: DepartmentId,
        draft: &DepartmentDraft,
    ) -> HrResult<Department>;

    async fn delete_department(&self, id: DepartmentId) -> HrResult<()>;

    async fn count_departments(&self) -> HrResult<u64>;

    async fn list_employees(&self) -> HrResult<Vec<Employee>>;

    async fn find_employee(&self, id: EmployeeId) -> HrResult<Option<Employee>>;

    async fn insert_employee(&self, record: &EmployeeRecord) -> HrResult<Employee>;

    async fn update_employee(&self, id: EmployeeId, record: &EmployeeRecord)
    -> HrResult<Employee>;

    async fn delete_employee(&self, id: EmployeeId) -> HrResult<()>;

    async fn count_employees(&self) -> HrResult<u64>;

    async fn count_employees_in_department(&self, id: DepartmentId) -> HrResult<u64>;
}

/// [`HrStore`] backed by a sea-orm connection pool.
#[derive(Clone, Debug)]
pub struct SeaOrmStore {
    db: DbPool,
}

impl SeaOrmStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

fn write_error(err: DbErr, conflict: impl FnOnce() -> HrError) -> HrError {
    if is_unique_violation(&err) {
        conflict()
    } else {
        HrError::Db(err)
    }
}

/// `ActiveModel::update` reports a row removed since it was read as
/// `RecordNotUpdated` or `RecordNotFound`.
fn update_error(
    err: DbErr,
    missing: impl FnOnce() -> HrError,
    conflict: impl FnOnce() -> HrError,
) -> HrError {
    match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => missing(),
        other => write_error(other, conflict),
    }
}

#[async_trait]
impl HrStore for SeaOrmStore {
    async fn list_departments(&self) -> HrResult<Vec<Department>> {
        let rows = departments::Entity::find()
            .order_by_asc(departments::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_department(&self, id: DepartmentId) -> HrResult<Option<Department>> {
        Ok(departments::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_department_by_name(&self, name: &str) -> HrResult<Option<Department>> {
        let row = departments::Entity::find()
            .filter(departments::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    async fn insert_department(&self, draft: &DepartmentDraft) -> HrResult<Department> {
        departments::ActiveModel {
            id: NotSet,
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            manager: Set(draft.manager.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, || HrError::duplicate_department(&draft.name)))
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        draft: &DepartmentDraft,
    ) -> HrResult<Department> {
        let existing = departments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| HrError::department_not_found(id))?;
        let mut active: departments::ActiveModel = existing.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        active.manager = Set(draft.manager.clone());
        active
            .update(&self.db)
            .await
            .map_err(|err| {
                update_error(
                    err,
                    || HrError::department_not_found(id),
                    || HrError::duplicate_department(&draft.name),
                )
            })
    }

    async fn delete_department(&self, id: DepartmentId) -> HrResult<()> {
        let result = departments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(HrError::department_not_found(id));
        }
        Ok(())
    }

    async fn count_departments(&self) -> HrResult<u64> {
        Ok(departments::Entity::find().count(&self.db).await?)
    }

    async fn list_employees(&self) -> HrResult<Vec<Employee>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_employee(&self, id: EmployeeId) -> HrResult<Option<Employee>> {
        Ok(employees::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert_employee(&self, record: &EmployeeRecord) -> HrResult<Employee> {
        employees::ActiveModel {
            id: NotSet,
            first_name: Set(record.first_name.clone()),
            last_name: Set(record.last_name.clone()),
            email: Set(record.email.clone()),
            position: Set(record.position.clone()),
            department_id: Set(record.department_id),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, || HrError::duplicate_email(&record.email)))
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        record: &EmployeeRecord,
    ) -> HrResult<Employee> {
        let existing = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| HrError::employee_not_found(id))?;
        let mut active: employees::ActiveModel = existing.into();
        active.first_name = Set(record.first_name.clone());
        active.last_name = Set(record.last_name.clone());
        active.email = Set(record.email.clone());
        active.position = Set(record.position.clone());
        active.department_id = Set(record.department_id);
        active
            .update(&self.db)
            .await
            .map_err(|err| {
                update_error(
                    err,
                    || HrError::employee_not_found(id),
                    || HrError::duplicate_email(&record.email),
                )
            })
    }

    async fn delete_employee(&self, id: EmployeeId) -> HrResult<()> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(HrError::employee_not_found(id));
        }
        Ok(())
    }

    async fn count_employees(&self) -> HrResult<u64> {
        Ok(employees::Entity::find().count(&self.db).await?)
    }

    async fn count_employees_in_department(&self, id: DepartmentId) -> HrResult<u64> {
        let count = employees::Entity::find()
            .filter(employees::Column::DepartmentId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
