mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{departments_named, management, migrated_sqlite, setup_hr};
use products_hr::{
    Department, DepartmentDraft, DepartmentId, DepartmentRef, Employee, EmployeeDraft, EmployeeId,
    Hr, HrError, HrResult, HrStore, SeaOrmStore, model::EmployeeRecord,
};

#[tokio::test]
async fn absent_reference_resolves_to_nothing() {
    let hr = setup_hr().await;
    let employee = hr
        .registry()
        .create(EmployeeDraft::new("Solo", "solo@company.com"))
        .await
        .unwrap();
    assert_eq!(employee.department_id, None);
    assert!(hr.directory().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn id_reference_must_exist() {
    let hr = setup_hr().await;
    let err = hr
        .registry()
        .create(EmployeeDraft::new("Lost", "lost@company.com").with_department(DepartmentRef::by_id(42)))
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::NotFound { entity: "department", id: 42 }));
    assert!(hr.registry().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn id_wins_over_name() {
    let hr = setup_hr().await;
    let dept = management(&hr).await;
    let reference = DepartmentRef {
        id: Some(dept.id),
        name: Some("Somewhere Else".into()),
        ..DepartmentRef::default()
    };
    let employee = hr
        .registry()
        .create(EmployeeDraft::new("Ada", "ada@company.com").with_department(reference))
        .await
        .unwrap();
    assert_eq!(employee.department_id, Some(dept.id));
    assert!(hr.directory().find_by_name("Somewhere Else").await.unwrap().is_none());
}

#[tokio::test]
async fn existing_department_is_never_overwritten() {
    let hr = setup_hr().await;
    let dept = management(&hr).await;
    hr.registry()
        .create(
            EmployeeDraft::new("Ada", "ada@company.com").with_department(
                DepartmentRef::by_name("Management")
                    .with_description("Hijacked")
                    .with_manager("Mallory"),
            ),
        )
        .await
        .unwrap();
    let reloaded = hr.directory().get_by_id(dept.id).await.unwrap();
    assert_eq!(reloaded, dept);
}

#[tokio::test]
async fn implicit_creation_uses_supplied_details() {
    let hr = setup_hr().await;
    hr.registry()
        .create(
            EmployeeDraft::new("Ken", "ken@company.com").with_department(
                DepartmentRef::by_name(" Research ")
                    .with_description("Labs")
                    .with_manager("Ken"),
            ),
        )
        .await
        .unwrap();
    let research = hr
        .directory()
        .find_by_name("Research")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(research.description.as_deref(), Some("Labs"));
    assert_eq!(research.manager.as_deref(), Some("Ken"));
}

#[tokio::test]
async fn empty_reference_is_rejected() {
    let hr = setup_hr().await;
    let err = hr
        .registry()
        .create(
            EmployeeDraft::new("Nobody", "nobody@company.com")
                .with_department(DepartmentRef::by_name("   ")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::Validation(_)));
}

/// Delegating store whose first `hidden` name lookups report nothing. The
/// first hidden lookup also inserts the department itself, standing in for a
/// concurrent request that wins the create.
struct RacingStore {
    inner: SeaOrmStore,
    hidden: AtomicUsize,
    winner: DepartmentDraft,
}

impl RacingStore {
    fn new(inner: SeaOrmStore, hidden: usize, winner: DepartmentDraft) -> Self {
        Self {
            inner,
            hidden: AtomicUsize::new(hidden),
            winner,
        }
    }
}

#[async_trait]
impl HrStore for RacingStore {
    async fn list_departments(&self) -> HrResult<Vec<Department>> {
        self.inner.list_departments().await
    }

    async fn find_department(&self, id: DepartmentId) -> HrResult<Option<Department>> {
        self.inner.find_department(id).await
    }

    async fn find_department_by_name(&self, name: &str) -> HrResult<Option<Department>> {
        let remaining = self.hidden.load(Ordering::SeqCst);
        if remaining > 0 {
            self.hidden.store(remaining - 1, Ordering::SeqCst);
            if self.inner.find_department_by_name(name).await?.is_none() {
                self.inner.insert_department(&self.winner).await?;
            }
            return Ok(None);
        }
        self.inner.find_department_by_name(name).await
    }

    async fn insert_department(&self, draft: &DepartmentDraft) -> HrResult<Department> {
        self.inner.insert_department(draft).await
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        draft: &DepartmentDraft,
    ) -> HrResult<Department> {
        self.inner.update_department(id, draft).await
    }

    async fn delete_department(&self, id: DepartmentId) -> HrResult<()> {
        self.inner.delete_department(id).await
    }

    async fn count_departments(&self) -> HrResult<u64> {
        self.inner.count_departments().await
    }

    async fn list_employees(&self) -> HrResult<Vec<Employee>> {
        self.inner.list_employees().await
    }

    async fn find_employee(&self, id: EmployeeId) -> HrResult<Option<Employee>> {
        self.inner.find_employee(id).await
    }

    async fn insert_employee(&self, record: &EmployeeRecord) -> HrResult<Employee> {
        self.inner.insert_employee(record).await
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        record: &EmployeeRecord,
    ) -> HrResult<Employee> {
        self.inner.update_employee(id, record).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> HrResult<()> {
        self.inner.delete_employee(id).await
    }

    async fn count_employees(&self) -> HrResult<u64> {
        self.inner.count_employees().await
    }

    async fn count_employees_in_department(&self, id: DepartmentId) -> HrResult<u64> {
        self.inner.count_employees_in_department(id).await
    }
}

async fn racing_hr(hidden: usize) -> Hr<RacingStore> {
    let inner = SeaOrmStore::new(migrated_sqlite().await);
    let winner = DepartmentDraft::new("Research").with_description("created by the winner");
    Hr::new(RacingStore::new(inner, hidden, winner))
}

async fn assert_loser_reuses_winner(hr: Hr<RacingStore>) {
    let employee = hr
        .registry()
        .create(
            EmployeeDraft::new("Late", "late@company.com")
                .with_department(DepartmentRef::by_name("Research").with_description("loser")),
        )
        .await
        .unwrap();

    let departments = hr.directory().list().await.unwrap();
    assert_eq!(departments.len(), 1);
    let research = &departments[0];
    assert_eq!(research.description.as_deref(), Some("created by the winner"));
    assert_eq!(employee.department_id, Some(research.id));
    assert_eq!(departments_named(&hr, "Research").await, 1);
}

#[tokio::test]
async fn lost_race_caught_by_directory_check_falls_back_to_lookup() {
    assert_loser_reuses_winner(racing_hr(1).await).await;
}

#[tokio::test]
async fn lost_race_caught_by_unique_constraint_falls_back_to_lookup() {
    assert_loser_reuses_winner(racing_hr(2).await).await;
}

#[tokio::test]
async fn conflict_surfaces_when_winner_cannot_be_reread() {
    // Every lookup stays hidden, so the fallback read finds nothing either.
    let hr = racing_hr(3).await;
    let err = hr
        .registry()
        .create(
            EmployeeDraft::new("Late", "late@company.com")
                .with_department(DepartmentRef::by_name("Research")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::Conflict(_)));
    assert!(hr.registry().list().await.unwrap().is_empty());
}
