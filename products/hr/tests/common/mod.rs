#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use products_hr::{
    Department, DepartmentDraft, DepartmentRef, Employee, EmployeeDraft, Hr, HrStore, SeaOrmStore,
};
use sea_orm::{Database, DatabaseConnection};

pub async fn migrated_sqlite() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn setup_hr() -> Hr<SeaOrmStore> {
    Hr::with_connection(migrated_sqlite().await)
}

pub async fn management<S: HrStore>(hr: &Hr<S>) -> Department {
    hr.directory()
        .create(
            DepartmentDraft::new("Management")
                .with_description("Management Department")
                .with_manager("Admin"),
        )
        .await
        .unwrap()
}

pub async fn hire<S: HrStore>(hr: &Hr<S>, email: &str, department: Option<&str>) -> Employee {
    let mut draft = EmployeeDraft::new("Test", email);
    if let Some(name) = department {
        draft = draft.with_department(DepartmentRef::by_name(name));
    }
    hr.registry().create(draft).await.unwrap()
}

pub async fn departments_named<S: HrStore>(hr: &Hr<S>, name: &str) -> usize {
    hr.directory()
        .list()
        .await
        .unwrap()
        .iter()
        .filter(|d| d.name == name)
        .count()
}
