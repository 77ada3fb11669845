mod common;

use common::{management, setup_hr};
use products_hr::{DepartmentDraft, HrError};

#[tokio::test]
async fn create_assigns_id_and_keeps_fields() {
    let hr = setup_hr().await;
    let dept = management(&hr).await;
    assert_eq!(dept.id, 1);
    assert_eq!(dept.name, "Management");
    assert_eq!(dept.description.as_deref(), Some("Management Department"));
    assert_eq!(dept.manager.as_deref(), Some("Admin"));

    let loaded = hr.directory().get_by_id(dept.id).await.unwrap();
    assert_eq!(loaded, dept);
}

#[tokio::test]
async fn duplicate_names_yield_one_success_and_one_conflict() {
    let hr = setup_hr().await;
    let first = hr.directory().create(DepartmentDraft::new("Sales")).await;
    let second = hr.directory().create(DepartmentDraft::new("Sales")).await;
    assert!(first.is_ok());
    match second {
        Err(HrError::Conflict(message)) => assert!(message.contains("already exists")),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(hr.directory().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn names_are_trimmed_before_uniqueness_check() {
    let hr = setup_hr().await;
    hr.directory().create(DepartmentDraft::new("Ops")).await.unwrap();
    let err = hr
        .directory()
        .create(DepartmentDraft::new("  Ops  "))
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::Conflict(_)));
}

#[tokio::test]
async fn blank_name_is_a_validation_error() {
    let hr = setup_hr().await;
    let err = hr.directory().create(DepartmentDraft::new(" ")).await.unwrap_err();
    assert!(matches!(err, HrError::Validation(_)));
    assert!(hr.directory().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let hr = setup_hr().await;
    assert!(matches!(
        hr.directory().get_by_id(99).await,
        Err(HrError::NotFound { entity: "department", id: 99 })
    ));
    assert!(matches!(
        hr.directory().update(99, DepartmentDraft::new("X")).await,
        Err(HrError::NotFound { .. })
    ));
    assert!(matches!(
        hr.directory().delete(99).await,
        Err(HrError::NotFound { .. })
    ));
}

#[tokio::test]
async fn find_by_name_is_exact_and_absence_is_not_an_error() {
    let hr = setup_hr().await;
    let dept = management(&hr).await;
    let found = hr.directory().find_by_name("Management").await.unwrap();
    assert_eq!(found.map(|d| d.id), Some(dept.id));
    assert!(hr.directory().find_by_name("management").await.unwrap().is_none());
    assert!(hr.directory().find_by_name("Nowhere").await.unwrap().is_none());
}

#[tokio::test]
async fn rename_onto_taken_name_conflicts() {
    let hr = setup_hr().await;
    hr.directory().create(DepartmentDraft::new("Sales")).await.unwrap();
    let support = hr
        .directory()
        .create(DepartmentDraft::new("Support"))
        .await
        .unwrap();
    let err = hr
        .directory()
        .update(support.id, DepartmentDraft::new("Sales"))
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::Conflict(_)));
    let unchanged = hr.directory().get_by_id(support.id).await.unwrap();
    assert_eq!(unchanged.name, "Support");
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let hr = setup_hr().await;
    let dept = management(&hr).await;

    let same_name = hr
        .directory()
        .update(dept.id, DepartmentDraft::new("Management").with_manager("Grace"))
        .await
        .unwrap();
    assert_eq!(same_name.manager.as_deref(), Some("Grace"));
    assert_eq!(same_name.description, None);

    let renamed = hr
        .directory()
        .update(dept.id, DepartmentDraft::new("Leadership"))
        .await
        .unwrap();
    assert_eq!(renamed.id, dept.id);
    assert_eq!(renamed.name, "Leadership");
    assert!(hr.directory().find_by_name("Management").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_the_department() {
    let hr = setup_hr().await;
    let dept = management(&hr).await;
    hr.directory().delete(dept.id).await.unwrap();
    assert!(matches!(
        hr.directory().get_by_id(dept.id).await,
        Err(HrError::NotFound { .. })
    ));
}
