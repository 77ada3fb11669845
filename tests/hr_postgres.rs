use anyhow::Result;
use hr_tests::PgTestContext;
use products_hr::{DepartmentDraft, DepartmentRef, EmployeeDraft, HrError};

macro_rules! pg_context {
    () => {
        match PgTestContext::new().await {
            Some(ctx) => ctx,
            None => {
                eprintln!("TEST_DATABASE_URL not set or unreachable; skipping");
                return Ok(());
            }
        }
    };
}

#[tokio::test]
async fn concurrent_implicit_creates_share_one_department() -> Result<()> {
    let ctx = pg_context!();
    let hr = ctx.hr();

    let hires = (0..8).map(|n| {
        let hr = hr.clone();
        tokio::spawn(async move {
            let draft = EmployeeDraft::new("Racer", format!("racer{n}@company.com"))
                .with_department(DepartmentRef::by_name("Logistics"));
            hr.registry().create(draft).await
        })
    });
    let mut department_ids = Vec::new();
    for handle in hires.collect::<Vec<_>>() {
        let employee = handle.await??;
        department_ids.push(employee.department_id);
    }

    let departments = hr.directory().list().await?;
    assert_eq!(departments.len(), 1);
    let logistics = &departments[0];
    assert_eq!(logistics.name, "Logistics");
    assert!(department_ids.iter().all(|id| *id == Some(logistics.id)));
    assert_eq!(
        hr.aggregation()
            .count_employees_in_department(logistics)
            .await?,
        8
    );

    ctx.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn unique_constraints_surface_as_conflicts() -> Result<()> {
    let ctx = pg_context!();
    let hr = ctx.hr();

    hr.directory().create(DepartmentDraft::new("Finance")).await?;
    let dup = hr.directory().create(DepartmentDraft::new("Finance")).await;
    assert!(matches!(dup, Err(HrError::Conflict(_))));

    hr.registry()
        .create(EmployeeDraft::new("Ann", "ann@company.com"))
        .await?;
    let dup = hr
        .registry()
        .create(EmployeeDraft::new("Another", "ann@company.com"))
        .await;
    assert!(matches!(dup, Err(HrError::Conflict(_))));

    ctx.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn dangling_links_survive_department_delete() -> Result<()> {
    let ctx = pg_context!();
    let hr = ctx.hr();

    let employee = hr
        .registry()
        .create(
            EmployeeDraft::new("Dee", "dee@company.com")
                .with_department(DepartmentRef::by_name("Interim")),
        )
        .await?;
    let department_id = employee.department_id.expect("linked to Interim");
    hr.directory().delete(department_id).await?;

    let view = hr
        .aggregation()
        .employee_view(employee.id)
        .await?
        .expect("employee still present");
    assert!(view.is_dangling());
    assert!(hr.aggregation().department_summaries().await?.is_empty());

    ctx.cleanup().await;
    Ok(())
}
