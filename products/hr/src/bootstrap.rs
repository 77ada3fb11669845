//! Idempotent first-start seeding.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::Hr;
use crate::error::HrResult;
use crate::model::{DepartmentDraft, DepartmentRef, EmployeeDraft};
use crate::store::HrStore;

/// Records to create on an empty store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFixtures {
    #[serde(default)]
    pub departments: Vec<DepartmentDraft>,
    #[serde(default)]
    pub employees: Vec<EmployeeDraft>,
}

impl Default for SeedFixtures {
    /// A `Management` department and an administrator linked to it by name.
    fn default() -> Self {
        Self {
            departments: vec![
                DepartmentDraft::new("Management")
                    .with_description("Management Department")
                    .with_manager("Admin"),
            ],
            employees: vec![
                EmployeeDraft::new("Admin", "admin@company.com")
                    .with_last_name("User")
                    .with_position("Administrator")
                    .with_department(
                        DepartmentRef::by_name("Management")
                            .with_description("Management Department")
                            .with_manager("Admin"),
                    ),
            ],
        }
    }
}

impl SeedFixtures {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub departments_created: usize,
    pub employees_created: usize,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.departments_created == 0 && self.employees_created == 0
    }
}

/// Creates the fixtures' departments when no department exists yet, then
/// its employees when no employee exists yet. Employees go through the
/// registry, so name references reuse or create departments as usual.
#[instrument(name = "hr.bootstrap.seed", skip_all)]
pub async fn seed<S: HrStore>(hr: &Hr<S>, fixtures: SeedFixtures) -> HrResult<SeedReport> {
    let mut report = SeedReport::default();

    if hr.store().count_departments().await? == 0 {
        for draft in fixtures.departments {
            hr.directory().create(draft).await?;
            report.departments_created += 1;
        }
    } else {
        debug!("departments present; skipping department fixtures");
    }

    if hr.store().count_employees().await? == 0 {
        for draft in fixtures.employees {
            let employee = hr.registry().create(draft).await?;
            info!(email = %employee.email, "seeded employee");
            report.employees_created += 1;
        }
    } else {
        debug!("employees present; skipping employee fixtures");
    }

    Ok(report)
}
