//! Department Resolver: turns an employee's department reference into a
//! persisted department, creating it by name when needed.

use tracing::{info, instrument, warn};

use crate::directory::DepartmentDirectory;
use crate::error::{HrError, HrResult};
use crate::model::{Department, DepartmentDraft, DepartmentRef};
use crate::store::HrStore;

pub struct DepartmentResolver<S> {
    directory: DepartmentDirectory<S>,
}

impl<S> Clone for DepartmentResolver<S> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}

impl<S: HrStore> DepartmentResolver<S> {
    pub fn new(directory: DepartmentDirectory<S>) -> Self {
        Self { directory }
    }

    /// Resolves a reference to the department it names.
    ///
    /// - no reference: `None`
    /// - an id: that department, or `NotFound`
    /// - a name only: the existing department with that exact name, otherwise
    ///   a new one built from the reference. An existing department is never
    ///   modified.
    ///
    /// Losing a concurrent create for the same name yields a `Conflict` from
    /// the directory; the winner is then re-read once and used instead.
    #[instrument(name = "hr.departments.resolve", skip_all)]
    pub async fn resolve(&self, reference: Option<&DepartmentRef>) -> HrResult<Option<Department>> {
        let Some(reference) = reference else {
            return Ok(None);
        };

        if let Some(id) = reference.id {
            return self.directory.get_by_id(id).await.map(Some);
        }

        let name = reference
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                HrError::Validation("department reference needs an id or a name".into())
            })?;

        if let Some(existing) = self.directory.find_by_name(name).await? {
            return Ok(Some(existing));
        }

        let draft = DepartmentDraft {
            name: name.to_string(),
            description: reference.description.clone(),
            manager: reference.manager.clone(),
        };
        match self.directory.create(draft).await {
            Ok(created) => {
                info!(id = created.id, name, "department created from employee reference");
                Ok(Some(created))
            }
            Err(HrError::Conflict(message)) => {
                warn!(name, "department created concurrently; re-reading by name");
                match self.directory.find_by_name(name).await? {
                    Some(winner) => Ok(Some(winner)),
                    None => Err(HrError::Conflict(message)),
                }
            }
            Err(err) => Err(err),
        }
    }
}
