//! HR core: departments, employees and the logic linking them.
//!
//! [`Hr`] bundles the four services over one [`HrStore`]:
//! - [`DepartmentDirectory`] owns department existence and name uniqueness.
//! - [`EmployeeRegistry`] owns employee CRUD.
//! - [`DepartmentResolver`] maps an employee's department reference (by id or
//!   by name) to a persisted department, creating it when needed.
//! - [`Aggregation`] builds counts and composite views.

use std::sync::Arc;

use platform_db::DbPool;

pub mod aggregation;
pub mod bootstrap;
pub mod directory;
pub mod error;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod store;

pub use aggregation::Aggregation;
pub use bootstrap::{SeedFixtures, SeedReport, seed};
pub use directory::DepartmentDirectory;
pub use error::{ErrorKind, HrError, HrResult};
pub use model::{
    Department, DepartmentDraft, DepartmentId, DepartmentRef, DepartmentSummary, Employee,
    EmployeeDraft, EmployeeId, EmployeeView,
};
pub use registry::EmployeeRegistry;
pub use resolver::DepartmentResolver;
pub use store::{HrStore, SeaOrmStore};

pub struct Hr<S> {
    store: Arc<S>,
    directory: DepartmentDirectory<S>,
    registry: EmployeeRegistry<S>,
    aggregation: Aggregation<S>,
}

impl<S> Clone for Hr<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: self.directory.clone(),
            registry: self.registry.clone(),
            aggregation: self.aggregation.clone(),
        }
    }
}

impl<S: HrStore> Hr<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        let directory = DepartmentDirectory::new(Arc::clone(&store));
        let resolver = DepartmentResolver::new(directory.clone());
        let registry = EmployeeRegistry::new(Arc::clone(&store), resolver);
        let aggregation = Aggregation::new(Arc::clone(&store));
        Self {
            store,
            directory,
            registry,
            aggregation,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn directory(&self) -> &DepartmentDirectory<S> {
        &self.directory
    }

    pub fn registry(&self) -> &EmployeeRegistry<S> {
        &self.registry
    }

    pub fn aggregation(&self) -> &Aggregation<S> {
        &self.aggregation
    }
}

impl Hr<SeaOrmStore> {
    pub fn with_connection(db: DbPool) -> Self {
        Self::new(SeaOrmStore::new(db))
    }
}
