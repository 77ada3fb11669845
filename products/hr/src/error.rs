use sea_orm::DbErr;
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Coarse classification for transport layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl HrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HrError::NotFound { .. } => ErrorKind::NotFound,
            HrError::Conflict(_) => ErrorKind::Conflict,
            HrError::Validation(_) => ErrorKind::Validation,
            HrError::Db(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn department_not_found(id: i32) -> Self {
        HrError::NotFound {
            entity: "department",
            id,
        }
    }

    pub(crate) fn employee_not_found(id: i32) -> Self {
        HrError::NotFound {
            entity: "employee",
            id,
        }
    }

    pub(crate) fn duplicate_department(name: &str) -> Self {
        HrError::Conflict(format!("department with name '{name}' already exists"))
    }

    pub(crate) fn duplicate_email(email: &str) -> Self {
        HrError::Conflict(format!("employee with email '{email}' already exists"))
    }

    pub(crate) fn required(field: &str) -> Self {
        HrError::Validation(format!("{field} must not be empty"))
    }
}
