//! sea-orm models for the HR tables.

pub mod departments;
pub mod employees;
