//! Repositorios de acceso a datos

pub mod crud_repository;
pub mod entity;
pub mod report_repository;

pub use crud_repository::CrudRepository;
pub use entity::{Draft, Entity, EntitySchema, Key, Reference, SqlValue};
pub use report_repository::ReportRepository;
