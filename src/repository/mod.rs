//! Repository Module
//!
//! Persistence contracts per entity, a MySQL implementation and an
//! in-memory one that enforces the same constraints.

pub mod departement;
pub mod employe;
pub mod memory;
pub mod poste;

pub use departement::{DepartementRepository, MySqlDepartementRepository};
pub use employe::{EmployeRepository, MySqlEmployeRepository};
pub use memory::MemoryStore;
pub use poste::{MySqlPosteRepository, PosteRepository};

use sqlx::MySqlPool;
use std::sync::Arc;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique constraint rejected the write
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// A foreign key rejected the write or the delete
    #[error("Referenced: {0}")]
    Referenced(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::Referenced(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// The three repositories the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub postes: Arc<dyn PosteRepository>,
    pub departements: Arc<dyn DepartementRepository>,
    pub employes: Arc<dyn EmployeRepository>,
}

impl Repositories {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            postes: Arc::new(MySqlPosteRepository::new(pool.clone())),
            departements: Arc::new(MySqlDepartementRepository::new(pool.clone())),
            employes: Arc::new(MySqlEmployeRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            postes: store.clone(),
            departements: store.clone(),
            employes: store,
        }
    }
}
