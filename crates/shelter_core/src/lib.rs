//! Core domain logic for the shelter record store.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::animal::{
    Animal, AnimalFieldError, AnimalId, AnimalTypeRef, AnimalValidationError,
};
pub use model::checkup::{Checkup, CheckupId, CheckupValidationError};
pub use model::reference::{AnimalType, AnimalTypeId, Vet, VetId};
pub use repo::animal_repo::{AnimalListQuery, AnimalRepository, SqliteAnimalRepository};
pub use repo::checkup_repo::{CheckupRepository, SqliteCheckupRepository};
pub use repo::reference_repo::{ReferenceRepository, SqliteReferenceRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{record_seed_checkup, seed_reference_data, SeedError, SeedReport};
pub use service::animal_service::{AnimalDetails, AnimalService, AnimalServiceError};
pub use service::checkup_service::{CheckupDetails, CheckupService, CheckupServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
