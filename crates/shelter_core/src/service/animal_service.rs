//! Animal use-case service.
//!
//! # Responsibility
//! - Provide animal register/update/get/list/delete APIs over raw input.
//! - Resolve the animal-type reference and denormalize its name at write
//!   time.
//!
//! # Invariants
//! - Field validation runs before any type lookup; all failures are
//!   reported together.
//! - The embedded type name always comes from the reference table, never
//!   from caller input.

use crate::model::animal::{
    validate_animal_fields, Animal, AnimalId, AnimalTypeRef, AnimalValidationError,
};
use crate::model::reference::AnimalTypeId;
use crate::repo::animal_repo::{AnimalListQuery, AnimalRepository};
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw caller input for registering or updating an animal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalDetails {
    pub name: String,
    pub breed: String,
    pub age: i64,
    /// Stable ID of the animal type to reference.
    pub animal_type_id: AnimalTypeId,
}

/// Service error for animal use-cases.
#[derive(Debug)]
pub enum AnimalServiceError {
    /// One or more field rules failed; all failures are listed.
    Validation(AnimalValidationError),
    /// The referenced animal type does not exist.
    UnknownAnimalType(AnimalTypeId),
    /// Target animal does not exist.
    AnimalNotFound(AnimalId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AnimalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnknownAnimalType(id) => write!(f, "unknown animal type: {id}"),
            Self::AnimalNotFound(id) => write!(f, "animal not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AnimalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AnimalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::AnimalValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Animal service facade over repository implementations.
pub struct AnimalService<A: AnimalRepository, R: ReferenceRepository> {
    animals: A,
    references: R,
}

impl<A: AnimalRepository, R: ReferenceRepository> AnimalService<A, R> {
    /// Creates a service using the provided repository implementations.
    pub fn new(animals: A, references: R) -> Self {
        Self {
            animals,
            references,
        }
    }

    /// Registers a new animal from raw input.
    ///
    /// # Contract
    /// - Field rules are checked first, accumulating every failure.
    /// - The type reference must resolve; its name is embedded denormalized.
    pub fn register_animal(&self, details: &AnimalDetails) -> Result<Animal, AnimalServiceError> {
        validate_animal_fields(&details.name, &details.breed, details.age)
            .map_err(AnimalServiceError::Validation)?;

        let type_ref = self.resolve_type_ref(details.animal_type_id)?;
        let animal = Animal::new(
            details.name.clone(),
            details.breed.clone(),
            details.age,
            type_ref,
        );
        self.animals.create_animal(&animal)?;
        Ok(animal)
    }

    /// Replaces an existing animal's details from raw input.
    ///
    /// Uses full replacement semantics; the type reference is re-resolved.
    pub fn update_animal(
        &self,
        animal_id: AnimalId,
        details: &AnimalDetails,
    ) -> Result<Animal, AnimalServiceError> {
        validate_animal_fields(&details.name, &details.breed, details.age)
            .map_err(AnimalServiceError::Validation)?;

        let type_ref = self.resolve_type_ref(details.animal_type_id)?;
        let animal = Animal::with_id(
            animal_id,
            details.name.clone(),
            details.breed.clone(),
            details.age,
            type_ref,
        );

        match self.animals.update_animal(&animal) {
            Ok(()) => Ok(animal),
            Err(RepoError::NotFound(id)) => Err(AnimalServiceError::AnimalNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Gets one animal by stable ID.
    pub fn get_animal(&self, animal_id: AnimalId) -> RepoResult<Option<Animal>> {
        self.animals.get_animal(animal_id)
    }

    /// Lists animals using filter and pagination options.
    pub fn list_animals(&self, query: &AnimalListQuery) -> RepoResult<Vec<Animal>> {
        self.animals.list_animals(query)
    }

    /// Deletes one animal and, by ownership, its checkup history.
    pub fn delete_animal(&self, animal_id: AnimalId) -> Result<(), AnimalServiceError> {
        match self.animals.delete_animal(animal_id) {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound(id)) => Err(AnimalServiceError::AnimalNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    fn resolve_type_ref(&self, id: AnimalTypeId) -> Result<AnimalTypeRef, AnimalServiceError> {
        let animal_type = self
            .references
            .get_animal_type(id)?
            .ok_or(AnimalServiceError::UnknownAnimalType(id))?;
        Ok(AnimalTypeRef {
            uuid: animal_type.uuid,
            name: animal_type.name,
        })
    }
}
