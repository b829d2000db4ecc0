//! Animal domain model.
//!
//! # Responsibility
//! - Define the canonical animal record with its embedded type reference.
//! - Accumulate field validation failures instead of stopping at the first.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another animal.
//! - `animal_type.name` mirrors the referenced type's name at write time.
//! - Name and breed carry at least [`MIN_TEXT_CHARS`] characters; age is
//!   at least 1.

use crate::model::reference::AnimalTypeId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an animal record.
pub type AnimalId = Uuid;

/// Minimum character count accepted for animal name and breed.
pub const MIN_TEXT_CHARS: usize = 4;

/// Embedded, denormalized reference to an animal type.
///
/// The name is copied from the referenced record when the animal is written,
/// so reads never need a join against the type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalTypeRef {
    /// Stable ID of the referenced animal type.
    pub uuid: AnimalTypeId,
    /// Type name as of the last write to this animal.
    pub name: String,
}

/// Canonical animal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    /// Stable global ID used for linking and checkup ownership.
    pub uuid: AnimalId,
    /// Animal display name.
    pub name: String,
    /// Breed, free text within length rules.
    pub breed: String,
    /// Age in years, at least 1.
    pub age: i64,
    /// Embedded type reference, serialized as `type` to match external naming.
    #[serde(rename = "type")]
    pub animal_type: AnimalTypeRef,
}

/// Single field rule violated by an animal write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalFieldError {
    /// Name is shorter than [`MIN_TEXT_CHARS`] characters.
    NameTooShort,
    /// Breed is shorter than [`MIN_TEXT_CHARS`] characters.
    BreedTooShort,
    /// Age is below 1.
    AgeNotPositive,
}

impl AnimalFieldError {
    /// Human-readable message for one field failure.
    pub fn message(self) -> &'static str {
        match self {
            Self::NameTooShort => "name must have more than 3 characters",
            Self::BreedTooShort => "breed must have more than 3 characters",
            Self::AgeNotPositive => "age must be a positive number",
        }
    }
}

/// Accumulated validation failures for one animal write.
///
/// All violated rules are reported together so callers can surface every
/// problem in a single round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalValidationError {
    pub failures: Vec<AnimalFieldError>,
}

impl Display for AnimalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "animal validation failed:")?;
        for failure in &self.failures {
            write!(f, " {};", failure.message())?;
        }
        Ok(())
    }
}

impl Error for AnimalValidationError {}

impl Animal {
    /// Creates a new animal with a generated stable ID.
    ///
    /// This constructor does not validate; call [`Animal::validate`] before
    /// persisting.
    pub fn new(
        name: impl Into<String>,
        breed: impl Into<String>,
        age: i64,
        animal_type: AnimalTypeRef,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, breed, age, animal_type)
    }

    /// Creates a new animal with a caller-provided stable ID.
    pub fn with_id(
        uuid: AnimalId,
        name: impl Into<String>,
        breed: impl Into<String>,
        age: i64,
        animal_type: AnimalTypeRef,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            breed: breed.into(),
            age,
            animal_type,
        }
    }

    /// Checks all field rules, accumulating every failure.
    pub fn validate(&self) -> Result<(), AnimalValidationError> {
        validate_animal_fields(&self.name, &self.breed, self.age)
    }
}

/// Checks animal field rules on raw input, accumulating every failure.
///
/// Services call this before resolving the type reference so malformed
/// input is rejected without a lookup round trip.
pub fn validate_animal_fields(
    name: &str,
    breed: &str,
    age: i64,
) -> Result<(), AnimalValidationError> {
    let mut failures = Vec::new();

    if name.trim().chars().count() < MIN_TEXT_CHARS {
        failures.push(AnimalFieldError::NameTooShort);
    }
    if breed.trim().chars().count() < MIN_TEXT_CHARS {
        failures.push(AnimalFieldError::BreedTooShort);
    }
    if age < 1 {
        failures.push(AnimalFieldError::AgeNotPositive);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AnimalValidationError { failures })
    }
}
