//! Reference lookup records seeded before normal operation.
//!
//! # Responsibility
//! - Define the animal-type and vet shapes used as lookup data.
//!
//! # Invariants
//! - `AnimalType::name` is unique per store (case-insensitive).
//! - `Vet::license_number` is unique per store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an animal-type record.
pub type AnimalTypeId = Uuid;

/// Stable identifier for a veterinarian record.
pub type VetId = Uuid;

/// Species-level category an animal belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalType {
    /// Stable global ID used for linking from animal records.
    pub uuid: AnimalTypeId,
    /// Display name, unique across the store.
    pub name: String,
}

impl AnimalType {
    /// Creates an animal type with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an animal type with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: AnimalTypeId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }
}

/// Veterinarian contact record referenced from checkups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vet {
    /// Stable global ID used for linking from checkup records.
    pub uuid: VetId,
    /// Display name shown alongside checkup entries.
    pub name: String,
    /// Practice address, free text.
    pub address: String,
    /// Regulatory license number, unique across the store.
    pub license_number: String,
}

impl Vet {
    /// Creates a vet record with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, address, license_number)
    }

    /// Creates a vet record with a caller-provided stable ID.
    pub fn with_id(
        uuid: VetId,
        name: impl Into<String>,
        address: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            address: address.into(),
            license_number: license_number.into(),
        }
    }
}
