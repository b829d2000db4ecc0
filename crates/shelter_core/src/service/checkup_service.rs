//! Checkup use-case service.
//!
//! # Responsibility
//! - Record, amend, list, and remove checkup entries for an animal.
//! - Resolve the vet reference and denormalize the vet name at write time.
//!
//! # Invariants
//! - The checkup date is validated before any vet lookup.
//! - `vet_name` always comes from the vet table, never from caller input.

use crate::model::animal::AnimalId;
use crate::model::checkup::{validate_checkup_date, Checkup, CheckupId, CheckupValidationError};
use crate::model::reference::{Vet, VetId};
use crate::repo::checkup_repo::CheckupRepository;
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw caller input for recording or amending a checkup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckupDetails {
    /// Stable ID of the vet who performed the checkup.
    pub vet_id: VetId,
    pub diagnosis: String,
    pub treatment: String,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
}

/// Service error for checkup use-cases.
#[derive(Debug)]
pub enum CheckupServiceError {
    /// Date text failed calendar validation.
    InvalidDate(CheckupValidationError),
    /// The referenced vet does not exist.
    UnknownVet(VetId),
    /// Target animal does not exist.
    AnimalNotFound(AnimalId),
    /// Target checkup does not exist.
    CheckupNotFound(CheckupId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CheckupServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::UnknownVet(id) => write!(f, "unknown vet: {id}"),
            Self::AnimalNotFound(id) => write!(f, "animal not found: {id}"),
            Self::CheckupNotFound(id) => write!(f, "checkup not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CheckupServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CheckupServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::CheckupValidation(err) => Self::InvalidDate(err),
            other => Self::Repo(other),
        }
    }
}

/// Checkup service facade over repository implementations.
pub struct CheckupService<C: CheckupRepository, R: ReferenceRepository> {
    checkups: C,
    references: R,
}

impl<C: CheckupRepository, R: ReferenceRepository> CheckupService<C, R> {
    /// Creates a service using the provided repository implementations.
    pub fn new(checkups: C, references: R) -> Self {
        Self {
            checkups,
            references,
        }
    }

    /// Records one checkup in an animal's history.
    ///
    /// # Contract
    /// - The date must be a real `YYYY-MM-DD` calendar date.
    /// - The vet reference must resolve; its name is embedded denormalized.
    pub fn record_checkup(
        &self,
        animal_id: AnimalId,
        details: &CheckupDetails,
    ) -> Result<Checkup, CheckupServiceError> {
        validate_checkup_date(&details.date).map_err(CheckupServiceError::InvalidDate)?;
        let vet = self.resolve_vet(details.vet_id)?;

        let checkup = Checkup::new(
            vet.uuid,
            vet.name,
            details.diagnosis.clone(),
            details.treatment.clone(),
            details.date.clone(),
        );

        match self.checkups.append_checkup(animal_id, &checkup) {
            Ok(_) => Ok(checkup),
            Err(RepoError::NotFound(id)) => Err(CheckupServiceError::AnimalNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Replaces one recorded checkup's fields in place.
    ///
    /// The vet reference is re-resolved so the denormalized name stays
    /// consistent with the vet table.
    pub fn amend_checkup(
        &self,
        checkup_id: CheckupId,
        details: &CheckupDetails,
    ) -> Result<Checkup, CheckupServiceError> {
        validate_checkup_date(&details.date).map_err(CheckupServiceError::InvalidDate)?;
        let vet = self.resolve_vet(details.vet_id)?;

        if self.checkups.get_checkup(checkup_id)?.is_none() {
            return Err(CheckupServiceError::CheckupNotFound(checkup_id));
        }

        let checkup = Checkup {
            uuid: checkup_id,
            vet_uuid: vet.uuid,
            vet_name: vet.name,
            diagnosis: details.diagnosis.clone(),
            treatment: details.treatment.clone(),
            date: details.date.clone(),
        };

        match self.checkups.update_checkup(&checkup) {
            Ok(()) => Ok(checkup),
            Err(RepoError::NotFound(id)) => Err(CheckupServiceError::CheckupNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Lists one animal's checkup history ordered by date, then uuid.
    pub fn animal_history(&self, animal_id: AnimalId) -> Result<Vec<Checkup>, CheckupServiceError> {
        match self.checkups.list_checkups(animal_id) {
            Ok(checkups) => Ok(checkups),
            Err(RepoError::NotFound(id)) => Err(CheckupServiceError::AnimalNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Removes one checkup from its animal's history.
    pub fn remove_checkup(&self, checkup_id: CheckupId) -> Result<(), CheckupServiceError> {
        match self.checkups.remove_checkup(checkup_id) {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound(id)) => Err(CheckupServiceError::CheckupNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    fn resolve_vet(&self, vet_id: VetId) -> Result<Vet, CheckupServiceError> {
        self.references
            .get_vet(vet_id)?
            .ok_or(CheckupServiceError::UnknownVet(vet_id))
    }
}
