//! Baseline reference data and the demo checkup entry.
//!
//! # Responsibility
//! - Insert the fixed animal-type and vet lookup records.
//! - Append the canned first checkup to a caller-chosen animal.
//!
//! # Invariants
//! - Seeding is idempotent: re-running never duplicates reference rows.
//! - The checkup's vet is resolved by license number at runtime, never by a
//!   pasted identifier.

use crate::model::animal::AnimalId;
use crate::model::checkup::Checkup;
use crate::model::reference::{AnimalType, Vet};
use crate::repo::checkup_repo::{CheckupRepository, SqliteCheckupRepository};
use crate::repo::reference_repo::{ReferenceRepository, SqliteReferenceRepository};
use crate::repo::RepoError;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Animal types established as baseline lookup values.
pub const ANIMAL_TYPE_SEED: [&str; 4] = ["Dog", "Cat", "Bird", "Rodent"];

/// Vet records established as baseline lookup values:
/// (name, address, license number).
pub const VET_SEED: [(&str, &str, &str); 2] = [
    ("Dr Chua", "Sunset Drive Lane 1 Blk 313 #01-01", "AX12345"),
    ("Dr Tan", "Ang Mio Kio Ave 4 Blk 221 #02-02", "DX45678"),
];

/// License number of the vet who performs the seeded checkup.
pub const SEED_CHECKUP_VET_LICENSE: &str = "AX12345";
/// Diagnosis recorded by the seeded checkup.
pub const SEED_CHECKUP_DIAGNOSIS: &str = "Hiccups";
/// Treatment recorded by the seeded checkup.
pub const SEED_CHECKUP_TREATMENT: &str = "Medication";
/// Date recorded by the seeded checkup.
pub const SEED_CHECKUP_DATE: &str = "2020-06-01";

/// Row counts actually inserted by one seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub animal_types_inserted: u32,
    pub vets_inserted: u32,
}

/// Error for seeding operations.
#[derive(Debug)]
pub enum SeedError {
    /// The seeded vet is absent; reference data was never applied.
    SeedVetMissing(&'static str),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SeedVetMissing(license) => write!(
                f,
                "seed vet with license `{license}` is missing; run reference seeding first"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SeedVetMissing(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Inserts baseline animal types and vets, in that order.
///
/// # Side effects
/// - Emits `seed_reference` logging events with inserted counts.
///
/// Rows whose natural key already exists are skipped, so running this
/// against an already-seeded store reports zero insertions.
pub fn seed_reference_data(conn: &Connection) -> Result<SeedReport, SeedError> {
    info!("event=seed_reference module=seed status=start");

    let repo = match SqliteReferenceRepository::try_new(conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=seed_reference module=seed status=error error={err}");
            return Err(err.into());
        }
    };

    let types: Vec<AnimalType> = ANIMAL_TYPE_SEED
        .iter()
        .map(|name| AnimalType::new(*name))
        .collect();
    let vets: Vec<Vet> = VET_SEED
        .iter()
        .map(|(name, address, license)| Vet::new(*name, *address, *license))
        .collect();

    let report = insert_reference_rows(&repo, &types, &vets);
    match report {
        Ok(report) => {
            info!(
                "event=seed_reference module=seed status=ok types_inserted={} vets_inserted={}",
                report.animal_types_inserted, report.vets_inserted
            );
            Ok(report)
        }
        Err(err) => {
            error!("event=seed_reference module=seed status=error error={err}");
            Err(err)
        }
    }
}

fn insert_reference_rows<R: ReferenceRepository>(
    repo: &R,
    types: &[AnimalType],
    vets: &[Vet],
) -> Result<SeedReport, SeedError> {
    let animal_types_inserted = repo.insert_animal_types(types)?;
    let vets_inserted = repo.insert_vets(vets)?;
    Ok(SeedReport {
        animal_types_inserted,
        vets_inserted,
    })
}

/// Appends the canned first checkup to the given animal's history.
///
/// The performing vet is looked up by license number at runtime; a missing
/// vet or a missing animal is an error, never a silent no-op.
///
/// # Side effects
/// - Emits `seed_checkup` logging events.
pub fn record_seed_checkup(conn: &Connection, animal_id: AnimalId) -> Result<Checkup, SeedError> {
    info!("event=seed_checkup module=seed status=start animal_id={animal_id}");

    let result = append_seed_checkup(conn, animal_id);
    match &result {
        Ok(checkup) => info!(
            "event=seed_checkup module=seed status=ok animal_id={animal_id} checkup_id={}",
            checkup.uuid
        ),
        Err(err) => {
            error!("event=seed_checkup module=seed status=error animal_id={animal_id} error={err}");
        }
    }
    result
}

fn append_seed_checkup(conn: &Connection, animal_id: AnimalId) -> Result<Checkup, SeedError> {
    let references = SqliteReferenceRepository::try_new(conn)?;
    let vet = references
        .find_vet_by_license(SEED_CHECKUP_VET_LICENSE)?
        .ok_or(SeedError::SeedVetMissing(SEED_CHECKUP_VET_LICENSE))?;

    let checkup = Checkup::new(
        vet.uuid,
        vet.name,
        SEED_CHECKUP_DIAGNOSIS,
        SEED_CHECKUP_TREATMENT,
        SEED_CHECKUP_DATE,
    );

    let checkups = SqliteCheckupRepository::try_new(conn)?;
    checkups.append_checkup(animal_id, &checkup)?;
    Ok(checkup)
}
