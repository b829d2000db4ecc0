//! Reference-data repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert-many and lookup APIs for animal types and vets.
//! - Keep reference inserts idempotent on their natural unique keys.
//!
//! # Invariants
//! - Insert-many uses `INSERT OR IGNORE`; an existing row keeps its
//!   original uuid and the duplicate is counted as skipped.
//! - Lookups never mutate reference data.

use crate::model::reference::{AnimalType, AnimalTypeId, Vet, VetId};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};

const ANIMAL_TYPE_COLUMNS: &[&str] = &["uuid", "name"];
const VET_COLUMNS: &[&str] = &["uuid", "name", "address", "license_number"];

/// Repository interface for seeded lookup data.
pub trait ReferenceRepository {
    /// Inserts animal types, skipping names already present.
    ///
    /// Returns the number of rows actually inserted.
    fn insert_animal_types(&self, types: &[AnimalType]) -> RepoResult<u32>;
    /// Lists all animal types sorted by name.
    fn list_animal_types(&self) -> RepoResult<Vec<AnimalType>>;
    /// Gets one animal type by stable ID.
    fn get_animal_type(&self, id: AnimalTypeId) -> RepoResult<Option<AnimalType>>;
    /// Inserts vets, skipping license numbers already present.
    ///
    /// Returns the number of rows actually inserted.
    fn insert_vets(&self, vets: &[Vet]) -> RepoResult<u32>;
    /// Lists all vets sorted by name.
    fn list_vets(&self) -> RepoResult<Vec<Vet>>;
    /// Gets one vet by stable ID.
    fn get_vet(&self, id: VetId) -> RepoResult<Option<Vet>>;
    /// Finds one vet by license number.
    fn find_vet_by_license(&self, license_number: &str) -> RepoResult<Option<Vet>>;
}

/// SQLite-backed reference-data repository.
pub struct SqliteReferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReferenceRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(
            conn,
            &[
                ("animal_types", ANIMAL_TYPE_COLUMNS),
                ("vets", VET_COLUMNS),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl ReferenceRepository for SqliteReferenceRepository<'_> {
    fn insert_animal_types(&self, types: &[AnimalType]) -> RepoResult<u32> {
        let mut inserted = 0;
        for animal_type in types {
            inserted += self.conn.execute(
                "INSERT OR IGNORE INTO animal_types (uuid, name) VALUES (?1, ?2);",
                params![animal_type.uuid.to_string(), animal_type.name.as_str()],
            )? as u32;
        }
        Ok(inserted)
    }

    fn list_animal_types(&self) -> RepoResult<Vec<AnimalType>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM animal_types
             ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut types = Vec::new();
        while let Some(row) = rows.next()? {
            types.push(parse_animal_type_row(row)?);
        }
        Ok(types)
    }

    fn get_animal_type(&self, id: AnimalTypeId) -> RepoResult<Option<AnimalType>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM animal_types
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_animal_type_row(row)?));
        }
        Ok(None)
    }

    fn insert_vets(&self, vets: &[Vet]) -> RepoResult<u32> {
        let mut inserted = 0;
        for vet in vets {
            inserted += self.conn.execute(
                "INSERT OR IGNORE INTO vets (uuid, name, address, license_number)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    vet.uuid.to_string(),
                    vet.name.as_str(),
                    vet.address.as_str(),
                    vet.license_number.as_str(),
                ],
            )? as u32;
        }
        Ok(inserted)
    }

    fn list_vets(&self) -> RepoResult<Vec<Vet>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, address, license_number
             FROM vets
             ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut vets = Vec::new();
        while let Some(row) = rows.next()? {
            vets.push(parse_vet_row(row)?);
        }
        Ok(vets)
    }

    fn get_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, address, license_number
             FROM vets
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_vet_row(row)?));
        }
        Ok(None)
    }

    fn find_vet_by_license(&self, license_number: &str) -> RepoResult<Option<Vet>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, address, license_number
             FROM vets
             WHERE license_number = ?1;",
        )?;
        let mut rows = stmt.query([license_number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_vet_row(row)?));
        }
        Ok(None)
    }
}

fn parse_animal_type_row(row: &Row<'_>) -> RepoResult<AnimalType> {
    let uuid_text: String = row.get("uuid")?;
    Ok(AnimalType {
        uuid: parse_uuid(&uuid_text, "animal_types.uuid")?,
        name: row.get("name")?,
    })
}

fn parse_vet_row(row: &Row<'_>) -> RepoResult<Vet> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Vet {
        uuid: parse_uuid(&uuid_text, "vets.uuid")?,
        name: row.get("name")?,
        address: row.get("address")?,
        license_number: row.get("license_number")?,
    })
}
