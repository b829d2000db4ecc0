//! Checkup repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append, read, amend, and remove checkup entries owned by animals.
//! - Keep per-animal checkup ordering deterministic.
//!
//! # Invariants
//! - Write paths must call `Checkup::validate()` before SQL mutations.
//! - Appending to or listing for a missing animal is `NotFound`, never a
//!   silent no-op.
//! - Checkups for one animal are ordered by date, then uuid.

use crate::model::animal::AnimalId;
use crate::model::checkup::{Checkup, CheckupId};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CHECKUP_SELECT_SQL: &str = "SELECT
    uuid,
    animal_uuid,
    vet_uuid,
    vet_name,
    diagnosis,
    treatment,
    checkup_date
FROM checkups";

const ANIMAL_KEY_COLUMNS: &[&str] = &["uuid"];

const CHECKUP_COLUMNS: &[&str] = &[
    "uuid",
    "animal_uuid",
    "vet_uuid",
    "vet_name",
    "diagnosis",
    "treatment",
    "checkup_date",
];

/// Repository interface for checkup sub-records.
pub trait CheckupRepository {
    /// Appends one checkup to an existing animal's history.
    fn append_checkup(&self, animal_id: AnimalId, checkup: &Checkup) -> RepoResult<CheckupId>;
    /// Lists an animal's checkups ordered by date, then uuid.
    fn list_checkups(&self, animal_id: AnimalId) -> RepoResult<Vec<Checkup>>;
    /// Gets one checkup and its owning animal by checkup ID.
    fn get_checkup(&self, id: CheckupId) -> RepoResult<Option<(AnimalId, Checkup)>>;
    /// Replaces one checkup's fields in place, keyed by its uuid.
    fn update_checkup(&self, checkup: &Checkup) -> RepoResult<()>;
    /// Removes one checkup from its animal's history.
    fn remove_checkup(&self, id: CheckupId) -> RepoResult<()>;
}

/// SQLite-backed checkup repository.
pub struct SqliteCheckupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCheckupRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(
            conn,
            &[
                ("animals", ANIMAL_KEY_COLUMNS),
                ("checkups", CHECKUP_COLUMNS),
            ],
        )?;
        Ok(Self { conn })
    }

    fn animal_exists(&self, animal_id: AnimalId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM animals
                WHERE uuid = ?1
            );",
            [animal_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl CheckupRepository for SqliteCheckupRepository<'_> {
    fn append_checkup(&self, animal_id: AnimalId, checkup: &Checkup) -> RepoResult<CheckupId> {
        checkup.validate()?;

        if !self.animal_exists(animal_id)? {
            return Err(RepoError::NotFound(animal_id));
        }

        self.conn.execute(
            "INSERT INTO checkups (
                uuid,
                animal_uuid,
                vet_uuid,
                vet_name,
                diagnosis,
                treatment,
                checkup_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                checkup.uuid.to_string(),
                animal_id.to_string(),
                checkup.vet_uuid.to_string(),
                checkup.vet_name.as_str(),
                checkup.diagnosis.as_str(),
                checkup.treatment.as_str(),
                checkup.date.as_str(),
            ],
        )?;

        Ok(checkup.uuid)
    }

    fn list_checkups(&self, animal_id: AnimalId) -> RepoResult<Vec<Checkup>> {
        if !self.animal_exists(animal_id)? {
            return Err(RepoError::NotFound(animal_id));
        }

        let mut stmt = self.conn.prepare(&format!(
            "{CHECKUP_SELECT_SQL}
             WHERE animal_uuid = ?1
             ORDER BY checkup_date ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([animal_id.to_string()])?;
        let mut checkups = Vec::new();
        while let Some(row) = rows.next()? {
            checkups.push(parse_checkup_row(row)?.1);
        }

        Ok(checkups)
    }

    fn get_checkup(&self, id: CheckupId) -> RepoResult<Option<(AnimalId, Checkup)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHECKUP_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_checkup_row(row)?));
        }

        Ok(None)
    }

    fn update_checkup(&self, checkup: &Checkup) -> RepoResult<()> {
        checkup.validate()?;

        let changed = self.conn.execute(
            "UPDATE checkups
             SET
                vet_uuid = ?1,
                vet_name = ?2,
                diagnosis = ?3,
                treatment = ?4,
                checkup_date = ?5
             WHERE uuid = ?6;",
            params![
                checkup.vet_uuid.to_string(),
                checkup.vet_name.as_str(),
                checkup.diagnosis.as_str(),
                checkup.treatment.as_str(),
                checkup.date.as_str(),
                checkup.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(checkup.uuid));
        }

        Ok(())
    }

    fn remove_checkup(&self, id: CheckupId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM checkups WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_checkup_row(row: &Row<'_>) -> RepoResult<(AnimalId, Checkup)> {
    let uuid_text: String = row.get("uuid")?;
    let animal_uuid_text: String = row.get("animal_uuid")?;
    let vet_uuid_text: String = row.get("vet_uuid")?;

    let checkup = Checkup {
        uuid: parse_uuid(&uuid_text, "checkups.uuid")?,
        vet_uuid: parse_uuid(&vet_uuid_text, "checkups.vet_uuid")?,
        vet_name: row.get("vet_name")?,
        diagnosis: row.get("diagnosis")?,
        treatment: row.get("treatment")?,
        date: row.get("checkup_date")?,
    };
    checkup.validate()?;

    Ok((parse_uuid(&animal_uuid_text, "checkups.animal_uuid")?, checkup))
}
