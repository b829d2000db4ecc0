//! Animal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `animals` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Animal::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Deleting an animal also removes its owned checkups (FK cascade).

use crate::model::animal::{Animal, AnimalId, AnimalTypeRef};
use crate::model::reference::AnimalTypeId;
use crate::repo::{ensure_schema_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ANIMAL_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    breed,
    age,
    type_uuid,
    type_name
FROM animals";

const ANIMAL_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "breed",
    "age",
    "type_uuid",
    "type_name",
    "updated_at",
];

/// Query options for listing animals.
#[derive(Debug, Clone, Default)]
pub struct AnimalListQuery {
    /// Optional filter on the referenced animal type.
    pub type_uuid: Option<AnimalTypeId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for animal CRUD operations.
pub trait AnimalRepository {
    fn create_animal(&self, animal: &Animal) -> RepoResult<AnimalId>;
    fn update_animal(&self, animal: &Animal) -> RepoResult<()>;
    fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>>;
    fn list_animals(&self, query: &AnimalListQuery) -> RepoResult<Vec<Animal>>;
    fn delete_animal(&self, id: AnimalId) -> RepoResult<()>;
}

/// SQLite-backed animal repository.
pub struct SqliteAnimalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnimalRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &[("animals", ANIMAL_COLUMNS)])?;
        Ok(Self { conn })
    }
}

impl AnimalRepository for SqliteAnimalRepository<'_> {
    fn create_animal(&self, animal: &Animal) -> RepoResult<AnimalId> {
        animal.validate()?;

        self.conn.execute(
            "INSERT INTO animals (
                uuid,
                name,
                breed,
                age,
                type_uuid,
                type_name
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                animal.uuid.to_string(),
                animal.name.as_str(),
                animal.breed.as_str(),
                animal.age,
                animal.animal_type.uuid.to_string(),
                animal.animal_type.name.as_str(),
            ],
        )?;

        Ok(animal.uuid)
    }

    fn update_animal(&self, animal: &Animal) -> RepoResult<()> {
        animal.validate()?;

        let changed = self.conn.execute(
            "UPDATE animals
             SET
                name = ?1,
                breed = ?2,
                age = ?3,
                type_uuid = ?4,
                type_name = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                animal.name.as_str(),
                animal.breed.as_str(),
                animal.age,
                animal.animal_type.uuid.to_string(),
                animal.animal_type.name.as_str(),
                animal.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(animal.uuid));
        }

        Ok(())
    }

    fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ANIMAL_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_animal_row(row)?));
        }

        Ok(None)
    }

    fn list_animals(&self, query: &AnimalListQuery) -> RepoResult<Vec<Animal>> {
        let mut sql = format!("{ANIMAL_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(type_uuid) = query.type_uuid {
            sql.push_str(" AND type_uuid = ?");
            bind_values.push(Value::Text(type_uuid.to_string()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut animals = Vec::new();

        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }

        Ok(animals)
    }

    fn delete_animal(&self, id: AnimalId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM animals WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<Animal> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid(&uuid_text, "animals.uuid")?;

    let type_uuid_text: String = row.get("type_uuid")?;
    let type_uuid = parse_uuid(&type_uuid_text, "animals.type_uuid")?;

    let animal = Animal {
        uuid,
        name: row.get("name")?,
        breed: row.get("breed")?,
        age: row.get("age")?,
        animal_type: AnimalTypeRef {
            uuid: type_uuid,
            name: row.get("type_name")?,
        },
    };
    animal.validate()?;
    Ok(animal)
}
