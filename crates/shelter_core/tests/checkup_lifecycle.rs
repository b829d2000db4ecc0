use rusqlite::Connection;
use shelter_core::db::open_db_in_memory;
use shelter_core::seed::seed_reference_data;
use shelter_core::{
    Animal, AnimalRepository, AnimalTypeRef, Checkup, CheckupDetails, CheckupRepository,
    CheckupService, CheckupServiceError, ReferenceRepository, RepoError, SqliteAnimalRepository,
    SqliteCheckupRepository, SqliteReferenceRepository, Vet,
};
use uuid::Uuid;

#[test]
fn record_and_history_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);
    let vet = vet_by_license(&conn, "AX12345");

    let details = CheckupDetails {
        vet_id: vet.uuid,
        diagnosis: "Hiccups".to_string(),
        treatment: "Medication".to_string(),
        date: "2020-06-01".to_string(),
    };
    let recorded = service.record_checkup(animal_id, &details).unwrap();
    assert_eq!(recorded.vet_name, "Dr Chua");

    let history = service.animal_history(animal_id).unwrap();
    assert_eq!(history, vec![recorded]);
}

#[test]
fn history_is_ordered_by_date_then_uuid() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);
    let vet = vet_by_license(&conn, "DX45678");

    for date in ["2021-03-15", "2019-11-02", "2020-06-01"] {
        let details = CheckupDetails {
            vet_id: vet.uuid,
            diagnosis: "Routine".to_string(),
            treatment: "None".to_string(),
            date: date.to_string(),
        };
        service.record_checkup(animal_id, &details).unwrap();
    }

    let dates: Vec<String> = service
        .animal_history(animal_id)
        .unwrap()
        .into_iter()
        .map(|checkup| checkup.date)
        .collect();
    assert_eq!(dates, vec!["2019-11-02", "2020-06-01", "2021-03-15"]);
}

#[test]
fn amend_re_resolves_the_vet_name() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);
    let chua = vet_by_license(&conn, "AX12345");
    let tan = vet_by_license(&conn, "DX45678");

    let recorded = service
        .record_checkup(
            animal_id,
            &CheckupDetails {
                vet_id: chua.uuid,
                diagnosis: "Hiccups".to_string(),
                treatment: "Medication".to_string(),
                date: "2020-06-01".to_string(),
            },
        )
        .unwrap();

    let amended = service
        .amend_checkup(
            recorded.uuid,
            &CheckupDetails {
                vet_id: tan.uuid,
                diagnosis: "Hiccups resolved".to_string(),
                treatment: "None".to_string(),
                date: "2020-06-15".to_string(),
            },
        )
        .unwrap();
    assert_eq!(amended.uuid, recorded.uuid);
    assert_eq!(amended.vet_name, "Dr Tan");

    let history = service.animal_history(animal_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].vet_uuid, tan.uuid);
    assert_eq!(history[0].diagnosis, "Hiccups resolved");
    assert_eq!(history[0].date, "2020-06-15");
}

#[test]
fn remove_pulls_one_entry_from_history() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);
    let vet = vet_by_license(&conn, "AX12345");

    let first = service
        .record_checkup(animal_id, &routine_details(vet.uuid, "2020-01-01"))
        .unwrap();
    let second = service
        .record_checkup(animal_id, &routine_details(vet.uuid, "2020-02-01"))
        .unwrap();

    service.remove_checkup(first.uuid).unwrap();

    let history = service.animal_history(animal_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].uuid, second.uuid);

    let err = service.remove_checkup(first.uuid).unwrap_err();
    assert!(matches!(
        err,
        CheckupServiceError::CheckupNotFound(id) if id == first.uuid
    ));
}

#[test]
fn record_rejects_invalid_date_before_vet_lookup() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);

    let details = CheckupDetails {
        // Nonexistent vet: the date check must fire first.
        vet_id: Uuid::new_v4(),
        diagnosis: "Hiccups".to_string(),
        treatment: "Medication".to_string(),
        date: "01-06-2020".to_string(),
    };

    let err = service.record_checkup(animal_id, &details).unwrap_err();
    assert!(matches!(err, CheckupServiceError::InvalidDate(_)));
}

#[test]
fn record_rejects_unknown_vet() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);

    let missing = Uuid::new_v4();
    let err = service
        .record_checkup(animal_id, &routine_details(missing, "2020-06-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        CheckupServiceError::UnknownVet(id) if id == missing
    ));
}

#[test]
fn record_for_missing_animal_is_not_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    seed_reference_data(&conn).unwrap();
    let service = checkup_service(&conn);
    let vet = vet_by_license(&conn, "AX12345");

    let missing = Uuid::new_v4();
    let err = service
        .record_checkup(missing, &routine_details(vet.uuid, "2020-06-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        CheckupServiceError::AnimalNotFound(id) if id == missing
    ));
}

#[test]
fn repository_append_validates_the_date() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let repo = SqliteCheckupRepository::try_new(&conn).unwrap();
    let vet = vet_by_license(&conn, "AX12345");

    let checkup = Checkup::new(vet.uuid, vet.name, "Hiccups", "Medication", "2020-02-30");
    let err = repo.append_checkup(animal_id, &checkup).unwrap_err();
    assert!(matches!(err, RepoError::CheckupValidation(_)));
}

#[test]
fn get_checkup_returns_owning_animal() {
    let conn = open_db_in_memory().unwrap();
    let animal_id = seeded_animal(&conn);
    let service = checkup_service(&conn);
    let vet = vet_by_license(&conn, "AX12345");

    let recorded = service
        .record_checkup(animal_id, &routine_details(vet.uuid, "2020-06-01"))
        .unwrap();

    let repo = SqliteCheckupRepository::try_new(&conn).unwrap();
    let (owner, loaded) = repo.get_checkup(recorded.uuid).unwrap().unwrap();
    assert_eq!(owner, animal_id);
    assert_eq!(loaded, recorded);
}

fn checkup_service<'conn>(
    conn: &'conn Connection,
) -> CheckupService<SqliteCheckupRepository<'conn>, SqliteReferenceRepository<'conn>> {
    CheckupService::new(
        SqliteCheckupRepository::try_new(conn).unwrap(),
        SqliteReferenceRepository::try_new(conn).unwrap(),
    )
}

fn routine_details(vet_id: Uuid, date: &str) -> CheckupDetails {
    CheckupDetails {
        vet_id,
        diagnosis: "Routine".to_string(),
        treatment: "None".to_string(),
        date: date.to_string(),
    }
}

fn vet_by_license(conn: &Connection, license: &str) -> Vet {
    SqliteReferenceRepository::try_new(conn)
        .unwrap()
        .find_vet_by_license(license)
        .unwrap()
        .unwrap_or_else(|| panic!("vet with license {license} should be seeded"))
}

fn seeded_animal(conn: &Connection) -> Uuid {
    seed_reference_data(conn).unwrap();

    let references = SqliteReferenceRepository::try_new(conn).unwrap();
    let dog = references
        .list_animal_types()
        .unwrap()
        .into_iter()
        .find(|animal_type| animal_type.name == "Dog")
        .expect("Dog type should be seeded");

    let animals = SqliteAnimalRepository::try_new(conn).unwrap();
    let animal = Animal::new(
        "Biscuit",
        "Corgi",
        3,
        AnimalTypeRef {
            uuid: dog.uuid,
            name: dog.name,
        },
    );
    animals.create_animal(&animal).unwrap()
}
