//! Seed runner entry point.
//!
//! # Responsibility
//! - Open (or create) a shelter database at the given path.
//! - Apply baseline reference data and report inserted counts.

use shelter_core::db::open_db;
use shelter_core::seed::seed_reference_data;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "shelter.db";

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open database `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    match seed_reference_data(&conn) {
        Ok(report) => {
            println!(
                "seeded `{path}`: animal_types_inserted={} vets_inserted={}",
                report.animal_types_inserted, report.vets_inserted
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("seeding `{path}` failed: {err}");
            ExitCode::FAILURE
        }
    }
}
