//! Domain model for shelter records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own field validation rules for write paths.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Embedded references (animal type, vet) carry a denormalized name that
//!   is resolved at write time, never trusted from caller input.

pub mod animal;
pub mod checkup;
pub mod reference;
