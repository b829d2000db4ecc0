//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Resolve reference lookups and keep denormalized names consistent.

pub mod animal_service;
pub mod checkup_service;
