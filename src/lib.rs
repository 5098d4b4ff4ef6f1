//! Domain core for a gym-membership management system: plan catalog, client
//! registry, subscription ledger (renewal + late fees), payment recording and
//! the derived-status views behind the member list and dashboard.
//!
//! Persistence goes through the generic [`infrastructure::document_store`]
//! collaborator and time through the injectable [`infrastructure::clock`]
//! trait, so every use case is testable with explicit dates.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;
