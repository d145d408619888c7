//! triage-core
//!
//! Domain types and collaborator contracts shared by the triage router.
//! No I/O and no async runtime dependency.

pub mod backend;
pub mod error;
pub mod models;
