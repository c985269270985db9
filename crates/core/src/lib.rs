//! # RAC Core
//!
//! Orchestration layer for the patient-portal backend: aggregates one patient's
//! clinical history across the persistence collaborator and assembles it into the
//! FHIR bundle the dashboard consumes.
//!
//! This crate contains:
//! - the [`HistoryStore`] trait, the boundary to the persistence collaborator
//! - startup-resolved configuration (per-collection caps)
//! - the caller-resolution seam supplied by the auth collaborator
//! - [`HistoryService`], the fan-out/fan-in aggregation protocol
//!
//! **No transport concerns**: HTTP routing, token verification, and response
//! serialisation belong to the excluded API layer. The only condition that escapes
//! this crate is the aggregation-level not-found (and the access-seam denial); all
//! recoverable gaps in source data are absorbed as omissions inside the `fhir`
//! crate's mappers.

pub mod access;
pub mod config;
pub mod error;
pub mod history;
pub mod store;

pub use access::{require_self_access, CallerIdentity, CallerResolver};
pub use config::{CoreConfig, HistoryLimits};
pub use error::{BoxError, HistoryError, HistoryResult};
pub use history::HistoryService;
pub use store::HistoryStore;
