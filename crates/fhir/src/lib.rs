//! FHIR wire models and mapping layer for the RAC exchange simulator.
//!
//! This crate is the structural-translation core of the portal backend: it converts
//! the aggregate records delivered by the persistence collaborator (`rac-records`)
//! into FHIR R4 / BR Core shaped resource objects and assembles them into response
//! bundles.
//!
//! This crate focuses on:
//! - wire structs with sparse serialisation (optional groups are omitted, never
//!   emitted as empty shells)
//! - one mapper per resource kind, living in the same module as the wire struct it
//!   produces
//! - the tagged observation-value union and its resolution rules
//! - bundle envelopes and their total/ordering invariants
//!
//! The translation is one-directional and best-effort by design: mappers assume
//! already-validated input, absorb missing optional data as omissions, and never
//! raise domain errors. The only fallible operation is JSON rendering.

pub mod allergy_intolerance;
pub mod bundle;
pub mod condition;
pub mod constants;
pub mod datatypes;
pub mod encounter;
pub mod medication_statement;
pub mod observation;
pub mod organization;
pub mod patient;
pub mod practitioner;
pub mod procedure;
pub mod resource;

pub use allergy_intolerance::AllergyIntoleranceResource;
pub use bundle::{Bundle, BundleEntry, BundleType};
pub use condition::ConditionResource;
pub use datatypes::{
    Address, Annotation, CodeableConcept, Coding, ContactPoint, HumanName, Identifier, Meta,
    Period, Quantity,
};
pub use encounter::EncounterResource;
pub use medication_statement::MedicationStatementResource;
pub use observation::{ObservationResource, ObservationValue};
pub use organization::OrganizationResource;
pub use patient::PatientResource;
pub use practitioner::PractitionerResource;
pub use procedure::ProcedureResource;
pub use resource::{Reference, Resource, ResourceKind};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("failed to serialise resource: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
