//! Clinical entities: encounters, observations, conditions, allergies, procedures,
//! and medication statements.
//!
//! Every clinical record references exactly one patient. Related practitioner,
//! organization, and patient aggregates are eagerly loaded by the store where the
//! mapping layer needs display text; where only a reference string is needed the
//! bare foreign key is carried instead.

use crate::administrative::{OrganizationRecord, PatientRecord, PractitionerRecord};
use crate::{impl_locator_id, IdentifierRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A clinical visit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub status: String,
    pub class_code: Option<String>,
    pub class_display: Option<String>,
    pub type_code: Option<String>,
    pub type_display: Option<String>,
    pub reason_code: Option<String>,
    pub reason_display: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub patient_id: String,
    pub patient: Option<PatientRecord>,
    pub practitioner: Option<PractitionerRecord>,
    pub service_provider: Option<OrganizationRecord>,
    pub identifiers: Vec<IdentifierRecord>,
}

/// The raw, mutually overlapping value columns of a measurement-bearing row.
///
/// At most one variant survives mapping; precedence is decided by the value
/// resolver in the `fhir` crate, never re-inspected downstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueFields {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub text: Option<String>,
    pub code: Option<String>,
    pub code_system: Option<String>,
    pub code_display: Option<String>,
}

/// A single measurement or finding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub status: String,
    pub category_code: Option<String>,
    pub category_display: Option<String>,
    pub code_system: Option<String>,
    pub code: Option<String>,
    pub code_display: Option<String>,
    pub effective: Option<DateTime<Utc>>,
    pub issued: Option<DateTime<Utc>>,
    pub value: ValueFields,
    pub interpretation_code: Option<String>,
    pub interpretation_text: Option<String>,
    pub note: Option<String>,
    pub patient_id: String,
    pub patient: Option<PatientRecord>,
    pub encounter_id: Option<String>,
    pub performer: Option<PractitionerRecord>,
    /// Sub-measurements (for example systolic/diastolic), in stored order.
    pub components: Vec<ObservationComponentRecord>,
}

/// One sub-measurement of an observation, with its own independent value columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationComponentRecord {
    pub code_system: Option<String>,
    pub code: Option<String>,
    pub code_display: Option<String>,
    pub value: ValueFields,
}

/// A diagnosed problem or condition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub clinical_status: Option<String>,
    pub verification_status: Option<String>,
    pub category_code: Option<String>,
    pub severity: Option<String>,
    pub code_system: Option<String>,
    pub code: Option<String>,
    pub code_display: Option<String>,
    pub onset: Option<DateTime<Utc>>,
    pub abatement: Option<DateTime<Utc>>,
    pub recorded_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub patient_id: String,
    pub recorder_id: Option<String>,
}

/// An allergy or intolerance entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AllergyIntoleranceRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub clinical_status_code: Option<String>,
    pub clinical_status_text: Option<String>,
    pub verification_status: Option<String>,
    /// `allergy` or `intolerance`.
    pub type_code: Option<String>,
    pub category: Option<String>,
    pub criticality: Option<String>,
    pub code_system: Option<String>,
    pub code: Option<String>,
    pub code_display: Option<String>,
    pub recorded_date: Option<DateTime<Utc>>,
    pub last_occurrence: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub patient_id: String,
    pub recorder_id: Option<String>,
}

/// A performed procedure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub status: Option<String>,
    pub category_code: Option<String>,
    pub code_system: Option<String>,
    pub code: Option<String>,
    pub code_display: Option<String>,
    pub performed_start: Option<DateTime<Utc>>,
    pub performed_end: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub patient_id: String,
    pub encounter_id: Option<String>,
    pub performer_id: Option<String>,
}

/// A statement that a medication is or was being taken.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationStatementRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub status: Option<String>,
    pub category_code: Option<String>,
    pub medication_code: Option<String>,
    pub medication_display: Option<String>,
    pub dosage: Option<String>,
    pub route: Option<String>,
    pub effective_start: Option<DateTime<Utc>>,
    pub effective_end: Option<DateTime<Utc>>,
    /// Patient-reported adherence flag carried by the source schema; informational
    /// only, not part of the mapped output shape.
    pub taken: Option<bool>,
    pub note: Option<String>,
    pub patient_id: String,
    pub recorder_id: Option<String>,
}

impl_locator_id!(
    EncounterRecord,
    ObservationRecord,
    ConditionRecord,
    AllergyIntoleranceRecord,
    ProcedureRecord,
    MedicationStatementRecord,
);
