//! Procedure wire model and mapper.
//!
//! Performed timing distinguishes two shapes: a `performedPeriod` when both bounds
//! exist, a scalar `performedDateTime` when only the start instant is known. An
//! end-only window still becomes a period, since a scalar cannot be built without
//! the start bound.

use crate::constants::br_core_profile;
use crate::datatypes::{fmt_instant, Annotation, CodeableConcept, Coding, Meta, Period};
use crate::resource::{Reference, ResourceKind};
use rac_records::ProcedureRecord;
use serde::Serialize;

/// Who carried the procedure out.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcedurePerformer {
    pub actor: Reference,
}

/// BR Core Procedure resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcedureResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    pub subject: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,
    #[serde(rename = "performedDateTime", skip_serializing_if = "Option::is_none")]
    pub performed_date_time: Option<String>,
    #[serde(rename = "performedPeriod", skip_serializing_if = "Option::is_none")]
    pub performed_period: Option<Period>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performer: Vec<ProcedurePerformer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
}

impl ProcedureResource {
    pub fn from_record(record: &ProcedureRecord) -> Self {
        let (performed_date_time, performed_period) =
            match (&record.performed_start, &record.performed_end) {
                (Some(start), Some(end)) => (None, Period::new(Some(start), Some(end))),
                (Some(start), None) => (Some(fmt_instant(start)), None),
                (None, end) => (None, Period::new(None, end.as_ref())),
            };

        Self {
            resource_type: "Procedure",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Procedure)),
            status: record
                .status
                .clone()
                .unwrap_or_else(|| "completed".to_owned()),
            category: record.category_code.as_ref().map(CodeableConcept::from_code),
            code: record.code.as_ref().map(|code| {
                CodeableConcept::from_coding(Coding {
                    system: record.code_system.clone(),
                    code: Some(code.clone()),
                    display: record.code_display.clone(),
                })
            }),
            subject: Reference::to(ResourceKind::Patient, &record.patient_id),
            encounter: record
                .encounter_id
                .as_ref()
                .map(|id| Reference::to(ResourceKind::Encounter, id)),
            performed_date_time,
            performed_period,
            performer: record
                .performer_id
                .as_ref()
                .map(|id| {
                    vec![ProcedurePerformer {
                        actor: Reference::to(ResourceKind::Practitioner, id),
                    }]
                })
                .unwrap_or_default(),
            note: Annotation::from_note(&record.note),
        }
    }
}
