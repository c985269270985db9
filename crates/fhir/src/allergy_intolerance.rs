//! AllergyIntolerance wire model and mapper.

use crate::constants::{br_core_profile, ALLERGY_CLINICAL_SYSTEM, ALLERGY_VERIFICATION_SYSTEM};
use crate::datatypes::{fmt_instant, Annotation, CodeableConcept, Coding, Meta};
use crate::resource::{Reference, ResourceKind};
use rac_records::AllergyIntoleranceRecord;
use serde::Serialize;

/// BR Core AllergyIntolerance resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AllergyIntoleranceResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    #[serde(rename = "clinicalStatus", skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<CodeableConcept>,
    #[serde(rename = "verificationStatus", skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<CodeableConcept>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    pub patient: Reference,
    #[serde(rename = "recordedDate", skip_serializing_if = "Option::is_none")]
    pub recorded_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,
    #[serde(rename = "lastOccurrence", skip_serializing_if = "Option::is_none")]
    pub last_occurrence: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
}

impl AllergyIntoleranceResource {
    pub fn from_record(record: &AllergyIntoleranceRecord) -> Self {
        Self {
            resource_type: "AllergyIntolerance",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::AllergyIntolerance)),
            clinical_status: record.clinical_status_code.as_ref().map(|code| {
                let mut concept =
                    CodeableConcept::with_system(ALLERGY_CLINICAL_SYSTEM, code, None);
                concept.text = record.clinical_status_text.clone();
                concept
            }),
            verification_status: record.verification_status.as_ref().map(|code| {
                CodeableConcept::with_system(ALLERGY_VERIFICATION_SYSTEM, code, None)
            }),
            type_code: record.type_code.clone(),
            category: record.category.iter().cloned().collect(),
            criticality: record.criticality.clone(),
            code: record.code.as_ref().map(|code| {
                CodeableConcept::from_coding(Coding {
                    system: record.code_system.clone(),
                    code: Some(code.clone()),
                    display: record.code_display.clone(),
                })
            }),
            patient: Reference::to(ResourceKind::Patient, &record.patient_id),
            recorded_date: record.recorded_date.as_ref().map(fmt_instant),
            recorder: record
                .recorder_id
                .as_ref()
                .map(|id| Reference::to(ResourceKind::Practitioner, id)),
            last_occurrence: record.last_occurrence.as_ref().map(fmt_instant),
            note: Annotation::from_note(&record.note),
        }
    }
}
