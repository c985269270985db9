//! Encounter (clinical visit) wire model and mapper.
//!
//! The subject reference is built from the preloaded patient aggregate's external
//! id, falling back to the bare foreign key when the aggregate was not loaded or
//! carries no external id; display text comes from the related entity's primary
//! name and is simply omitted when unavailable.

use crate::constants::br_core_profile;
use crate::datatypes::{CodeableConcept, Coding, Identifier, Meta, Period};
use crate::resource::{Reference, ResourceKind};
use rac_records::{EncounterRecord, LocatorId};
use serde::Serialize;

/// A participant in the visit (only the attending practitioner is modelled).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Participant {
    pub individual: Reference,
}

/// BR Core Encounter resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EncounterResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    pub status: String,
    pub class: Coding,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub type_concept: Vec<CodeableConcept>,
    pub subject: Reference,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participant: Vec<Participant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(rename = "reasonCode", skip_serializing_if = "Vec::is_empty")]
    pub reason_code: Vec<CodeableConcept>,
    #[serde(rename = "serviceProvider", skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<Reference>,
}

impl EncounterResource {
    pub fn from_record(record: &EncounterRecord) -> Self {
        let subject_id = record
            .patient
            .as_ref()
            .map(|patient| patient.locator_id())
            .unwrap_or(&record.patient_id);
        let subject_display = record
            .patient
            .as_ref()
            .and_then(|patient| patient.primary_name_text())
            .map(str::to_owned);

        Self {
            resource_type: "Encounter",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Encounter)),
            identifier: record.identifiers.iter().map(Identifier::from).collect(),
            status: record.status.clone(),
            class: Coding {
                code: Some(
                    record
                        .class_code
                        .clone()
                        .unwrap_or_else(|| "AMB".to_owned()),
                ),
                display: record.class_display.clone(),
                ..Coding::default()
            },
            type_concept: coded_group(&record.type_code, &record.type_display),
            subject: Reference::with_display(ResourceKind::Patient, subject_id, subject_display),
            participant: record
                .practitioner
                .as_ref()
                .map(|practitioner| {
                    vec![Participant {
                        individual: Reference::with_display(
                            ResourceKind::Practitioner,
                            practitioner.locator_id(),
                            practitioner.primary_name_text().map(str::to_owned),
                        ),
                    }]
                })
                .unwrap_or_default(),
            period: Period::new(record.start.as_ref(), record.end.as_ref()),
            reason_code: coded_group(&record.reason_code, &record.reason_display),
            service_provider: record.service_provider.as_ref().map(|organization| {
                Reference::with_display(
                    ResourceKind::Organization,
                    organization.locator_id(),
                    Some(organization.name.clone()),
                )
            }),
        }
    }
}

fn coded_group(code: &Option<String>, display: &Option<String>) -> Vec<CodeableConcept> {
    code.as_ref()
        .map(|code| {
            vec![CodeableConcept::from_coding(Coding {
                code: Some(code.clone()),
                display: display.clone(),
                ..Coding::default()
            })]
        })
        .unwrap_or_default()
}
