//! MedicationStatement wire model and mapper.

use crate::constants::br_core_profile;
use crate::datatypes::{Annotation, CodeableConcept, Coding, Meta, Period};
use crate::resource::{Reference, ResourceKind};
use rac_records::MedicationStatementRecord;
use serde::Serialize;

/// Dosage instructions: free text plus an optional route concept.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Dosage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodeableConcept>,
}

/// BR Core MedicationStatement resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MedicationStatementResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,
    #[serde(
        rename = "medicationCodeableConcept",
        skip_serializing_if = "Option::is_none"
    )]
    pub medication_codeable_concept: Option<CodeableConcept>,
    pub subject: Reference,
    #[serde(rename = "effectivePeriod", skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,
    #[serde(rename = "informationSource", skip_serializing_if = "Option::is_none")]
    pub information_source: Option<Reference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dosage: Vec<Dosage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
}

impl MedicationStatementResource {
    pub fn from_record(record: &MedicationStatementRecord) -> Self {
        let dosage = if record.dosage.is_some() || record.route.is_some() {
            vec![Dosage {
                text: record.dosage.clone(),
                route: record.route.as_ref().map(CodeableConcept::from_code),
            }]
        } else {
            Vec::new()
        };

        Self {
            resource_type: "MedicationStatement",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::MedicationStatement)),
            status: record.status.clone().unwrap_or_else(|| "active".to_owned()),
            category: record.category_code.as_ref().map(CodeableConcept::from_code),
            medication_codeable_concept: record.medication_code.as_ref().map(|code| {
                CodeableConcept::from_coding(Coding {
                    code: Some(code.clone()),
                    display: record.medication_display.clone(),
                    ..Coding::default()
                })
            }),
            subject: Reference::to(ResourceKind::Patient, &record.patient_id),
            effective_period: Period::new(
                record.effective_start.as_ref(),
                record.effective_end.as_ref(),
            ),
            information_source: record
                .recorder_id
                .as_ref()
                .map(|id| Reference::to(ResourceKind::Practitioner, id)),
            dosage,
            note: Annotation::from_note(&record.note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_record() -> MedicationStatementRecord {
        MedicationStatementRecord {
            id: "ckw1med".into(),
            fhir_id: Some("med-001".into()),
            status: Some("active".into()),
            medication_code: Some("BR0267411".into()),
            medication_display: Some("Losartana potássica 50mg".into()),
            dosage: Some("1 comprimido ao dia".into()),
            route: Some("oral".into()),
            effective_start: Some(Utc.with_ymd_and_hms(2023, 11, 3, 0, 0, 0).unwrap()),
            patient_id: "ckw1patient".into(),
            recorder_id: Some("prac-010".into()),
            ..MedicationStatementRecord::default()
        }
    }

    #[test]
    fn medication_concept_and_dosage_are_mapped() {
        let resource = MedicationStatementResource::from_record(&sample_record());
        let medication = resource.medication_codeable_concept.unwrap();
        assert_eq!(medication.coding[0].code.as_deref(), Some("BR0267411"));
        assert_eq!(resource.dosage.len(), 1);
        assert_eq!(
            resource.dosage[0].text.as_deref(),
            Some("1 comprimido ao dia")
        );
        assert_eq!(
            resource.dosage[0].route.as_ref().unwrap().coding[0]
                .code
                .as_deref(),
            Some("oral")
        );
    }

    #[test]
    fn recorder_surfaces_as_information_source() {
        let resource = MedicationStatementResource::from_record(&sample_record());
        assert_eq!(
            resource.information_source.unwrap().reference,
            "Practitioner/prac-010"
        );
    }

    #[test]
    fn open_ended_effective_window_keeps_only_start() {
        let resource = MedicationStatementResource::from_record(&sample_record());
        let period = resource.effective_period.unwrap();
        assert!(period.start.is_some());
        assert_eq!(period.end, None);
    }

    #[test]
    fn absent_status_defaults_to_active() {
        let mut record = sample_record();
        record.status = None;
        let resource = MedicationStatementResource::from_record(&record);
        assert_eq!(resource.status, "active");
    }

    #[test]
    fn route_alone_still_emits_a_dosage_entry() {
        let mut record = sample_record();
        record.dosage = None;
        let resource = MedicationStatementResource::from_record(&record);
        assert_eq!(resource.dosage.len(), 1);
        assert_eq!(resource.dosage[0].text, None);
    }
}
