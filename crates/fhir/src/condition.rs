//! Condition (diagnosed problem) wire model and mapper.

use crate::constants::{
    br_core_profile, BR_CONDITION_CODE_SYSTEM, CONDITION_CLINICAL_SYSTEM,
    CONDITION_VERIFICATION_SYSTEM,
};
use crate::datatypes::{fmt_instant, Annotation, CodeableConcept, Coding, Meta};
use crate::resource::{Reference, ResourceKind};
use rac_records::ConditionRecord;
use serde::Serialize;

/// BR Core Condition resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConditionResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    #[serde(rename = "clinicalStatus", skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<CodeableConcept>,
    #[serde(rename = "verificationStatus", skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    pub subject: Reference,
    #[serde(rename = "onsetDateTime", skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,
    #[serde(rename = "abatementDateTime", skip_serializing_if = "Option::is_none")]
    pub abatement_date_time: Option<String>,
    #[serde(rename = "recordedDate", skip_serializing_if = "Option::is_none")]
    pub recorded_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
}

impl ConditionResource {
    pub fn from_record(record: &ConditionRecord) -> Self {
        Self {
            resource_type: "Condition",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Condition)),
            clinical_status: record.clinical_status.as_ref().map(|code| {
                CodeableConcept::with_system(CONDITION_CLINICAL_SYSTEM, code, None)
            }),
            verification_status: record.verification_status.as_ref().map(|code| {
                CodeableConcept::with_system(CONDITION_VERIFICATION_SYSTEM, code, None)
            }),
            category: record
                .category_code
                .as_ref()
                .map(|code| vec![CodeableConcept::from_code(code)])
                .unwrap_or_default(),
            severity: record.severity.as_ref().map(CodeableConcept::from_code),
            code: record.code.as_ref().map(|code| {
                CodeableConcept::from_coding(Coding {
                    system: Some(
                        record
                            .code_system
                            .clone()
                            .unwrap_or_else(|| BR_CONDITION_CODE_SYSTEM.to_owned()),
                    ),
                    code: Some(code.clone()),
                    display: record.code_display.clone(),
                })
            }),
            subject: Reference::to(ResourceKind::Patient, &record.patient_id),
            onset_date_time: record.onset.as_ref().map(fmt_instant),
            abatement_date_time: record.abatement.as_ref().map(fmt_instant),
            recorded_date: record.recorded_date.as_ref().map(fmt_instant),
            recorder: record
                .recorder_id
                .as_ref()
                .map(|id| Reference::to(ResourceKind::Practitioner, id)),
            note: Annotation::from_note(&record.note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_record() -> ConditionRecord {
        ConditionRecord {
            id: "ckw1cond".into(),
            fhir_id: Some("cond-001".into()),
            clinical_status: Some("active".into()),
            verification_status: Some("confirmed".into()),
            code: Some("I10".into()),
            code_display: Some("Hipertensão essencial".into()),
            recorded_date: Some(Utc.with_ymd_and_hms(2023, 11, 3, 12, 0, 0).unwrap()),
            patient_id: "ckw1patient".into(),
            recorder_id: Some("prac-010".into()),
            ..ConditionRecord::default()
        }
    }

    #[test]
    fn clinical_and_verification_statuses_use_hl7_systems() {
        let resource = ConditionResource::from_record(&sample_record());
        assert_eq!(
            resource.clinical_status.unwrap().coding[0].system.as_deref(),
            Some(CONDITION_CLINICAL_SYSTEM)
        );
        assert_eq!(
            resource.verification_status.unwrap().coding[0]
                .system
                .as_deref(),
            Some(CONDITION_VERIFICATION_SYSTEM)
        );
    }

    #[test]
    fn diagnosis_without_explicit_system_falls_back_to_br_default() {
        let resource = ConditionResource::from_record(&sample_record());
        let code = resource.code.unwrap();
        assert_eq!(
            code.coding[0].system.as_deref(),
            Some(BR_CONDITION_CODE_SYSTEM)
        );
        assert_eq!(code.coding[0].code.as_deref(), Some("I10"));
    }

    #[test]
    fn recorder_reference_is_well_formed() {
        let resource = ConditionResource::from_record(&sample_record());
        assert_eq!(
            resource.recorder.unwrap().reference,
            "Practitioner/prac-010"
        );
    }

    #[test]
    fn absent_optional_fields_leave_no_keys() {
        let record = ConditionRecord {
            id: "c1".into(),
            fhir_id: Some("cond-002".into()),
            patient_id: "p1".into(),
            ..ConditionRecord::default()
        };
        let json = serde_json::to_value(ConditionResource::from_record(&record)).unwrap();
        for key in [
            "clinicalStatus",
            "verificationStatus",
            "category",
            "severity",
            "code",
            "onsetDateTime",
            "recorder",
            "note",
        ] {
            assert!(json.get(key).is_none(), "unexpected key {key}");
        }
        assert_eq!(json["subject"]["reference"], "Patient/p1");
    }
}
