//! Observation wire model, value resolver, and mapper.
//!
//! An observation's value is a tagged union: exactly one of quantity, free text, or
//! coded concept survives mapping. Resolution happens once, here, with a fixed
//! first-populated-wins precedence (quantity, then string, then coded); downstream
//! code never re-inspects the raw columns. Components run the same resolver
//! independently and keep their stored order.

use crate::constants::{br_core_profile, UCUM_SYSTEM};
use crate::datatypes::{
    fmt_instant, Annotation, CodeableConcept, Coding, Meta, Quantity,
};
use crate::resource::{Reference, ResourceKind};
use rac_records::{LocatorId, ObservationComponentRecord, ObservationRecord, ValueFields};
use serde::Serialize;

/// The resolved value variant of an observation or component.
#[derive(Clone, Debug, PartialEq)]
pub enum ObservationValue {
    Quantity { value: f64, unit: Option<String> },
    Text(String),
    Coded(CodeableConcept),
}

impl ObservationValue {
    /// Collapse the raw, possibly overlapping value columns into one variant.
    /// First populated wins: quantity, then string, then coded. Total over the
    /// input shape; `None` when nothing is populated.
    pub fn resolve(fields: &ValueFields) -> Option<Self> {
        if let Some(value) = fields.quantity {
            return Some(ObservationValue::Quantity {
                value,
                unit: fields.unit.clone(),
            });
        }
        if let Some(text) = &fields.text {
            return Some(ObservationValue::Text(text.clone()));
        }
        fields.code.as_ref().map(|code| {
            let mut concept = CodeableConcept::from_coding(Coding {
                system: fields.code_system.clone(),
                code: Some(code.clone()),
                display: fields.code_display.clone(),
            });
            // The coded display also surfaces as the concept's flattened text.
            concept.text = fields.code_display.clone();
            ObservationValue::Coded(concept)
        })
    }

    fn into_wire(self) -> ObservationValueWire {
        match self {
            ObservationValue::Quantity { value, unit } => ObservationValueWire {
                quantity: Some(Quantity {
                    value: Some(value),
                    unit,
                    system: Some(UCUM_SYSTEM.to_owned()),
                }),
                ..ObservationValueWire::default()
            },
            ObservationValue::Text(text) => ObservationValueWire {
                text: Some(text),
                ..ObservationValueWire::default()
            },
            ObservationValue::Coded(concept) => ObservationValueWire {
                coded: Some(concept),
                ..ObservationValueWire::default()
            },
        }
    }

    fn wire_from(fields: &ValueFields) -> ObservationValueWire {
        Self::resolve(fields)
            .map(Self::into_wire)
            .unwrap_or_default()
    }
}

/// Wire projection of a resolved value: at most one field is ever populated, and an
/// unresolved value serialises to nothing at all.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ObservationValueWire {
    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(rename = "valueString", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "valueCodeableConcept", skip_serializing_if = "Option::is_none")]
    pub coded: Option<CodeableConcept>,
}

/// One sub-measurement under the parent observation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObservationComponent {
    pub code: CodeableConcept,
    #[serde(flatten)]
    pub value: ObservationValueWire,
}

impl ObservationComponent {
    fn from_record(record: &ObservationComponentRecord) -> Self {
        Self {
            code: concept_identity(&record.code_system, &record.code, &record.code_display),
            value: ObservationValue::wire_from(&record.value),
        }
    }
}

/// BR Core Observation resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObservationResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,
    #[serde(rename = "effectiveDateTime", skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performer: Vec<Reference>,
    #[serde(flatten)]
    pub value: ObservationValueWire,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interpretation: Vec<CodeableConcept>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<ObservationComponent>,
}

impl ObservationResource {
    pub fn from_record(record: &ObservationRecord) -> Self {
        let subject_id = record
            .patient
            .as_ref()
            .map(|patient| patient.locator_id())
            .unwrap_or(&record.patient_id);

        Self {
            resource_type: "Observation",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Observation)),
            status: record.status.clone(),
            category: record
                .category_code
                .as_ref()
                .map(|code| {
                    vec![CodeableConcept::from_coding(Coding {
                        code: Some(code.clone()),
                        display: record.category_display.clone(),
                        ..Coding::default()
                    })]
                })
                .unwrap_or_default(),
            code: concept_identity(&record.code_system, &record.code, &record.code_display),
            subject: Reference::to(ResourceKind::Patient, subject_id),
            encounter: record
                .encounter_id
                .as_ref()
                .map(|id| Reference::to(ResourceKind::Encounter, id)),
            effective_date_time: record.effective.as_ref().map(fmt_instant),
            issued: record.issued.as_ref().map(fmt_instant),
            performer: record
                .performer
                .as_ref()
                .map(|practitioner| {
                    vec![Reference::with_display(
                        ResourceKind::Practitioner,
                        practitioner.locator_id(),
                        practitioner.primary_name_text().map(str::to_owned),
                    )]
                })
                .unwrap_or_default(),
            value: ObservationValue::wire_from(&record.value),
            interpretation: record
                .interpretation_code
                .as_ref()
                .map(|code| {
                    let mut concept = CodeableConcept::from_code(code);
                    concept.text = record.interpretation_text.clone();
                    vec![concept]
                })
                .unwrap_or_default(),
            note: Annotation::from_note(&record.note),
            component: record
                .components
                .iter()
                .map(ObservationComponent::from_record)
                .collect(),
        }
    }
}

/// The concept identity of a measurement (code system + code + display), with all
/// parts optional as delivered by the store.
fn concept_identity(
    system: &Option<String>,
    code: &Option<String>,
    display: &Option<String>,
) -> CodeableConcept {
    CodeableConcept::from_coding(Coding {
        system: system.clone(),
        code: code.clone(),
        display: display.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn base_record() -> ObservationRecord {
        ObservationRecord {
            id: "ckw1obs".into(),
            fhir_id: Some("obs-001".into()),
            status: "final".into(),
            code_system: Some("http://loinc.org".into()),
            code: Some("85354-9".into()),
            code_display: Some("Blood pressure panel".into()),
            effective: Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 10, 0).unwrap()),
            patient_id: "ckw1patient".into(),
            ..ObservationRecord::default()
        }
    }

    #[test]
    fn quantity_wins_over_string_and_coded() {
        let mut record = base_record();
        record.value = ValueFields {
            quantity: Some(128.0),
            unit: Some("mm[Hg]".into()),
            text: Some("elevated".into()),
            code: Some("HIGH".into()),
            ..ValueFields::default()
        };
        let resource = ObservationResource::from_record(&record);
        let quantity = resource.value.quantity.as_ref().unwrap();
        assert_eq!(quantity.value, Some(128.0));
        assert_eq!(quantity.system.as_deref(), Some(UCUM_SYSTEM));
        assert_eq!(resource.value.text, None);
        assert_eq!(resource.value.coded, None);
    }

    #[test]
    fn string_wins_over_coded() {
        let fields = ValueFields {
            text: Some("negative".into()),
            code: Some("NEG".into()),
            ..ValueFields::default()
        };
        assert_eq!(
            ObservationValue::resolve(&fields),
            Some(ObservationValue::Text("negative".into()))
        );
    }

    #[test]
    fn coded_value_surfaces_display_as_text() {
        let fields = ValueFields {
            code: Some("260385009".into()),
            code_system: Some("http://snomed.info/sct".into()),
            code_display: Some("Negative".into()),
            ..ValueFields::default()
        };
        match ObservationValue::resolve(&fields).unwrap() {
            ObservationValue::Coded(concept) => {
                assert_eq!(concept.text.as_deref(), Some("Negative"));
                assert_eq!(concept.coding[0].code.as_deref(), Some("260385009"));
            }
            other => panic!("expected coded variant, got {other:?}"),
        }
    }

    #[test]
    fn unpopulated_value_is_absent_from_json() {
        let resource = ObservationResource::from_record(&base_record());
        let json = serde_json::to_value(&resource).unwrap();
        assert!(json.get("valueQuantity").is_none());
        assert!(json.get("valueString").is_none());
        assert!(json.get("valueCodeableConcept").is_none());
    }

    #[test]
    fn exactly_one_value_key_reaches_the_wire() {
        let mut record = base_record();
        record.value.quantity = Some(97.0);
        record.value.text = Some("ninety-seven".into());
        let json = serde_json::to_value(ObservationResource::from_record(&record)).unwrap();
        assert!(json.get("valueQuantity").is_some());
        assert!(json.get("valueString").is_none());
        assert!(json.get("valueCodeableConcept").is_none());
    }

    #[test]
    fn components_keep_stored_order_and_resolve_independently() {
        let mut record = base_record();
        record.components = vec![
            ObservationComponentRecord {
                code: Some("8480-6".into()),
                value: ValueFields {
                    quantity: Some(128.0),
                    unit: Some("mm[Hg]".into()),
                    ..ValueFields::default()
                },
                ..ObservationComponentRecord::default()
            },
            ObservationComponentRecord {
                code: Some("8462-4".into()),
                value: ValueFields {
                    text: Some("unreadable".into()),
                    ..ValueFields::default()
                },
                ..ObservationComponentRecord::default()
            },
        ];
        let resource = ObservationResource::from_record(&record);
        assert_eq!(resource.component.len(), 2);
        assert_eq!(
            resource.component[0].code.coding[0].code.as_deref(),
            Some("8480-6")
        );
        assert!(resource.component[0].value.quantity.is_some());
        assert_eq!(
            resource.component[1].value.text.as_deref(),
            Some("unreadable")
        );
    }

    #[test]
    fn encounter_reference_uses_the_known_id() {
        let mut record = base_record();
        record.encounter_id = Some("enc-001".into());
        let resource = ObservationResource::from_record(&record);
        assert_eq!(
            resource.encounter.unwrap().reference,
            "Encounter/enc-001"
        );
    }
}
