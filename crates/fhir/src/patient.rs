//! Patient wire model and mapper.
//!
//! Translates a [`PatientRecord`] aggregate into the BR Core Patient shape. The CPF
//! and CNS columns are synthesized into the identifier list without duplicating a
//! generic identifier row already carrying the same system or value.

use crate::constants::{br_core_profile, CNS_SYSTEM, CPF_SYSTEM};
use crate::datatypes::{
    fmt_date, push_unique_identifier, Address, CodeableConcept, ContactPoint, HumanName,
    Identifier, Meta,
};
use crate::resource::ResourceKind;
use rac_records::PatientRecord;
use serde::Serialize;

/// A language the patient communicates in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Communication {
    pub language: CodeableConcept,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
}

/// BR Core Patient resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "deceasedBoolean", skip_serializing_if = "Option::is_none")]
    pub deceased_boolean: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
    #[serde(rename = "maritalStatus", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub communication: Vec<Communication>,
}

impl PatientResource {
    pub fn from_record(record: &PatientRecord) -> Self {
        let mut identifier: Vec<Identifier> =
            record.identifiers.iter().map(Identifier::from).collect();
        if let Some(cpf) = &record.cpf {
            push_unique_identifier(&mut identifier, Identifier::official(CPF_SYSTEM, cpf));
        }
        if let Some(cns) = &record.cns {
            push_unique_identifier(&mut identifier, Identifier::official(CNS_SYSTEM, cns));
        }

        Self {
            resource_type: "Patient",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Patient)),
            identifier,
            active: record.active,
            name: record.names.iter().map(HumanName::from).collect(),
            telecom: record.telecoms.iter().map(ContactPoint::from).collect(),
            gender: record.gender.clone(),
            birth_date: record.birth_date.as_ref().map(fmt_date),
            deceased_boolean: record.deceased.then_some(true),
            address: record.addresses.iter().map(Address::from).collect(),
            marital_status: record.marital_status.as_ref().map(CodeableConcept::from_code),
            communication: record
                .language
                .as_ref()
                .map(|language| {
                    vec![Communication {
                        language: CodeableConcept::from_code(language),
                        preferred: Some(true),
                    }]
                })
                .unwrap_or_default(),
        }
    }
}
