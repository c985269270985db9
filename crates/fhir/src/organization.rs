//! Organization (health-care facility) wire model and mapper.

use crate::constants::{br_core_profile, CNES_SYSTEM};
use crate::datatypes::{
    push_unique_identifier, Address, CodeableConcept, Coding, ContactPoint, Identifier, Meta,
};
use crate::resource::ResourceKind;
use rac_records::OrganizationRecord;
use serde::Serialize;

/// BR Core Organization resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrganizationResource {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    pub active: bool,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub type_concept: Vec<CodeableConcept>,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

impl OrganizationResource {
    pub fn from_record(record: &OrganizationRecord) -> Self {
        let mut identifier: Vec<Identifier> =
            record.identifiers.iter().map(Identifier::from).collect();
        if let Some(cnes) = &record.cnes {
            push_unique_identifier(&mut identifier, Identifier::official(CNES_SYSTEM, cnes));
        }

        Self {
            resource_type: "Organization",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Organization)),
            identifier,
            active: record.active,
            type_concept: record
                .type_code
                .as_ref()
                .map(|code| {
                    vec![CodeableConcept::from_coding(Coding {
                        code: Some(code.clone()),
                        display: record.type_display.clone(),
                        ..Coding::default()
                    })]
                })
                .unwrap_or_default(),
            name: record.name.clone(),
            alias: record.alias.iter().cloned().collect(),
            telecom: record.telecoms.iter().map(ContactPoint::from).collect(),
            address: record.addresses.iter().map(Address::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rac_records::IdentifierRecord;

    fn sample_record() -> OrganizationRecord {
        OrganizationRecord {
            id: "ckw1org".into(),
            fhir_id: Some("org-100".into()),
            cnes: Some("2077485".into()),
            active: true,
            name: "UBS Vila Mariana".into(),
            alias: Some("UBS VM".into()),
            type_code: Some("prov".into()),
            type_display: Some("Healthcare Provider".into()),
            ..OrganizationRecord::default()
        }
    }

    #[test]
    fn cnes_is_synthesized_with_the_facility_system() {
        let resource = OrganizationResource::from_record(&sample_record());
        assert_eq!(resource.identifier.len(), 1);
        assert_eq!(resource.identifier[0].system.as_deref(), Some(CNES_SYSTEM));
        assert_eq!(resource.identifier[0].value, "2077485");
    }

    #[test]
    fn existing_cnes_row_is_not_duplicated() {
        let mut record = sample_record();
        record.identifiers.push(IdentifierRecord {
            system: Some(CNES_SYSTEM.into()),
            value: "2077485".into(),
            ..IdentifierRecord::default()
        });
        let resource = OrganizationResource::from_record(&record);
        assert_eq!(resource.identifier.len(), 1);
    }

    #[test]
    fn alias_and_type_are_optional_groups() {
        let mut record = sample_record();
        record.alias = None;
        record.type_code = None;
        let json = serde_json::to_value(OrganizationResource::from_record(&record)).unwrap();
        assert!(json.get("alias").is_none());
        assert!(json.get("type").is_none());
        assert_eq!(json["name"], "UBS Vila Mariana");
    }
}
