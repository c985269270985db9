//! Practitioner wire model and mapper.

use crate::constants::{br_core_profile, CBO_SYSTEM, CNS_SYSTEM, CPF_SYSTEM};
use crate::datatypes::{
    fmt_date, push_unique_identifier, CodeableConcept, ContactPoint, HumanName, Identifier, Meta,
};
use crate::resource::ResourceKind;
use rac_records::PractitionerRecord;
use serde::Serialize;

/// A professional qualification: the CBO occupation concept plus, when recorded,
/// the licensing council registration as a qualification identifier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Qualification {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    pub code: CodeableConcept,
}

/// BR Core Practitioner resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PractitionerResource {
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
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub qualification: Vec<Qualification>,
}

impl PractitionerResource {
    pub fn from_record(record: &PractitionerRecord) -> Self {
        let mut identifier: Vec<Identifier> =
            record.identifiers.iter().map(Identifier::from).collect();
        if let Some(cpf) = &record.cpf {
            push_unique_identifier(&mut identifier, Identifier::official(CPF_SYSTEM, cpf));
        }
        if let Some(cns) = &record.cns {
            push_unique_identifier(&mut identifier, Identifier::official(CNS_SYSTEM, cns));
        }

        Self {
            resource_type: "Practitioner",
            id: record.fhir_id.clone(),
            meta: Meta::with_profile(br_core_profile(ResourceKind::Practitioner)),
            identifier,
            active: record.active,
            name: record.names.iter().map(HumanName::from).collect(),
            telecom: record.telecoms.iter().map(ContactPoint::from).collect(),
            gender: record.gender.clone(),
            birth_date: record.birth_date.as_ref().map(fmt_date),
            qualification: map_qualification(record).into_iter().collect(),
        }
    }
}

fn map_qualification(record: &PractitionerRecord) -> Option<Qualification> {
    let code = record.qualification_code.as_ref()?;
    let mut qualification = Qualification {
        identifier: Vec::new(),
        code: CodeableConcept::with_system(CBO_SYSTEM, code, record.qualification_text.clone()),
    };
    if let Some(number) = &record.council_number {
        qualification.identifier.push(council_identifier(
            number,
            record.council_type.as_deref(),
            record.council_uf.as_deref(),
        ));
    }
    Some(qualification)
}

/// Council registration as an identifier: type coding carries the council acronym,
/// type text adds the federation unit when known (`CRM/SP`).
fn council_identifier(number: &str, council: Option<&str>, uf: Option<&str>) -> Identifier {
    let type_concept = council.map(|acronym| {
        let concept = CodeableConcept::from_code(acronym);
        match uf {
            Some(uf) => concept.text(format!("{acronym}/{uf}")),
            None => concept,
        }
    });
    Identifier {
        use_code: Some("official".to_owned()),
        type_concept,
        system: None,
        value: number.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PractitionerRecord {
        PractitionerRecord {
            id: "ckw1prac".into(),
            fhir_id: Some("prac-010".into()),
            active: true,
            cns: Some("700000000000123".into()),
            qualification_code: Some("225100".into()),
            qualification_text: Some("Cardiologia".into()),
            council_type: Some("CRM".into()),
            council_number: Some("123456".into()),
            council_uf: Some("SP".into()),
            ..PractitionerRecord::default()
        }
    }

    #[test]
    fn qualification_carries_cbo_coding() {
        let resource = PractitionerResource::from_record(&sample_record());
        let qualification = &resource.qualification[0];
        let coding = &qualification.code.coding[0];
        assert_eq!(coding.system.as_deref(), Some(CBO_SYSTEM));
        assert_eq!(coding.code.as_deref(), Some("225100"));
        assert_eq!(coding.display.as_deref(), Some("Cardiologia"));
    }

    #[test]
    fn council_registration_becomes_qualification_identifier() {
        let resource = PractitionerResource::from_record(&sample_record());
        let identifier = &resource.qualification[0].identifier[0];
        assert_eq!(identifier.value, "123456");
        let type_concept = identifier.type_concept.as_ref().unwrap();
        assert_eq!(type_concept.text.as_deref(), Some("CRM/SP"));
    }

    #[test]
    fn no_qualification_code_means_no_qualification_group() {
        let mut record = sample_record();
        record.qualification_code = None;
        let resource = PractitionerResource::from_record(&record);
        assert!(resource.qualification.is_empty());
        let json = serde_json::to_value(&resource).unwrap();
        assert!(json.get("qualification").is_none());
    }

    #[test]
    fn cns_is_synthesized_into_identifiers() {
        let resource = PractitionerResource::from_record(&sample_record());
        assert_eq!(resource.identifier.len(), 1);
        assert_eq!(resource.identifier[0].system.as_deref(), Some(CNS_SYSTEM));
    }
}
