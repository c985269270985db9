//! Administrative entities: patients, practitioners, and care organizations.

use crate::{impl_locator_id, AddressRecord, ContactPointRecord, HumanNameRecord, IdentifierRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient identity snapshot with its owned demographic rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    /// National taxpayer id (11 digits).
    pub cpf: Option<String>,
    /// National health-card number (Cartão Nacional de Saúde).
    pub cns: Option<String>,
    pub active: bool,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub deceased: bool,
    pub marital_status: Option<String>,
    pub language: Option<String>,
    pub identifiers: Vec<IdentifierRecord>,
    pub names: Vec<HumanNameRecord>,
    pub telecoms: Vec<ContactPointRecord>,
    pub addresses: Vec<AddressRecord>,
}

impl PatientRecord {
    /// Display text of the primary (first) name row, if any.
    pub fn primary_name_text(&self) -> Option<&str> {
        self.names.first().and_then(|name| name.text.as_deref())
    }
}

/// A practitioner identity snapshot plus professional qualification and licensing
/// council registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PractitionerRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    pub cpf: Option<String>,
    pub cns: Option<String>,
    pub active: bool,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// CBO occupation code (Classificação Brasileira de Ocupações).
    pub qualification_code: Option<String>,
    pub qualification_text: Option<String>,
    /// Licensing council acronym (CRM, COREN, ...).
    pub council_type: Option<String>,
    pub council_number: Option<String>,
    pub council_uf: Option<String>,
    pub identifiers: Vec<IdentifierRecord>,
    pub names: Vec<HumanNameRecord>,
    pub telecoms: Vec<ContactPointRecord>,
}

impl PractitionerRecord {
    /// Display text of the primary (first) name row, if any.
    pub fn primary_name_text(&self) -> Option<&str> {
        self.names.first().and_then(|name| name.text.as_deref())
    }
}

/// A health-care facility snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub id: String,
    pub fhir_id: Option<String>,
    /// National facility-registry id (Cadastro Nacional de Estabelecimentos de Saúde).
    pub cnes: Option<String>,
    pub active: bool,
    pub name: String,
    pub alias: Option<String>,
    pub type_code: Option<String>,
    pub type_display: Option<String>,
    pub identifiers: Vec<IdentifierRecord>,
    pub telecoms: Vec<ContactPointRecord>,
    pub addresses: Vec<AddressRecord>,
}

impl_locator_id!(PatientRecord, PractitionerRecord, OrganizationRecord);
