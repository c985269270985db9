//! Aggregate record types delivered by the persistence collaborator.
//!
//! Every struct in this crate is a point-in-time snapshot of one entity row plus its
//! eagerly loaded relations, exactly as the store returns them. The mapping layer in
//! the `fhir` crate reads these records and never mutates or re-queries them, so all
//! relation fields are plain `Vec`s and `Option`s resolved once at the persistence
//! boundary rather than probed defensively downstream.
//!
//! Conventions:
//! - `id` is the internal storage key; `fhir_id` is the stable external identifier
//!   used in locators and reference strings. Records without an external id are
//!   legal and fall back to the internal key (see [`LocatorId`]).
//! - Instants are `DateTime<Utc>`; date-only fields are `NaiveDate`.
//! - Relation `Vec`s preserve the order the store returned them in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod administrative;
pub mod clinical;

pub use administrative::{OrganizationRecord, PatientRecord, PractitionerRecord};
pub use clinical::{
    AllergyIntoleranceRecord, ConditionRecord, EncounterRecord, MedicationStatementRecord,
    ObservationComponentRecord, ObservationRecord, ProcedureRecord, ValueFields,
};

/// Identity used when building locators and reference strings: the external FHIR id
/// when one is recorded, the internal storage key otherwise.
pub trait LocatorId {
    fn locator_id(&self) -> &str;
}

macro_rules! impl_locator_id {
    ($($record:ty),+ $(,)?) => {
        $(
            impl crate::LocatorId for $record {
                fn locator_id(&self) -> &str {
                    self.fhir_id.as_deref().unwrap_or(&self.id)
                }
            }
        )+
    };
}
pub(crate) use impl_locator_id;

/// One generic identifier row (system/value pair with optional typing).
///
/// National identifiers (CPF, CNS, CNES) are usually carried in dedicated columns on
/// the owning entity; rows here are the free-form remainder. The two can overlap, and
/// the mapping layer deduplicates on output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    pub use_code: Option<String>,
    pub system: Option<String>,
    pub value: String,
    pub type_code: Option<String>,
    pub type_display: Option<String>,
}

/// One human-name row. `given` holds a single given-names string as stored; the
/// mapping layer lifts it into the wire format's list shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanNameRecord {
    pub use_code: Option<String>,
    pub text: Option<String>,
    pub family: Option<String>,
    pub given: Option<String>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
}

/// One telecom row (phone, email, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPointRecord {
    pub system: Option<String>,
    pub value: Option<String>,
    pub use_code: Option<String>,
    pub rank: Option<u32>,
}

/// One address row. Lines are stored as two flat columns and collapsed into the wire
/// format's line list by the mapping layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub use_code: Option<String>,
    pub type_code: Option<String>,
    pub text: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relation_rows_round_trip_through_json() {
        let row = HumanNameRecord {
            use_code: Some("official".into()),
            text: Some("Maria da Silva".into()),
            family: Some("Silva".into()),
            given: Some("Maria".into()),
            period_start: Some(Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap()),
            period_end: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: HumanNameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn record_json_keeps_snake_case_column_names() {
        let row = IdentifierRecord {
            use_code: Some("official".into()),
            system: Some("urn:mrn".into()),
            value: "12345".into(),
            type_code: Some("MR".into()),
            type_display: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["use_code"], "official");
        assert_eq!(json["type_code"], "MR");
        assert_eq!(json["value"], "12345");
    }

    #[test]
    fn instants_serialize_as_rfc3339() {
        let row = HumanNameRecord {
            period_start: Some(Utc.with_ymd_and_hms(2010, 1, 1, 8, 30, 0).unwrap()),
            ..HumanNameRecord::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["period_start"], "2010-01-01T08:30:00Z");
    }
}
