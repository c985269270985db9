//! FHIR R4 data types shared across resource wire models.
//!
//! All structs here are serialise-only wire shapes: translation runs one way, from
//! aggregate records to response JSON. Every optional field carries
//! `skip_serializing_if` so that absent source data disappears from the payload
//! instead of surfacing as `null` or as an empty list.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rac_records::{AddressRecord, ContactPointRecord, HumanNameRecord, IdentifierRecord};
use serde::Serialize;

/// Canonical textual form for instants: RFC 3339 with millisecond precision and a
/// `Z` suffix, matching the upstream exchange's serialisation.
pub(crate) fn fmt_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Date-only fields are serialised without a time component.
pub(crate) fn fmt_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Resource metadata. Only the BR Core profile claim is carried.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profile: Vec<String>,
}

impl Meta {
    pub fn with_profile(profile: &str) -> Self {
        Self {
            profile: vec![profile.to_owned()],
        }
    }
}

/// A (system, code, display) triple from a controlled vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept carrying one or more codings plus an optional flattened text.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// A bare code with no system, the wrapping used for single-value coded fields
    /// (marital status, severity, category, route, ...).
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            coding: vec![Coding {
                code: Some(code.into()),
                ..Coding::default()
            }],
            ..Self::default()
        }
    }

    /// A single fully specified coding.
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            ..Self::default()
        }
    }

    /// A coding under a fixed terminology system.
    pub fn with_system(
        system: &str,
        code: impl Into<String>,
        display: Option<String>,
    ) -> Self {
        Self::from_coding(Coding {
            system: Some(system.to_owned()),
            code: Some(code.into()),
            display,
        })
    }

    /// Attach flattened display text to the concept.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A start/end window. Constructed only when at least one bound exists.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Period {
    /// Build a period from optional bounds; `None` when both are absent, so callers
    /// can feed it straight into an optional wire field.
    pub fn new(start: Option<&DateTime<Utc>>, end: Option<&DateTime<Utc>>) -> Option<Self> {
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(Self {
            start: start.map(fmt_instant),
            end: end.map(fmt_instant),
        })
    }
}

/// A measured amount. Quantities always carry the UCUM system constant.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// A free-text note attached to a clinical resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
}

impl Annotation {
    /// Wrap an optional note column into the wire format's annotation list.
    pub fn from_note(note: &Option<String>) -> Vec<Annotation> {
        note.iter()
            .map(|text| Annotation { text: text.clone() })
            .collect()
    }
}

/// An identifier entry (business identifier, national id, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_code: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_concept: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub value: String,
}

impl Identifier {
    /// The shape used for synthesized government identifiers (CPF, CNS, CNES).
    pub fn official(system: &str, value: impl Into<String>) -> Self {
        Self {
            use_code: Some("official".to_owned()),
            system: Some(system.to_owned()),
            value: value.into(),
            ..Self::default()
        }
    }
}

impl From<&IdentifierRecord> for Identifier {
    fn from(record: &IdentifierRecord) -> Self {
        Self {
            use_code: Some(
                record
                    .use_code
                    .clone()
                    .unwrap_or_else(|| "official".to_owned()),
            ),
            type_concept: record.type_code.as_ref().map(|code| CodeableConcept {
                coding: vec![Coding {
                    code: Some(code.clone()),
                    display: record.type_display.clone(),
                    ..Coding::default()
                }],
                ..CodeableConcept::default()
            }),
            system: record.system.clone(),
            value: record.value.clone(),
        }
    }
}

/// Dedup-aware append for synthesized national identifiers: skip when an entry with
/// the same system or the same value is already present.
pub fn push_unique_identifier(list: &mut Vec<Identifier>, identifier: Identifier) {
    let duplicate = list.iter().any(|existing| {
        existing.value == identifier.value
            || (existing.system.is_some() && existing.system == identifier.system)
    });
    if !duplicate {
        list.push(identifier);
    }
}

/// A human name entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HumanName {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl From<&HumanNameRecord> for HumanName {
    fn from(record: &HumanNameRecord) -> Self {
        Self {
            use_code: Some(
                record
                    .use_code
                    .clone()
                    .unwrap_or_else(|| "official".to_owned()),
            ),
            text: record.text.clone(),
            family: record.family.clone(),
            given: record.given.iter().cloned().collect(),
            period: Period::new(record.period_start.as_ref(), record.period_end.as_ref()),
        }
    }
}

/// A telecom entry (phone, email, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl From<&ContactPointRecord> for ContactPoint {
    fn from(record: &ContactPointRecord) -> Self {
        Self {
            system: record.system.clone(),
            value: record.value.clone(),
            use_code: record.use_code.clone(),
            rank: record.rank,
        }
    }
}

/// A postal address entry. Stored line columns collapse into the line list; the
/// country defaults to `BR` when the store left it blank.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Address {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_code: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "postalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<&AddressRecord> for Address {
    fn from(record: &AddressRecord) -> Self {
        Self {
            use_code: record.use_code.clone(),
            type_code: record.type_code.clone(),
            text: record.text.clone(),
            line: [&record.line1, &record.line2]
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
            city: record.city.clone(),
            district: record.district.clone(),
            state: record.state.clone(),
            postal_code: record.postal_code.clone(),
            country: Some(record.country.clone().unwrap_or_else(|| "BR".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn instant_form_is_millisecond_rfc3339_with_z() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(fmt_instant(&instant), "2024-03-05T14:30:00.000Z");
    }

    #[test]
    fn period_requires_at_least_one_bound() {
        assert_eq!(Period::new(None, None), None);
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let period = Period::new(Some(&start), None).unwrap();
        assert_eq!(period.start.as_deref(), Some("2024-01-01T08:00:00.000Z"));
        assert_eq!(period.end, None);
    }

    #[test]
    fn push_unique_skips_matching_value() {
        let mut list = vec![Identifier {
            use_code: Some("official".into()),
            system: Some("urn:mrn".into()),
            value: "12345678901".into(),
            ..Identifier::default()
        }];
        push_unique_identifier(&mut list, Identifier::official("urn:cpf", "12345678901"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn push_unique_skips_matching_system() {
        let mut list = vec![Identifier::official("urn:cpf", "11111111111")];
        push_unique_identifier(&mut list, Identifier::official("urn:cpf", "22222222222"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn push_unique_appends_new_entries() {
        let mut list = vec![Identifier::official("urn:cpf", "11111111111")];
        push_unique_identifier(&mut list, Identifier::official("urn:cns", "700000000000000"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn absent_identifier_use_defaults_to_official() {
        let record = IdentifierRecord {
            value: "abc".into(),
            ..IdentifierRecord::default()
        };
        let identifier = Identifier::from(&record);
        assert_eq!(identifier.use_code.as_deref(), Some("official"));
    }

    #[test]
    fn address_lines_collapse_and_country_defaults() {
        let record = AddressRecord {
            line1: Some("Rua das Flores, 100".into()),
            line2: None,
            city: Some("São Paulo".into()),
            ..AddressRecord::default()
        };
        let address = Address::from(&record);
        assert_eq!(address.line, vec!["Rua das Flores, 100"]);
        assert_eq!(address.country.as_deref(), Some("BR"));
    }

    #[test]
    fn empty_optional_groups_vanish_from_json() {
        let name = HumanName {
            use_code: Some("official".into()),
            family: Some("Silva".into()),
            ..HumanName::default()
        };
        let json = serde_json::to_value(&name).unwrap();
        assert!(json.get("given").is_none());
        assert!(json.get("period").is_none());
        assert!(json.get("text").is_none());
    }
}
