//! Bundle envelope and assembly.
//!
//! The assembler is deliberately dumb: it appends entries in the order it is given
//! them and never reorders, deduplicates, or counts on the fly. Callers append all
//! entries for a response and then call [`Bundle::finalize`] once, which pins
//! `total` to the entry count and refreshes the timestamp. Ordering and uniqueness
//! are the caller's responsibility.

use crate::datatypes::fmt_instant;
use crate::resource::Resource;
use crate::FhirResult;
use chrono::Utc;
use serde::Serialize;

/// Bundle kinds produced by this layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    /// A fixed aggregate of resources (the patient-history response).
    Collection,
    /// A search result (lookup endpoints).
    Searchset,
}

/// One bundle entry: a locator string plus the mapped resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BundleEntry {
    #[serde(rename = "fullUrl")]
    pub full_url: String,
    pub resource: Resource,
}

/// A FHIR Bundle envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    #[serde(rename = "type")]
    pub kind: BundleType,
    pub timestamp: String,
    pub total: u32,
    #[serde(rename = "entry")]
    pub entries: Vec<BundleEntry>,
}

impl Bundle {
    /// An empty envelope with a creation timestamp and a zero total.
    pub fn new(kind: BundleType) -> Self {
        Self {
            resource_type: "Bundle",
            kind,
            timestamp: fmt_instant(&Utc::now()),
            total: 0,
            entries: Vec::new(),
        }
    }

    /// Append one entry with locator `"<kind>/<id>"`, the kind taken from the
    /// resource itself. Insertion order is preserved; `total` is left for
    /// [`finalize`](Bundle::finalize).
    pub fn push(&mut self, id: &str, resource: impl Into<Resource>) {
        let resource = resource.into();
        self.entries.push(BundleEntry {
            full_url: format!("{}/{id}", resource.kind()),
            resource,
        });
    }

    /// Pin `total` to the entry count and refresh the timestamp. Called once after
    /// all entries for a response are appended.
    pub fn finalize(&mut self) {
        self.total = self.entries.len() as u32;
        self.timestamp = fmt_instant(&Utc::now());
    }

    /// Serialise the bundle to its response JSON.
    pub fn render(&self) -> FhirResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientResource;
    use rac_records::PatientRecord;

    fn patient_resource(id: &str) -> PatientResource {
        PatientResource::from_record(&PatientRecord {
            id: format!("internal-{id}"),
            fhir_id: Some(id.to_owned()),
            active: true,
            ..PatientRecord::default()
        })
    }

    #[test]
    fn new_bundle_is_empty_with_zero_total() {
        let bundle = Bundle::new(BundleType::Collection);
        assert!(bundle.is_empty());
        assert_eq!(bundle.total, 0);
        assert!(!bundle.timestamp.is_empty());
    }

    #[test]
    fn finalize_pins_total_to_entry_count() {
        let mut bundle = Bundle::new(BundleType::Searchset);
        bundle.push("pat-001", patient_resource("pat-001"));
        bundle.push("pat-002", patient_resource("pat-002"));
        assert_eq!(bundle.total, 0);
        bundle.finalize();
        assert_eq!(bundle.total, 2);
        assert_eq!(bundle.total as usize, bundle.len());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut bundle = Bundle::new(BundleType::Collection);
        for id in ["pat-003", "pat-001", "pat-002"] {
            bundle.push(id, patient_resource(id));
        }
        let locators: Vec<_> = bundle
            .entries
            .iter()
            .map(|entry| entry.full_url.as_str())
            .collect();
        assert_eq!(
            locators,
            vec!["Patient/pat-003", "Patient/pat-001", "Patient/pat-002"]
        );
    }

    #[test]
    fn locator_kind_comes_from_the_resource() {
        use crate::resource::ResourceKind;

        let mut bundle = Bundle::new(BundleType::Collection);
        bundle.push("pat-001", patient_resource("pat-001"));
        let entry = &bundle.entries[0];
        assert_eq!(entry.full_url, "Patient/pat-001");
        assert_eq!(entry.resource.kind(), ResourceKind::Patient);
        assert_eq!(entry.resource.id(), Some("pat-001"));
    }

    #[test]
    fn wire_shape_uses_fhir_field_names() {
        let mut bundle = Bundle::new(BundleType::Collection);
        bundle.push("pat-001", patient_resource("pat-001"));
        bundle.finalize();
        let json: serde_json::Value = serde_json::from_str(&bundle.render().unwrap()).unwrap();
        assert_eq!(json["resourceType"], "Bundle");
        assert_eq!(json["type"], "collection");
        assert_eq!(json["total"], 1);
        assert_eq!(json["entry"][0]["fullUrl"], "Patient/pat-001");
        assert_eq!(json["entry"][0]["resource"]["resourceType"], "Patient");
    }

    #[test]
    fn searchset_kind_serialises_lowercase() {
        let bundle = Bundle::new(BundleType::Searchset);
        let json: serde_json::Value = serde_json::from_str(&bundle.render().unwrap()).unwrap();
        assert_eq!(json["type"], "searchset");
    }
}
