//! Resource kinds, cross-resource references, and the mapped-resource union.

use crate::allergy_intolerance::AllergyIntoleranceResource;
use crate::condition::ConditionResource;
use crate::encounter::EncounterResource;
use crate::medication_statement::MedicationStatementResource;
use crate::observation::ObservationResource;
use crate::organization::OrganizationResource;
use crate::patient::PatientResource;
use crate::practitioner::PractitionerResource;
use crate::procedure::ProcedureResource;
use serde::Serialize;
use std::fmt;

/// The fixed nine-member set of resource kinds this layer produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Patient,
    Practitioner,
    Organization,
    Encounter,
    Observation,
    Condition,
    AllergyIntolerance,
    Procedure,
    MedicationStatement,
}

impl ResourceKind {
    /// All kinds, in no particular order. Used by tests and profile lookups.
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Patient,
        ResourceKind::Practitioner,
        ResourceKind::Organization,
        ResourceKind::Encounter,
        ResourceKind::Observation,
        ResourceKind::Condition,
        ResourceKind::AllergyIntolerance,
        ResourceKind::Procedure,
        ResourceKind::MedicationStatement,
    ];

    /// The literal FHIR resource-type name.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Patient => "Patient",
            ResourceKind::Practitioner => "Practitioner",
            ResourceKind::Organization => "Organization",
            ResourceKind::Encounter => "Encounter",
            ResourceKind::Observation => "Observation",
            ResourceKind::Condition => "Condition",
            ResourceKind::AllergyIntolerance => "AllergyIntolerance",
            ResourceKind::Procedure => "Procedure",
            ResourceKind::MedicationStatement => "MedicationStatement",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to another mapped resource: `"<ResourceKind>/<id>"` plus optional
/// display text from the referenced entity's primary name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Reference {
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// A bare reference string with no display.
    pub fn to(kind: ResourceKind, id: &str) -> Self {
        Self {
            reference: format!("{kind}/{id}"),
            display: None,
        }
    }

    /// A reference with display text when the related aggregate was loaded; when the
    /// display is unavailable the reference string alone is emitted.
    pub fn with_display(kind: ResourceKind, id: &str, display: Option<String>) -> Self {
        Self {
            reference: format!("{kind}/{id}"),
            display,
        }
    }
}

/// The union of the nine mapped resource shapes.
///
/// Serialised untagged: each variant already carries its own fixed `resourceType`
/// literal, so no outer tag is wanted on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Patient(PatientResource),
    Practitioner(PractitionerResource),
    Organization(OrganizationResource),
    Encounter(EncounterResource),
    Observation(ObservationResource),
    Condition(ConditionResource),
    AllergyIntolerance(AllergyIntoleranceResource),
    Procedure(ProcedureResource),
    MedicationStatement(MedicationStatementResource),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Patient(_) => ResourceKind::Patient,
            Resource::Practitioner(_) => ResourceKind::Practitioner,
            Resource::Organization(_) => ResourceKind::Organization,
            Resource::Encounter(_) => ResourceKind::Encounter,
            Resource::Observation(_) => ResourceKind::Observation,
            Resource::Condition(_) => ResourceKind::Condition,
            Resource::AllergyIntolerance(_) => ResourceKind::AllergyIntolerance,
            Resource::Procedure(_) => ResourceKind::Procedure,
            Resource::MedicationStatement(_) => ResourceKind::MedicationStatement,
        }
    }

    /// The mapped resource's external id, if the source record carried one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Patient(r) => r.id.as_deref(),
            Resource::Practitioner(r) => r.id.as_deref(),
            Resource::Organization(r) => r.id.as_deref(),
            Resource::Encounter(r) => r.id.as_deref(),
            Resource::Observation(r) => r.id.as_deref(),
            Resource::Condition(r) => r.id.as_deref(),
            Resource::AllergyIntolerance(r) => r.id.as_deref(),
            Resource::Procedure(r) => r.id.as_deref(),
            Resource::MedicationStatement(r) => r.id.as_deref(),
        }
    }
}

macro_rules! impl_into_resource {
    ($($variant:ident => $resource:ty),+ $(,)?) => {
        $(
            impl From<$resource> for Resource {
                fn from(resource: $resource) -> Self {
                    Resource::$variant(resource)
                }
            }
        )+
    };
}

impl_into_resource!(
    Patient => PatientResource,
    Practitioner => PractitionerResource,
    Organization => OrganizationResource,
    Encounter => EncounterResource,
    Observation => ObservationResource,
    Condition => ConditionResource,
    AllergyIntolerance => AllergyIntoleranceResource,
    Procedure => ProcedureResource,
    MedicationStatement => MedicationStatementResource,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_string_is_kind_slash_id() {
        let reference = Reference::to(ResourceKind::Patient, "pat-001");
        assert_eq!(reference.reference, "Patient/pat-001");
        assert_eq!(reference.display, None);
    }

    #[test]
    fn reference_display_is_omitted_from_json_when_absent() {
        let reference = Reference::to(ResourceKind::Organization, "org-9");
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json["reference"], "Organization/org-9");
        assert!(json.get("display").is_none());
    }

    #[test]
    fn kind_names_are_the_fhir_literals() {
        assert_eq!(ResourceKind::AllergyIntolerance.as_str(), "AllergyIntolerance");
        assert_eq!(ResourceKind::MedicationStatement.as_str(), "MedicationStatement");
    }
}
