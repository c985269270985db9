//! Fixed system and profile identifiers from the national interoperability scheme.
//!
//! These strings are reproduced bit-exact from the RNDS / BR Core naming scheme so
//! that any consumer expecting the real national identifiers accepts the simulated
//! payloads unchanged.

use crate::resource::ResourceKind;

/// National taxpayer-id naming system (CPF).
pub const CPF_SYSTEM: &str = "http://www.saude.gov.br/fhir/r4/NamingSystem/cpf";

/// National health-card naming system (CNS, Cartão Nacional de Saúde).
pub const CNS_SYSTEM: &str = "http://www.saude.gov.br/fhir/r4/NamingSystem/cns";

/// National facility-registry naming system (CNES).
pub const CNES_SYSTEM: &str = "http://www.saude.gov.br/fhir/r4/NamingSystem/cnes";

/// Professional-classification code system (CBO occupation codes).
pub const CBO_SYSTEM: &str = "http://www.saude.gov.br/fhir/r4/CodeSystem/BRCategoriaProfissional";

/// Fallback code system for condition diagnoses without an explicit system.
pub const BR_CONDITION_CODE_SYSTEM: &str =
    "http://www.saude.gov.br/fhir/r4/CodeSystem/BRCategoriaCondicao";

/// UCUM, the fixed measurement system for quantity values.
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// HL7 terminology system for condition clinical status.
pub const CONDITION_CLINICAL_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-clinical";

/// HL7 terminology system for condition verification status.
pub const CONDITION_VERIFICATION_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-ver-status";

/// HL7 terminology system for allergy/intolerance clinical status.
pub const ALLERGY_CLINICAL_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/allergyintolerance-clinical";

/// HL7 terminology system for allergy/intolerance verification status.
pub const ALLERGY_VERIFICATION_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/allergyintolerance-verification";

/// BR Core structure-definition profile URI for a resource kind.
pub fn br_core_profile(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Patient => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRIndividuo-1.0"
        }
        ResourceKind::Practitioner => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRProfissional-1.0"
        }
        ResourceKind::Organization => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BREstabelecimentoSaude-1.0"
        }
        ResourceKind::Encounter => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BREncontro-1.0"
        }
        ResourceKind::Observation => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRObservacao-1.0"
        }
        ResourceKind::Condition => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRProblemaCondicaoAvaliacao-1.0"
        }
        ResourceKind::AllergyIntolerance => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRAlergiaReacaoAdversa-1.0"
        }
        ResourceKind::Procedure => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRProcedimentoRealizado-1.0"
        }
        ResourceKind::MedicationStatement => {
            "http://www.saude.gov.br/fhir/r4/StructureDefinition/BRMedicamento-1.0"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_share_the_structure_definition_base() {
        for kind in ResourceKind::ALL {
            assert!(br_core_profile(kind)
                .starts_with("http://www.saude.gov.br/fhir/r4/StructureDefinition/"));
        }
    }
}
