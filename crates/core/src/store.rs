//! Boundary to the persistence collaborator.
//!
//! The store delivers already-joined aggregate snapshots: each record arrives with
//! its relation rows and related aggregates preloaded, and each collection comes
//! back already capped and in the store's own ordering (typically
//! reverse-chronological). The aggregation layer never issues its own joins and
//! never re-sorts what the store returned.

use crate::error::BoxError;
use async_trait::async_trait;
use rac_records::{
    AllergyIntoleranceRecord, ConditionRecord, EncounterRecord, MedicationStatementRecord,
    ObservationRecord, PatientRecord, ProcedureRecord,
};

/// Read interface the persistence collaborator implements.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Look a patient up by internal id.
    async fn find_patient(&self, patient_id: &str) -> Result<Option<PatientRecord>, BoxError>;

    /// Look a patient up by CPF, matching either the dedicated CPF column or an
    /// identifier row carrying the CPF naming system.
    async fn find_patient_by_cpf(&self, cpf: &str) -> Result<Option<PatientRecord>, BoxError>;

    async fn find_encounters(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<EncounterRecord>, BoxError>;

    async fn find_observations(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ObservationRecord>, BoxError>;

    async fn find_conditions(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ConditionRecord>, BoxError>;

    async fn find_allergies(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<AllergyIntoleranceRecord>, BoxError>;

    async fn find_procedures(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ProcedureRecord>, BoxError>;

    async fn find_medications(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<MedicationStatementRecord>, BoxError>;
}
