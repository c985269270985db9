//! History aggregation protocol.
//!
//! One patient's full history is read as seven independent requests (the patient
//! aggregate plus six clinical collections) issued concurrently against the store
//! and awaited together; ordering of the final bundle does not depend on
//! completion order because assembly re-establishes it deterministically:
//! Patient first, then Encounters, Observations, Conditions, Allergies,
//! Procedures, Medications, each collection in the order the store returned it.
//!
//! Failure is all-or-nothing: a missing patient aborts the whole aggregation as
//! not-found, and a failed secondary read propagates as a store failure. Partial
//! bundles are never produced.

use crate::config::CoreConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::store::HistoryStore;
use fhir::{
    AllergyIntoleranceResource, Bundle, BundleType, ConditionResource, EncounterResource,
    MedicationStatementResource, ObservationResource, PatientResource, ProcedureResource,
};
use rac_records::LocatorId;
use std::sync::Arc;

/// Aggregates one patient's record collections into FHIR bundles.
#[derive(Clone)]
pub struct HistoryService<S> {
    cfg: Arc<CoreConfig>,
    store: S,
}

impl<S: HistoryStore> HistoryService<S> {
    pub fn new(cfg: Arc<CoreConfig>, store: S) -> Self {
        Self { cfg, store }
    }

    /// The full-history collection bundle consumed by the dashboard and profile
    /// views: exactly one Patient entry followed by the six clinical collections
    /// in fixed category order.
    pub async fn patient_history(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let limits = self.cfg.limits();

        let (patient, encounters, observations, conditions, allergies, procedures, medications) =
            tokio::try_join!(
                self.store.find_patient(patient_id),
                self.store.find_encounters(patient_id, limits.encounters),
                self.store.find_observations(patient_id, limits.observations),
                self.store.find_conditions(patient_id, limits.conditions),
                self.store.find_allergies(patient_id, limits.allergies),
                self.store.find_procedures(patient_id, limits.procedures),
                self.store.find_medications(patient_id, limits.medications),
            )?;

        let patient =
            patient.ok_or_else(|| HistoryError::PatientNotFound(patient_id.to_owned()))?;
        if patient.fhir_id.is_none() {
            tracing::warn!(patient_id, "patient record has no external id");
        }

        let mut bundle = Bundle::new(BundleType::Collection);
        bundle.push(patient.locator_id(), PatientResource::from_record(&patient));
        for encounter in &encounters {
            bundle.push(encounter.locator_id(), EncounterResource::from_record(encounter));
        }
        for observation in &observations {
            bundle.push(observation.locator_id(), ObservationResource::from_record(observation));
        }
        for condition in &conditions {
            bundle.push(condition.locator_id(), ConditionResource::from_record(condition));
        }
        for allergy in &allergies {
            bundle.push(allergy.locator_id(), AllergyIntoleranceResource::from_record(allergy));
        }
        for procedure in &procedures {
            bundle.push(procedure.locator_id(), ProcedureResource::from_record(procedure));
        }
        for medication in &medications {
            bundle.push(
                medication.locator_id(),
                MedicationStatementResource::from_record(medication),
            );
        }
        bundle.finalize();

        tracing::debug!(patient_id, entries = bundle.len(), "assembled history bundle");
        Ok(bundle)
    }

    /// CPF lookup: a searchset bundle with the single matching patient.
    pub async fn patient_by_cpf(&self, cpf: &str) -> HistoryResult<Bundle> {
        let patient = self
            .store
            .find_patient_by_cpf(cpf)
            .await?
            .ok_or_else(|| HistoryError::PatientNotFound(cpf.to_owned()))?;

        let mut bundle = Bundle::new(BundleType::Searchset);
        bundle.push(patient.locator_id(), PatientResource::from_record(&patient));
        bundle.finalize();
        Ok(bundle)
    }

    /// Searchset of the patient's encounters. An empty collection is a valid
    /// empty bundle, not an error.
    pub async fn encounters(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let records = self
            .store
            .find_encounters(patient_id, self.cfg.limits().encounters)
            .await?;
        let mut bundle = Bundle::new(BundleType::Searchset);
        for record in &records {
            bundle.push(record.locator_id(), EncounterResource::from_record(record));
        }
        bundle.finalize();
        Ok(bundle)
    }

    /// Searchset of the patient's observations.
    pub async fn observations(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let records = self
            .store
            .find_observations(patient_id, self.cfg.limits().observations)
            .await?;
        let mut bundle = Bundle::new(BundleType::Searchset);
        for record in &records {
            bundle.push(record.locator_id(), ObservationResource::from_record(record));
        }
        bundle.finalize();
        Ok(bundle)
    }

    /// Searchset of the patient's conditions.
    pub async fn conditions(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let records = self
            .store
            .find_conditions(patient_id, self.cfg.limits().conditions)
            .await?;
        let mut bundle = Bundle::new(BundleType::Searchset);
        for record in &records {
            bundle.push(record.locator_id(), ConditionResource::from_record(record));
        }
        bundle.finalize();
        Ok(bundle)
    }

    /// Searchset of the patient's allergies.
    pub async fn allergies(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let records = self
            .store
            .find_allergies(patient_id, self.cfg.limits().allergies)
            .await?;
        let mut bundle = Bundle::new(BundleType::Searchset);
        for record in &records {
            bundle.push(record.locator_id(), AllergyIntoleranceResource::from_record(record));
        }
        bundle.finalize();
        Ok(bundle)
    }

    /// Searchset of the patient's procedures.
    pub async fn procedures(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let records = self
            .store
            .find_procedures(patient_id, self.cfg.limits().procedures)
            .await?;
        let mut bundle = Bundle::new(BundleType::Searchset);
        for record in &records {
            bundle.push(record.locator_id(), ProcedureResource::from_record(record));
        }
        bundle.finalize();
        Ok(bundle)
    }

    /// Searchset of the patient's medication statements.
    pub async fn medications(&self, patient_id: &str) -> HistoryResult<Bundle> {
        let records = self
            .store
            .find_medications(patient_id, self.cfg.limits().medications)
            .await?;
        let mut bundle = Bundle::new(BundleType::Searchset);
        for record in &records {
            bundle.push(record.locator_id(), MedicationStatementResource::from_record(record));
        }
        bundle.finalize();
        Ok(bundle)
    }
}
