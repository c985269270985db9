//! Error taxonomy of the aggregation layer.

/// Opaque error type crossing the persistence-collaborator boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors escaping the aggregation layer.
///
/// Missing or malformed optional source data is never an error here: the mappers
/// absorb it as omission. The variants below are the only conditions the calling
/// layer has to translate into user-facing responses.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The requested patient aggregate does not exist (404-equivalent). The key is
    /// whatever the caller looked the patient up by (internal id or CPF).
    #[error("patient not found: {0}")]
    PatientNotFound(String),

    /// The resolved caller is not allowed to read this patient's record.
    #[error("access denied for patient {patient_id}")]
    AccessDenied { patient_id: String },

    /// A read against the persistence collaborator failed. Fatal for the request;
    /// no partial bundle is produced.
    #[error("persistence failure: {0}")]
    Store(#[from] BoxError),
}

/// Type alias for Results that can fail with a [`HistoryError`].
pub type HistoryResult<T> = Result<T, HistoryError>;
