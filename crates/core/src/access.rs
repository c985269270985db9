//! Caller-resolution seam.
//!
//! The portal rule is that an authenticated caller reads only their own record.
//! Who the caller is gets decided by the excluded auth collaborator (JWT claims in
//! production, a fixture resolver in development and tests) and injected here as a
//! strategy, so this crate never branches on environment configuration itself.

use crate::error::{HistoryError, HistoryResult};

/// The identity the auth collaborator resolved for the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Internal id of the patient record the caller is bound to.
    pub patient_id: String,
}

/// Strategy for resolving the current caller, supplied by the auth collaborator.
pub trait CallerResolver: Send + Sync {
    /// `None` when no authenticated caller is bound to the request.
    fn resolve(&self) -> Option<CallerIdentity>;
}

/// Resolve the caller and check they are reading their own record.
///
/// # Errors
///
/// Returns [`HistoryError::AccessDenied`] when no caller is resolved or the
/// resolved caller is bound to a different patient.
pub fn require_self_access<R: CallerResolver>(
    resolver: &R,
    patient_id: &str,
) -> HistoryResult<CallerIdentity> {
    let caller = resolver.resolve().ok_or_else(|| HistoryError::AccessDenied {
        patient_id: patient_id.to_owned(),
    })?;
    if caller.patient_id != patient_id {
        return Err(HistoryError::AccessDenied {
            patient_id: patient_id.to_owned(),
        });
    }
    Ok(caller)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedResolver(Option<&'static str>);

    impl CallerResolver for FixedResolver {
        fn resolve(&self) -> Option<CallerIdentity> {
            self.0.map(|patient_id| CallerIdentity {
                patient_id: patient_id.to_owned(),
            })
        }
    }

    #[test]
    fn caller_may_read_their_own_record() {
        let resolver = FixedResolver(Some("pat-internal-1"));
        let caller = require_self_access(&resolver, "pat-internal-1").unwrap();
        assert_eq!(caller.patient_id, "pat-internal-1");
    }

    #[test]
    fn caller_is_denied_another_patients_record() {
        let resolver = FixedResolver(Some("pat-internal-1"));
        let err = require_self_access(&resolver, "pat-internal-2").unwrap_err();
        assert!(matches!(err, HistoryError::AccessDenied { .. }));
    }

    #[test]
    fn unresolved_caller_is_denied() {
        let resolver = FixedResolver(None);
        let err = require_self_access(&resolver, "pat-internal-1").unwrap_err();
        assert!(matches!(err, HistoryError::AccessDenied { .. }));
    }
}
