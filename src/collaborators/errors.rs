//! Collaborator error types.

use thiserror::Error;

/// Errors surfaced by external collaborators (directory, vault,
/// correspondence service, messaging, …).
///
/// These never escape the dispatcher: every variant is converted into a
/// `{success:false, message:"Erreur: …"}` reply so the conversational turn
/// survives the failure.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// The service could not be reached at all.
    #[error("service '{service}' unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    /// The service answered but the request failed.
    #[error("'{service}' request failed: {reason}")]
    RequestFailed { service: String, reason: String },

    /// The service answered with a malformed or unusable payload.
    #[error("'{service}' returned an invalid response: {reason}")]
    InvalidResponse { service: String, reason: String },
}

impl CollaboratorError {
    /// Shorthand for a failed request.
    pub fn failed(service: &str, reason: impl Into<String>) -> Self {
        CollaboratorError::RequestFailed {
            service: service.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an unreachable service.
    pub fn unavailable(service: &str, reason: impl Into<String>) -> Self {
        CollaboratorError::Unavailable {
            service: service.to_string(),
            reason: reason.into(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_service_and_reason() {
        let err = CollaboratorError::failed("annuaire", "timeout after 5s");
        let msg = err.to_string();
        assert!(msg.contains("annuaire"));
        assert!(msg.contains("timeout after 5s"));
    }

    #[test]
    fn test_unavailable_display() {
        let err = CollaboratorError::unavailable("courrier", "connection refused");
        assert!(err.to_string().contains("unavailable"));
    }
}
