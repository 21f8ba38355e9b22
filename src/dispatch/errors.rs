//! Handler error taxonomy.
//!
//! No handler error ever escapes the dispatcher: each variant has a fixed
//! conversion into a `{success:false, message}` reply so a failure stays
//! local to one tool call and the conversational turn survives.

use thiserror::Error;

use crate::collaborators::errors::CollaboratorError;
use crate::dispatch::types::ToolReply;

/// Failure inside a tool handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Missing or unusable argument, or no pending state to act on. The
    /// message is user-facing and relayed verbatim by the model.
    #[error("{0}")]
    Invalid(String),

    /// A referenced entity (contact, document, service) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An external collaborator call failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl HandlerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        HandlerError::Invalid(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HandlerError::NotFound(message.into())
    }

    /// Convert into the wire-shape failure reply.
    pub fn into_reply(self) -> ToolReply {
        match self {
            HandlerError::Invalid(message) | HandlerError::NotFound(message) => {
                ToolReply::fail(message)
            }
            HandlerError::Collaborator(cause) => ToolReply::fail(format!("Erreur: {cause}")),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
