//! Collaborator seams — the external services the dispatch core talks to.
//!
//! Every side effect the assistant cannot own (navigation, directory
//! lookups, the document vault, the correspondence service, the mailbox,
//! citizen services, the realtime transport) sits behind one of these
//! traits. Handlers receive them injected, so each one is unit-testable
//! against fakes without mounting any UI.
//!
//! Submodules:
//! - `types`: read-only domain projections (Contact, DocumentRef, …)
//! - `errors`: `CollaboratorError`, converted to `Erreur: …` replies

pub mod errors;
pub mod types;

#[cfg(test)]
pub(crate) mod fakes;

use async_trait::async_trait;

pub use errors::CollaboratorError;
pub use types::{
    CallEntry, Contact, CorrespondenceEntry, DocumentRef, DraftRequest, ExtractionReport,
    FolderListing, FolderSummary, MailMessage, ResolvedRoute, Role, SavedDocument, SendRequest,
    ServiceInfo, ServiceRequest, UserContext,
};

/// Maps free-text intent to a concrete portal route.
#[async_trait]
pub trait RouteResolver: Send + Sync {
    /// Resolve a free-text query ("mes courriers", "l'annuaire") to a route.
    async fn resolve(&self, query: &str) -> Result<Option<ResolvedRoute>, CollaboratorError>;

    /// Resolve a section name within the current role's space
    /// (e.g. Deputy + "courrier" → `/depute/courrier`).
    async fn resolve_section(
        &self,
        role: Role,
        section: &str,
    ) -> Result<Option<ResolvedRoute>, CollaboratorError>;
}

/// Performs the actual navigation inside the host application.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, path: &str) -> Result<(), CollaboratorError>;
}

/// People directory lookup.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Contact>, CollaboratorError>;
}

/// Per-user store of previously imported documents.
#[async_trait]
pub trait DocumentVault: Send + Sync {
    async fn list(&self) -> Result<Vec<SavedDocument>, CollaboratorError>;

    /// Find a document by id or (case-insensitive) name fragment.
    async fn find(&self, needle: &str) -> Result<Option<SavedDocument>, CollaboratorError>;

    async fn mark_used(&self, id: &str) -> Result<(), CollaboratorError>;

    /// Analyze documents just dropped into the conversation.
    async fn analyze_dropped(&self) -> Result<ExtractionReport, CollaboratorError>;

    /// Analyze the documents already stored in the vault.
    async fn analyze_stored(&self) -> Result<ExtractionReport, CollaboratorError>;
}

/// Drafts, sends, and files formal letters.
#[async_trait]
pub trait CorrespondenceService: Send + Sync {
    async fn draft(&self, request: DraftRequest) -> Result<DocumentRef, CollaboratorError>;

    async fn send(&self, request: SendRequest) -> Result<(), CollaboratorError>;

    async fn file(
        &self,
        document_id: &str,
        folder: Option<&str>,
    ) -> Result<(), CollaboratorError>;

    /// List one folder's contents, or the per-folder counts when `None`.
    async fn list_folder(
        &self,
        folder_id: Option<&str>,
    ) -> Result<FolderListing, CollaboratorError>;
}

/// Portal mailbox, calls, and meetings.
#[async_trait]
pub trait MessagingService: Send + Sync {
    async fn send_message(
        &self,
        recipient: &str,
        content: &str,
    ) -> Result<(), CollaboratorError>;

    async fn list_mail(&self, folder: Option<&str>)
        -> Result<Vec<MailMessage>, CollaboratorError>;

    async fn unread_count(&self) -> Result<u32, CollaboratorError>;

    async fn call_history(&self) -> Result<Vec<CallEntry>, CollaboratorError>;

    async fn search(&self, query: &str) -> Result<Vec<MailMessage>, CollaboratorError>;

    /// Meeting management ("schedule", "cancel", "list"). Returns a
    /// human-readable outcome.
    async fn manage_meeting(
        &self,
        action: &str,
        title: Option<&str>,
        time: Option<&str>,
    ) -> Result<String, CollaboratorError>;

    /// Chat-thread management ("mute", "archive", "delete").
    async fn manage_chat(
        &self,
        action: &str,
        conversation: Option<&str>,
    ) -> Result<String, CollaboratorError>;
}

/// Consular / citizen services desk.
#[async_trait]
pub trait CitizenServices: Send + Sync {
    async fn request_service(
        &self,
        service: &str,
        details: Option<&str>,
    ) -> Result<ServiceRequest, CollaboratorError>;

    async fn schedule_appointment(
        &self,
        service: &str,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<String, CollaboratorError>;

    async fn list_requests(&self) -> Result<Vec<ServiceRequest>, CollaboratorError>;

    async fn service_info(
        &self,
        service: &str,
    ) -> Result<Option<ServiceInfo>, CollaboratorError>;
}

/// Supplies the current user's identity and location. Read-only.
#[async_trait]
pub trait UserContextProvider: Send + Sync {
    async fn current(&self) -> UserContext;
}

/// Non-blocking transient notifications (toasts).
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Control handle over the realtime voice transport.
#[async_trait]
pub trait TransportControl: Send + Sync {
    /// Tear the connection down. No rollback of completed side effects.
    async fn shutdown(&self);
}
