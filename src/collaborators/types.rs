//! Shared domain types exchanged with the collaborators.
//!
//! These are read-only projections of data owned elsewhere (the directory,
//! the vault, the correspondence service, the auth resolver). The dispatch
//! core never persists them beyond the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Identity ───────────────────────────────────────────────────────────────

/// Portal role of the current user, as resolved by the host's auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    President,
    VicePresident,
    SecretaryGeneral,
    Questeur,
    Deputy,
    DepartmentHead,
    StaffAgent,
    Administrator,
    Resident,
    Visitor,
    ForeignResident,
    Organization,
    Unknown,
}

impl Role {
    /// Parse a role string from the host (tolerant of both portal spellings).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "president" => Role::President,
            "vice_president" => Role::VicePresident,
            "secretary_general" | "secretaire_general" => Role::SecretaryGeneral,
            "questeur" => Role::Questeur,
            "deputy" | "depute" => Role::Deputy,
            "department_head" | "chef_service" => Role::DepartmentHead,
            "staff_agent" | "agent" => Role::StaffAgent,
            "administrator" | "admin" => Role::Administrator,
            "resident" | "citizen" | "citoyen" => Role::Resident,
            "visitor" | "visiteur" => Role::Visitor,
            "foreign_resident" | "resident_etranger" => Role::ForeignResident,
            "organization" | "organisation" => Role::Organization,
            _ => Role::Unknown,
        }
    }

    /// Whether the user is identified at all. Anonymous sessions are the
    /// ones subject to the question quota.
    pub fn is_identified(self) -> bool {
        self != Role::Unknown
    }
}

/// Identity and location of the current user, supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub role: Role,
    pub first_name: Option<String>,
    /// Current route path within the portal (e.g. `/depute/courrier`).
    pub current_path: String,
}

impl UserContext {
    /// An anonymous visitor on the landing page.
    pub fn anonymous() -> Self {
        Self {
            role: Role::Unknown,
            first_name: None,
            current_path: "/".to_string(),
        }
    }
}

// ─── Navigation ─────────────────────────────────────────────────────────────

/// A route resolved from free-text intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoute {
    pub path: String,
    /// Human-readable page label, spoken back to the user.
    pub label: String,
}

// ─── Contacts ───────────────────────────────────────────────────────────────

/// Read-only projection of a directory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
}

// ─── Correspondence ─────────────────────────────────────────────────────────

/// A drafted formal letter, pending until sent or filed.
///
/// At most one is pending per session; `create_correspondence` replaces any
/// previous draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
    /// Local preview URL handed to the document panel.
    pub url: String,
    pub recipient: String,
    pub recipient_email: Option<String>,
    pub subject: String,
}

/// Input for drafting a formal letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub recipient: String,
    pub recipient_org: Option<String>,
    pub subject: String,
    /// Bullet points the service expands into the letter body.
    pub content_points: Vec<String>,
    pub template: Option<String>,
}

/// Input for sending a drafted (or ad-hoc) letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub document_id: Option<String>,
    pub recipient_email: Option<String>,
}

/// Summary of one correspondence folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    pub id: String,
    pub name: String,
    pub count: u32,
}

/// One stored letter inside a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceEntry {
    pub id: String,
    pub subject: String,
    pub recipient: String,
    pub date: String,
}

/// Listing returned by `read_correspondence`: either the contents of one
/// folder, or the per-folder counts when no folder was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListing {
    pub folders: Vec<FolderSummary>,
    pub documents: Vec<CorrespondenceEntry>,
}

// ─── Document vault ─────────────────────────────────────────────────────────

/// A previously imported document stored in the user's vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Document kind detected at import ("identity", "proof_of_address", …).
    pub kind: Option<String>,
    /// Fields extracted when the document was analyzed.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    pub used: bool,
}

/// Result of running the extraction pipeline over one or more documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub document_name: String,
    pub fields: BTreeMap<String, String>,
    /// Per-field confidence in `0.0..=1.0`.
    #[serde(default)]
    pub confidence: BTreeMap<String, f32>,
}

impl ExtractionReport {
    /// Fields whose confidence reaches `threshold` (fields with no recorded
    /// confidence are treated as certain — they came from the user).
    pub fn confident_fields(&self, threshold: f32) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .filter(|(name, _)| {
                self.confidence
                    .get(name.as_str())
                    .map(|c| *c >= threshold)
                    .unwrap_or(true)
            })
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

// ─── Communication ──────────────────────────────────────────────────────────

/// One message in the portal mailbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMessage {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub date: String,
    pub unread: bool,
}

/// One entry in the call history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEntry {
    pub contact: String,
    pub date: String,
    pub missed: bool,
    pub video: bool,
}

// ─── Citizen services ───────────────────────────────────────────────────────

/// A service request filed by the citizen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub service: String,
    pub status: String,
    pub submitted_at: String,
}

/// Static description of one consular/citizen service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub documents_required: Vec<String>,
}

// ─── Tests ──────────────────────────────────────────────────────────────────
