//! Test fakes for every collaborator seam, plus the [`World`] fixture that
//! wires them into a `Deps` for handler tests. Test-only.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::collaborators::errors::CollaboratorError;
use crate::collaborators::types::{
    CallEntry, Contact, CorrespondenceEntry, DocumentRef, DraftRequest, ExtractionReport,
    FolderListing, FolderSummary, MailMessage, ResolvedRoute, Role, SavedDocument, SendRequest,
    ServiceInfo, ServiceRequest, UserContext,
};
use crate::collaborators::{
    CitizenServices, ContactDirectory, CorrespondenceService, DocumentVault, MessagingService,
    Navigator, Notifier, RouteResolver, TransportControl, UserContextProvider,
};
use crate::dispatch::dispatcher::Deps;
use crate::events::{EventBus, UiEvent};
use crate::forms::{FormKind, SharedFormStore};
use crate::session::{MemoryStore, QuotaGate, SessionStore, VoiceProfile, DEFAULT_QUESTION_BUDGET};

// ─── Route resolver ─────────────────────────────────────────────────────────

pub(crate) struct FakeRoutes {
    routes: Mutex<HashMap<String, ResolvedRoute>>,
    sections: Mutex<HashMap<String, ResolvedRoute>>,
}

impl FakeRoutes {
    fn with_defaults() -> Self {
        let mut routes = HashMap::new();
        for (query, path, label) in [
            ("courrier", "/depute/courrier", "Courrier"),
            ("annuaire", "/annuaire", "Annuaire"),
            ("documents", "/documents", "Mes documents"),
            ("accueil", "/", "Accueil"),
            ("connexion", "/connexion", "Connexion"),
        ] {
            routes.insert(
                query.to_string(),
                ResolvedRoute {
                    path: path.to_string(),
                    label: label.to_string(),
                },
            );
        }
        let mut sections = HashMap::new();
        sections.insert(
            "courrier".to_string(),
            ResolvedRoute {
                path: "/depute/courrier".to_string(),
                label: "Courrier".to_string(),
            },
        );
        Self {
            routes: Mutex::new(routes),
            sections: Mutex::new(sections),
        }
    }
}

#[async_trait]
impl RouteResolver for FakeRoutes {
    async fn resolve(&self, query: &str) -> Result<Option<ResolvedRoute>, CollaboratorError> {
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(&query.trim().to_lowercase())
            .cloned())
    }

    async fn resolve_section(
        &self,
        _role: Role,
        section: &str,
    ) -> Result<Option<ResolvedRoute>, CollaboratorError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .get(&section.trim().to_lowercase())
            .cloned())
    }
}

// ─── Navigator ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, path: &str) -> Result<(), CollaboratorError> {
        self.visited.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

// ─── Contacts ───────────────────────────────────────────────────────────────

pub(crate) struct FakeContacts {
    contacts: Vec<Contact>,
    pub(crate) fail: AtomicBool,
}

impl FakeContacts {
    fn with_defaults() -> Self {
        Self {
            contacts: vec![
                Contact {
                    id: "c-1".to_string(),
                    name: "Marie Lefèvre".to_string(),
                    email: Some("marie.lefevre@agora.fr".to_string()),
                    phone: Some("+33 1 40 63 60 00".to_string()),
                    organization: Some("Assemblée".to_string()),
                    position: Some("Cheffe de service".to_string()),
                    department: Some("Affaires sociales".to_string()),
                },
                Contact {
                    id: "c-2".to_string(),
                    name: "Paul Morel".to_string(),
                    email: None,
                    phone: Some("+33 1 40 63 61 11".to_string()),
                    organization: None,
                    position: None,
                    department: None,
                },
            ],
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ContactDirectory for FakeContacts {
    async fn search(&self, query: &str) -> Result<Vec<Contact>, CollaboratorError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(CollaboratorError::unavailable("annuaire", "timeout"));
        }
        let needle = query.trim().to_lowercase();
        Ok(self
            .contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

// ─── Vault ──────────────────────────────────────────────────────────────────

pub(crate) struct FakeVault {
    pub(crate) documents: Mutex<Vec<SavedDocument>>,
    pub(crate) report: Mutex<Option<ExtractionReport>>,
    pub(crate) used: Mutex<Vec<String>>,
}

impl FakeVault {
    fn with_defaults() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("lastName".to_string(), "dupont".to_string());
        fields.insert("firstName".to_string(), "jean-pierre".to_string());
        fields.insert("birthDate".to_string(), "1980-01-01".to_string());

        let mut confidence = BTreeMap::new();
        confidence.insert("lastName".to_string(), 0.97);
        confidence.insert("firstName".to_string(), 0.93);
        confidence.insert("birthDate".to_string(), 0.42);

        Self {
            documents: Mutex::new(vec![SavedDocument {
                id: "v-1".to_string(),
                name: "carte_identite.pdf".to_string(),
                url: "blob:v-1".to_string(),
                kind: Some("identity".to_string()),
                fields: fields.clone(),
                used: false,
            }]),
            report: Mutex::new(Some(ExtractionReport {
                document_name: "carte_identite.pdf".to_string(),
                fields,
                confidence,
            })),
            used: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentVault for FakeVault {
    async fn list(&self) -> Result<Vec<SavedDocument>, CollaboratorError> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn find(&self, needle: &str) -> Result<Option<SavedDocument>, CollaboratorError> {
        let needle = needle.trim().to_lowercase();
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == needle || d.name.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn mark_used(&self, id: &str) -> Result<(), CollaboratorError> {
        self.used.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn analyze_dropped(&self) -> Result<ExtractionReport, CollaboratorError> {
        self.report
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CollaboratorError::failed("analyse", "aucun document déposé"))
    }

    async fn analyze_stored(&self) -> Result<ExtractionReport, CollaboratorError> {
        self.report
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CollaboratorError::failed("analyse", "coffre vide"))
    }
}

// ─── Correspondence ─────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct FakeCorrespondence {
    pub(crate) drafted: Mutex<Vec<DraftRequest>>,
    pub(crate) sent: Mutex<Vec<SendRequest>>,
    pub(crate) filed: Mutex<Vec<(String, Option<String>)>>,
    pub(crate) fail: AtomicBool,
    counter: AtomicU64,
}

#[async_trait]
impl CorrespondenceService for FakeCorrespondence {
    async fn draft(&self, request: DraftRequest) -> Result<DocumentRef, CollaboratorError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(CollaboratorError::failed("courrier", "génération impossible"));
        }
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let doc = DocumentRef {
            id: format!("doc-{n}"),
            name: format!("courrier_{n}.pdf"),
            url: format!("blob:doc-{n}"),
            recipient: request.recipient.clone(),
            recipient_email: None,
            subject: request.subject.clone(),
        };
        self.drafted.lock().unwrap().push(request);
        Ok(doc)
    }

    async fn send(&self, request: SendRequest) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(CollaboratorError::failed("courrier", "envoi impossible"));
        }
        self.sent.lock().unwrap().push(request);
        Ok(())
    }

    async fn file(
        &self,
        document_id: &str,
        folder: Option<&str>,
    ) -> Result<(), CollaboratorError> {
        self.filed
            .lock()
            .unwrap()
            .push((document_id.to_string(), folder.map(str::to_string)));
        Ok(())
    }

    async fn list_folder(
        &self,
        folder_id: Option<&str>,
    ) -> Result<FolderListing, CollaboratorError> {
        match folder_id {
            Some(id) => Ok(FolderListing {
                folders: Vec::new(),
                documents: vec![CorrespondenceEntry {
                    id: "e-1".to_string(),
                    subject: "Demande de subvention".to_string(),
                    recipient: "Préfecture".to_string(),
                    date: "2025-11-02".to_string(),
                }],
            }),
            None => Ok(FolderListing {
                folders: vec![
                    FolderSummary {
                        id: "envoyes".to_string(),
                        name: "Envoyés".to_string(),
                        count: 4,
                    },
                    FolderSummary {
                        id: "classes".to_string(),
                        name: "Classés".to_string(),
                        count: 2,
                    },
                ],
                documents: Vec::new(),
            }),
        }
    }
}

// ─── Messaging ──────────────────────────────────────────────────────────────

pub(crate) struct FakeMessaging {
    mail: Vec<MailMessage>,
    pub(crate) sent_messages: Mutex<Vec<(String, String)>>,
}

impl FakeMessaging {
    fn with_defaults() -> Self {
        Self {
            mail: vec![
                MailMessage {
                    id: "m-1".to_string(),
                    from: "cabinet@agora.fr".to_string(),
                    subject: "Ordre du jour".to_string(),
                    date: "2025-11-03".to_string(),
                    unread: true,
                },
                MailMessage {
                    id: "m-2".to_string(),
                    from: "marie.lefevre@agora.fr".to_string(),
                    subject: "Compte rendu de commission".to_string(),
                    date: "2025-11-01".to_string(),
                    unread: false,
                },
            ],
            sent_messages: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MessagingService for FakeMessaging {
    async fn send_message(
        &self,
        recipient: &str,
        content: &str,
    ) -> Result<(), CollaboratorError> {
        self.sent_messages
            .lock()
            .unwrap()
            .push((recipient.to_string(), content.to_string()));
        Ok(())
    }

    async fn list_mail(
        &self,
        _folder: Option<&str>,
    ) -> Result<Vec<MailMessage>, CollaboratorError> {
        Ok(self.mail.clone())
    }

    async fn unread_count(&self) -> Result<u32, CollaboratorError> {
        Ok(self.mail.iter().filter(|m| m.unread).count() as u32)
    }

    async fn call_history(&self) -> Result<Vec<CallEntry>, CollaboratorError> {
        Ok(vec![CallEntry {
            contact: "Paul Morel".to_string(),
            date: "2025-11-02".to_string(),
            missed: true,
            video: false,
        }])
    }

    async fn search(&self, query: &str) -> Result<Vec<MailMessage>, CollaboratorError> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .mail
            .iter()
            .filter(|m| m.subject.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn manage_meeting(
        &self,
        action: &str,
        title: Option<&str>,
        time: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        Ok(format!(
            "meeting {action}: {} at {}",
            title.unwrap_or("(sans titre)"),
            time.unwrap_or("(heure non précisée)")
        ))
    }

    async fn manage_chat(
        &self,
        action: &str,
        conversation: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        Ok(format!("chat {action}: {}", conversation.unwrap_or("courante")))
    }
}

// ─── Citizen services ───────────────────────────────────────────────────────

pub(crate) struct FakeServices {
    pub(crate) requests: Mutex<Vec<ServiceRequest>>,
    infos: HashMap<String, ServiceInfo>,
}

impl FakeServices {
    fn with_defaults() -> Self {
        let mut infos = HashMap::new();
        infos.insert(
            "acte de naissance".to_string(),
            ServiceInfo {
                name: "Acte de naissance".to_string(),
                description: "Délivrance d'une copie intégrale d'acte de naissance.".to_string(),
                documents_required: vec!["pièce d'identité".to_string()],
            },
        );
        Self {
            requests: Mutex::new(Vec::new()),
            infos,
        }
    }
}

#[async_trait]
impl CitizenServices for FakeServices {
    async fn request_service(
        &self,
        service: &str,
        _details: Option<&str>,
    ) -> Result<ServiceRequest, CollaboratorError> {
        let request = ServiceRequest {
            id: format!("req-{}", self.requests.lock().unwrap().len() + 1),
            service: service.to_string(),
            status: "soumise".to_string(),
            submitted_at: "2025-11-03T10:00:00Z".to_string(),
        };
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn schedule_appointment(
        &self,
        service: &str,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        Ok(format!(
            "rendez-vous {service} le {} à {}",
            date.unwrap_or("(date libre)"),
            time.unwrap_or("(heure libre)")
        ))
    }

    async fn list_requests(&self) -> Result<Vec<ServiceRequest>, CollaboratorError> {
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn service_info(
        &self,
        service: &str,
    ) -> Result<Option<ServiceInfo>, CollaboratorError> {
        Ok(self.infos.get(&service.trim().to_lowercase()).cloned())
    }
}

// ─── Identity / notifier / transport ────────────────────────────────────────

pub(crate) struct FixedUser {
    current: Mutex<UserContext>,
}

#[async_trait]
impl UserContextProvider for FixedUser {
    async fn current(&self) -> UserContext {
        self.current.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) infos: Mutex<Vec<String>>,
    pub(crate) warnings: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    pub(crate) closed: AtomicBool,
}

#[async_trait]
impl TransportControl for FakeTransport {
    async fn shutdown(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }
}

// ─── World fixture ──────────────────────────────────────────────────────────

/// One fully wired fake environment per test.
pub(crate) struct World {
    pub(crate) kv: Arc<MemoryStore>,
    pub(crate) forms: Arc<SharedFormStore>,
    pub(crate) routes: Arc<FakeRoutes>,
    pub(crate) navigator: Arc<RecordingNavigator>,
    pub(crate) contacts: Arc<FakeContacts>,
    pub(crate) vault: Arc<FakeVault>,
    pub(crate) correspondence: Arc<FakeCorrespondence>,
    pub(crate) messaging: Arc<FakeMessaging>,
    pub(crate) services: Arc<FakeServices>,
    pub(crate) identity: Arc<FixedUser>,
    pub(crate) notifier: Arc<RecordingNotifier>,
    pub(crate) transport: Arc<FakeTransport>,
    pub(crate) events: EventBus,
    events_rx: Mutex<tokio::sync::broadcast::Receiver<UiEvent>>,
}

impl World {
    pub(crate) fn new() -> Self {
        let events = EventBus::new();
        let events_rx = Mutex::new(events.subscribe());
        Self {
            kv: Arc::new(MemoryStore::new()),
            forms: Arc::new(SharedFormStore::new(FormKind::Resident)),
            routes: Arc::new(FakeRoutes::with_defaults()),
            navigator: Arc::new(RecordingNavigator::default()),
            contacts: Arc::new(FakeContacts::with_defaults()),
            vault: Arc::new(FakeVault::with_defaults()),
            correspondence: Arc::new(FakeCorrespondence::default()),
            messaging: Arc::new(FakeMessaging::with_defaults()),
            services: Arc::new(FakeServices::with_defaults()),
            identity: Arc::new(FixedUser {
                current: Mutex::new(UserContext {
                    role: Role::Deputy,
                    first_name: Some("Claire".to_string()),
                    current_path: "/depute".to_string(),
                }),
            }),
            notifier: Arc::new(RecordingNotifier::default()),
            transport: Arc::new(FakeTransport::default()),
            events,
            events_rx,
        }
    }

    /// Build a `Deps` over this world's fakes. Session state and quota are
    /// created fresh over the shared KV store.
    pub(crate) fn deps(&self) -> Deps {
        Deps {
            session: SessionStore::new(self.kv.clone(), VoiceProfile::Alloy),
            quota: QuotaGate::new(self.kv.clone(), DEFAULT_QUESTION_BUDGET),
            forms: self.forms.clone(),
            routes: self.routes.clone(),
            navigator: self.navigator.clone(),
            contacts: self.contacts.clone(),
            vault: self.vault.clone(),
            correspondence: self.correspondence.clone(),
            messaging: self.messaging.clone(),
            services: self.services.clone(),
            identity: self.identity.clone(),
            notifier: self.notifier.clone(),
            transport: self.transport.clone(),
            events: self.events.clone(),
        }
    }

    /// Same as [`World::deps`], wrapped for direct handler invocation.
    pub(crate) fn arc_deps(&self) -> Arc<Deps> {
        Arc::new(self.deps())
    }

    pub(crate) fn set_user(&self, role: Role, first_name: Option<&str>, path: &str) {
        *self.identity.current.lock().unwrap() = UserContext {
            role,
            first_name: first_name.map(str::to_string),
            current_path: path.to_string(),
        };
    }

    /// Drain every UI event emitted so far.
    pub(crate) fn drain_events(&self) -> Vec<UiEvent> {
        let mut rx = self.events_rx.lock().unwrap();
        let mut drained = Vec::new();
        while let Ok(event) = rx.try_recv() {
            drained.push(event);
        }
        drained
    }

    pub(crate) fn visited(&self) -> Vec<String> {
        self.navigator.visited()
    }
}
