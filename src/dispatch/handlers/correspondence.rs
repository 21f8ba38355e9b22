//! Correspondence tools — the formal-letter workflow.
//!
//! Lifecycle: Idle → Drafted → {Sent | Filed} → Idle, tracked by the
//! session's pending document. Sending or filing requires a draft (or, for
//! sending, an explicit recipient address); both clear the pending
//! reference on success.

use std::sync::Arc;

use crate::collaborators::types::{DraftRequest, SendRequest};
use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("create_correspondence", handler(create_correspondence));
    registry.register("send_correspondence", handler(send_correspondence));
    registry.register("file_correspondence", handler(file_correspondence));
    registry.register("read_correspondence", handler(read_correspondence));
}

pub(crate) async fn create_correspondence(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let recipient = args.require_str("recipient")?;
    let subject = args.require_str("subject")?;

    let request = DraftRequest {
        recipient: recipient.to_string(),
        recipient_org: args.str("recipient_org").map(str::to_string),
        subject: subject.to_string(),
        content_points: args.list("content_points"),
        template: args.str("template").map(str::to_string),
    };

    let document = deps.correspondence.draft(request).await?;
    tracing::info!(document_id = %document.id, recipient, "correspondence drafted");

    deps.session.set_pending_document(document.clone());

    // Show the draft in the conversational panel.
    if deps.session.open_chat() {
        deps.emit(UiEvent::ChatOpened);
    }
    deps.emit(UiEvent::DocumentCreated {
        document_id: document.id.clone(),
        file_name: document.name.clone(),
        local_url: document.url.clone(),
        recipient: document.recipient.clone(),
        subject: document.subject.clone(),
    });

    Ok(Some(
        ToolReply::ok(format!("Le courrier pour {recipient} est prêt, le voici."))
            .with("documentId", document.id)
            .with("fileName", document.name),
    ))
}

pub(crate) async fn send_correspondence(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let explicit_email = args.str("recipient_email");
    let pending = deps.session.pending_document();

    if pending.is_none() && explicit_email.is_none() {
        return Err(HandlerError::invalid(
            "Aucun courrier en attente et aucune adresse fournie. Créez d'abord un \
             courrier ou précisez une adresse e-mail.",
        ));
    }

    let request = SendRequest {
        document_id: pending.as_ref().map(|d| d.id.clone()),
        recipient_email: explicit_email
            .map(str::to_string)
            .or_else(|| pending.as_ref().and_then(|d| d.recipient_email.clone())),
    };

    deps.correspondence.send(request).await?;

    if let Some(document) = deps.session.take_pending_document() {
        tracing::info!(document_id = %document.id, "correspondence sent");
    }

    Ok(Some(ToolReply::ok("Le courrier a été envoyé.")))
}

pub(crate) async fn file_correspondence(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let pending = deps.session.pending_document();
    let document_id = args
        .str("document_id")
        .map(str::to_string)
        .or_else(|| pending.as_ref().map(|d| d.id.clone()))
        .ok_or_else(|| {
            HandlerError::invalid(
                "Aucun courrier à classer. Créez d'abord un courrier ou indiquez son \
                 identifiant.",
            )
        })?;

    let folder = args.str("folder");
    deps.correspondence.file(&document_id, folder).await?;

    let file_name = pending
        .as_ref()
        .filter(|d| d.id == document_id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| format!("{document_id}.pdf"));

    // Local save/download side effect, handled by the document panel.
    deps.emit(UiEvent::DocumentFiled {
        document_id: document_id.clone(),
        file_name,
    });

    if pending.map(|d| d.id == document_id).unwrap_or(false) {
        deps.session.take_pending_document();
    }

    Ok(Some(
        ToolReply::ok("Le courrier a été classé et téléchargé.").with("documentId", document_id),
    ))
}

pub(crate) async fn read_correspondence(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let folder_id = args.str("folder_id");
    let listing = deps.correspondence.list_folder(folder_id).await?;

    let message = match folder_id {
        Some(folder) => format!(
            "Le dossier « {folder} » contient {} courrier(s).",
            listing.documents.len()
        ),
        None => {
            if listing.folders.is_empty() {
                "Vous n'avez encore aucun courrier classé.".to_string()
            } else {
                let parts: Vec<String> = listing
                    .folders
                    .iter()
                    .map(|f| format!("{} : {}", f.name, f.count))
                    .collect();
                format!("Vos dossiers de courrier — {}.", parts.join(", "))
            }
        }
    };

    Ok(Some(
        ToolReply::ok(message)
            .with_json("folders", &listing.folders)
            .with_json("documents", &listing.documents),
    ))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
