//! Document vault and extraction tools.
//!
//! The vault stores previously imported documents; the extraction pipeline
//! turns them into form fields. Replayed fields go through the same
//! canonicalization as direct input and are mirrored to the UI as
//! `fill-field` events.

use std::sync::Arc;

use crate::collaborators::types::ExtractionReport;
use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;
use crate::forms::{canonicalize_field, FormKind, FormStore};

/// Vault route in the portal.
const VAULT_ROUTE: &str = "/documents";

/// Extracted fields below this confidence are not replayed automatically —
/// the user confirms them one by one via `confirm_extracted_field`.
const REPLAY_CONFIDENCE: f32 = 0.8;

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("import_document", handler(import_document));
    registry.register("open_document_vault", handler(open_document_vault));
    registry.register("list_saved_documents", handler(list_saved_documents));
    registry.register("use_saved_document", handler(use_saved_document));
    registry.register("analyze_dropped_documents", handler(analyze_dropped_documents));
    registry.register("analyze_user_documents", handler(analyze_user_documents));
    registry.register("start_assisted_registration", handler(start_assisted_registration));
    registry.register("confirm_extracted_field", handler(confirm_extracted_field));
    registry.register("get_extraction_summary", handler(get_extraction_summary));
}

pub(crate) async fn import_document(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    deps.emit(UiEvent::VaultOpened { import: true });
    Ok(Some(ToolReply::ok(
        "Vous pouvez déposer votre document, je m'occupe du reste.",
    )))
}

pub(crate) async fn open_document_vault(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    deps.navigator.navigate(VAULT_ROUTE).await?;
    deps.emit(UiEvent::VaultOpened { import: false });
    Ok(Some(
        ToolReply::ok("Voici vos documents enregistrés.").with("path", VAULT_ROUTE),
    ))
}

pub(crate) async fn list_saved_documents(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let documents = deps.vault.list().await?;

    let message = if documents.is_empty() {
        "Votre coffre de documents est vide.".to_string()
    } else {
        let names: Vec<&str> = documents.iter().map(|d| d.name.as_str()).collect();
        format!(
            "Vous avez {} document(s) : {}.",
            documents.len(),
            names.join(", ")
        )
    };

    Ok(Some(ToolReply::ok(message).with_json("documents", &documents)))
}

pub(crate) async fn use_saved_document(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let needle = args
        .str("document_id")
        .or_else(|| args.str("name"))
        .ok_or_else(|| HandlerError::invalid("Paramètre manquant : document_id"))?;

    let document = deps.vault.find(needle).await?.ok_or_else(|| {
        HandlerError::not_found(format!(
            "Je ne trouve pas « {needle} » dans votre coffre de documents."
        ))
    })?;

    deps.vault.mark_used(&document.id).await?;

    let mut replayed = 0usize;
    for (field, value) in &document.fields {
        let canonical = canonicalize_field(field, value);
        deps.forms.set_field(field, &canonical);
        deps.emit(UiEvent::FillField {
            field: field.clone(),
            value: canonical,
        });
        replayed += 1;
    }

    Ok(Some(
        ToolReply::ok(format!(
            "J'ai repris les informations de {} ({replayed} champ(s) rempli(s)).",
            document.name
        ))
        .with("documentId", document.id),
    ))
}

pub(crate) async fn analyze_dropped_documents(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let report = deps.vault.analyze_dropped().await?;
    Ok(Some(store_report(&deps, report)))
}

pub(crate) async fn analyze_user_documents(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let report = deps.vault.analyze_stored().await?;
    Ok(Some(store_report(&deps, report)))
}

fn store_report(deps: &Deps, report: ExtractionReport) -> ToolReply {
    let reply = ToolReply::ok(format!(
        "J'ai analysé {} et extrait {} champ(s).",
        report.document_name,
        report.fields.len()
    ))
    .with_json("fields", &report.fields);

    tracing::info!(
        document = %report.document_name,
        fields = report.fields.len(),
        "extraction report stored for this session"
    );
    deps.session.set_extraction(report);
    reply
}

pub(crate) async fn get_extraction_summary(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let report = deps.session.extraction().ok_or_else(|| {
        HandlerError::invalid("Aucune analyse de document disponible pour le moment.")
    })?;

    let names: Vec<&str> = report.fields.keys().map(String::as_str).collect();
    Ok(Some(
        ToolReply::ok(format!(
            "L'analyse de {} a extrait : {}.",
            report.document_name,
            names.join(", ")
        ))
        .with_json("fields", &report.fields)
        .with_json("confidence", &report.confidence),
    ))
}

/// Same store write as `fill_form_field`, but sourced from the extraction
/// report instead of direct user input.
pub(crate) async fn confirm_extracted_field(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let field = args.require_str("field")?;

    let value = match args.str("value") {
        Some(v) => v.to_string(),
        None => deps
            .session
            .extraction()
            .and_then(|r| r.fields.get(field).cloned())
            .ok_or_else(|| {
                HandlerError::invalid(format!("Aucune valeur extraite pour « {field} »."))
            })?,
    };

    let canonical = canonicalize_field(field, &value);
    deps.forms.set_field(field, &canonical);
    deps.emit(UiEvent::FillField {
        field: field.to_string(),
        value: canonical.clone(),
    });

    Ok(Some(
        ToolReply::ok(format!("C'est noté : {field} = {canonical}."))
            .with("field", field)
            .with("value", canonical),
    ))
}

pub(crate) async fn start_assisted_registration(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let form = args
        .str("citizen_type")
        .and_then(FormKind::parse)
        .unwrap_or(FormKind::Resident);

    deps.forms.reset(form);
    deps.navigator.navigate(form.route()).await?;

    let mut prefilled = 0usize;
    if let Some(report) = deps.session.extraction() {
        for (field, value) in report.confident_fields(REPLAY_CONFIDENCE) {
            let canonical = canonicalize_field(field, value);
            deps.forms.set_field(field, &canonical);
            deps.emit(UiEvent::FillField {
                field: field.to_string(),
                value: canonical,
            });
            prefilled += 1;
        }
    }

    let message = if prefilled > 0 {
        format!(
            "L'inscription assistée démarre, j'ai déjà rempli {prefilled} champ(s) \
             grâce à vos documents."
        )
    } else {
        "L'inscription assistée démarre. Déposez une pièce d'identité pour que je \
         remplisse le formulaire à votre place."
            .to_string()
    };

    Ok(Some(
        ToolReply::ok(message)
            .with("path", form.route())
            .with("prefilled", prefilled as i64),
    ))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
