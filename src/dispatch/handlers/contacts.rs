//! Contact tools — directory search and the call/mail handoffs built on it.

use std::sync::Arc;

use crate::collaborators::types::Contact;
use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;

/// Directory route in the portal.
const CONTACTS_ROUTE: &str = "/annuaire";

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("search_contact", handler(search_contact));
    registry.register("get_contact_info", handler(get_contact_info));
    registry.register("call_contact", handler(call_contact));
    registry.register("email_contact", handler(email_contact));
    registry.register("open_contacts", handler(open_contacts));
}

/// The name argument, accepting both spellings the model uses.
fn name_arg<'a>(args: &'a ToolArgs) -> Result<&'a str, HandlerError> {
    args.str("name")
        .or_else(|| args.str("query"))
        .ok_or_else(|| HandlerError::invalid("Paramètre manquant : name"))
}

/// Look a person up, failing with a spoken not-found message.
async fn find_contact(deps: &Deps, name: &str) -> Result<Contact, HandlerError> {
    let matches = deps.contacts.search(name).await?;
    matches.into_iter().next().ok_or_else(|| {
        HandlerError::not_found(format!("Aucun contact trouvé pour « {name} »."))
    })
}

pub(crate) async fn search_contact(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let query = name_arg(&args)?;
    let matches = deps.contacts.search(query).await?;

    if matches.is_empty() {
        return Err(HandlerError::not_found(format!(
            "Aucun contact trouvé pour « {query} »."
        )));
    }

    let first = &matches[0];
    let message = if matches.len() == 1 {
        format!("J'ai trouvé {}.", first.name)
    } else {
        format!(
            "J'ai trouvé {} contacts, dont {}.",
            matches.len(),
            first.name
        )
    };

    Ok(Some(ToolReply::ok(message).with_json("contacts", &matches)))
}

pub(crate) async fn get_contact_info(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let name = name_arg(&args)?;
    let contact = find_contact(&deps, name).await?;

    let mut details = Vec::new();
    if let Some(position) = &contact.position {
        details.push(position.clone());
    }
    if let Some(email) = &contact.email {
        details.push(format!("e-mail {email}"));
    }
    if let Some(phone) = &contact.phone {
        details.push(format!("téléphone {phone}"));
    }

    let message = if details.is_empty() {
        format!("{} est dans l'annuaire, sans coordonnées publiées.", contact.name)
    } else {
        format!("{} — {}.", contact.name, details.join(", "))
    };

    Ok(Some(ToolReply::ok(message).with_json("contact", &contact)))
}

pub(crate) async fn call_contact(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let name = name_arg(&args)?;
    let video = args.bool_or("video", false);
    let contact = find_contact(&deps, name).await?;

    deps.emit(UiEvent::StartCall {
        recipient: contact.name.clone(),
        video,
    });
    Ok(Some(ToolReply::ok(format!("J'appelle {}.", contact.name))))
}

pub(crate) async fn email_contact(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let name = name_arg(&args)?;
    let contact = find_contact(&deps, name).await?;

    let email = contact.email.clone().ok_or_else(|| {
        HandlerError::not_found(format!(
            "{} n'a pas d'adresse e-mail dans l'annuaire.",
            contact.name
        ))
    })?;

    deps.emit(UiEvent::ComposeMail {
        recipient: email,
        subject: args.str("subject").unwrap_or_default().to_string(),
        body: args.str("body").unwrap_or_default().to_string(),
        priority: "normal".to_string(),
    });
    Ok(Some(ToolReply::ok(format!(
        "J'ai ouvert un message pour {}.",
        contact.name
    ))))
}

pub(crate) async fn open_contacts(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    deps.navigator.navigate(CONTACTS_ROUTE).await?;
    Ok(Some(
        ToolReply::ok("Voici l'annuaire.").with("path", CONTACTS_ROUTE),
    ))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
