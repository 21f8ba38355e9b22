//! Guidance tools — interactive guides and "where am I" explanations.

use std::sync::Arc;

use crate::collaborators::types::Role;
use crate::dispatch::dispatcher::Deps;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("start_guide", handler(start_guide));
    registry.register("explain_context", handler(explain_context));
}

pub(crate) async fn start_guide(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let topic = args.str("topic").unwrap_or("general");
    deps.emit(UiEvent::GuideStarted {
        topic: topic.to_string(),
    });
    Ok(Some(ToolReply::ok(
        "Je lance le guide, suivez les encadrés à l'écran.",
    )))
}

/// Spoken description of where the user currently is in the portal.
pub(crate) async fn explain_context(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let user = deps.identity.current().await;
    let place = describe_path(&user.current_path);

    let message = match user.role {
        Role::Unknown => format!(
            "Vous êtes sur {place}. Connectez-vous pour accéder à votre espace personnel."
        ),
        _ => format!(
            "Vous êtes sur {place}. Dites-moi ce que vous souhaitez faire, je peux \
             naviguer, chercher un contact ou préparer un courrier."
        ),
    };

    Ok(Some(ToolReply::ok(message).with("path", user.current_path)))
}

/// Human label for a portal route.
fn describe_path(path: &str) -> String {
    match path {
        "/" | "" | "/accueil" => "la page d'accueil du portail".to_string(),
        p if p.starts_with("/inscription") => "le formulaire d'inscription".to_string(),
        "/annuaire" => "l'annuaire".to_string(),
        "/documents" => "votre coffre de documents".to_string(),
        "/connexion" => "la page de connexion".to_string(),
        p if p.starts_with("/depute") => "votre espace député".to_string(),
        p if p.starts_with("/president") => "l'espace présidence".to_string(),
        p if p.starts_with("/admin") => "l'espace d'administration".to_string(),
        p => format!("la page {p}"),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
