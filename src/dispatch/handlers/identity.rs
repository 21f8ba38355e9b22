//! Identity tools: login prompts, logout, and the anonymous question quota.

use std::sync::Arc;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;

/// Login route in the portal.
const LOGIN_ROUTE: &str = "/connexion";

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("prompt_login", handler(prompt_login));
    registry.register("logout_user", handler(logout_user));
    registry.register("decrement_questions", handler(decrement_questions));
}

pub(crate) async fn prompt_login(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    deps.emit(UiEvent::LoginPrompted);
    deps.navigator.navigate(LOGIN_ROUTE).await?;
    Ok(Some(
        ToolReply::ok("Je vous amène à la page de connexion.").with("path", LOGIN_ROUTE),
    ))
}

/// The sign-out itself is owned by the host's auth layer; this only
/// signals the request.
pub(crate) async fn logout_user(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    deps.emit(UiEvent::LogoutRequested);
    Ok(Some(ToolReply::ok("Vous allez être déconnecté. À bientôt.")))
}

pub(crate) async fn decrement_questions(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let user = deps.identity.current().await;
    let outcome = deps.quota.decrement(user.role.is_identified());

    if outcome.exhausted_now {
        deps.notifier.warn(
            "Vous avez utilisé vos questions gratuites. Connectez-vous pour continuer.",
        );
        deps.emit(UiEvent::QuotaExhausted);
    }

    let message = if user.role.is_identified() {
        "Vos questions ne sont pas limitées.".to_string()
    } else if outcome.remaining == 0 {
        "Vous avez épuisé vos questions gratuites. Connectez-vous pour continuer.".to_string()
    } else {
        format!("Il vous reste {} question(s).", outcome.remaining)
    };

    Ok(Some(
        ToolReply::ok(message).with("questionsRemaining", outcome.remaining as i64),
    ))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
