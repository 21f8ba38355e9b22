//! Session and UI tools: chat panel, voice, presentation mode, UI controls,
//! conversation teardown.

use std::sync::Arc;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;
use crate::session::VoiceProfile;

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("open_chat", handler(open_chat));
    registry.register("close_chat", handler(close_chat));
    registry.register("change_voice", handler(change_voice));
    registry.register("control_ui", handler(control_ui));
    registry.register("start_presentation", handler(start_presentation));
    registry.register("stop_presentation", handler(stop_presentation));
    registry.register("stop_conversation", handler(stop_conversation));
}

pub(crate) async fn open_chat(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    if deps.session.open_chat() {
        deps.emit(UiEvent::ChatOpened);
    }
    Ok(Some(ToolReply::ok("L'assistant est ouvert.")))
}

/// Idempotent: closing an already closed panel succeeds without re-emitting.
pub(crate) async fn close_chat(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    if deps.session.close_chat() {
        deps.emit(UiEvent::ChatClosed);
    }
    Ok(Some(ToolReply::ok("L'assistant est fermé.")))
}

pub(crate) async fn change_voice(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let requested = args.require_str("voice")?;
    let voice = VoiceProfile::parse(requested).ok_or_else(|| {
        HandlerError::invalid(format!(
            "Voix inconnue : {requested}. Les voix disponibles sont alloy, echo et shimmer."
        ))
    })?;

    deps.session.set_voice(voice);
    deps.emit(UiEvent::VoiceChanged {
        voice: voice.as_str().to_string(),
    });
    Ok(Some(
        ToolReply::ok("C'est fait, je change de voix.").with("voice", voice.as_str()),
    ))
}

/// Pure UI action — fire-and-forget, no reply for the transport.
pub(crate) async fn control_ui(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let action = args.require_str("action")?;
    match action.trim().to_lowercase().as_str() {
        "toggle_sidebar" | "sidebar" => deps.emit(UiEvent::SidebarToggle),
        "dark_mode" | "sombre" => deps.emit(UiEvent::ThemeChanged { dark: true }),
        "light_mode" | "clair" => deps.emit(UiEvent::ThemeChanged { dark: false }),
        other => {
            return Err(HandlerError::invalid(format!(
                "Action d'interface inconnue : {other}."
            )))
        }
    }
    Ok(None)
}

pub(crate) async fn start_presentation(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    if deps.session.set_presentation(true) {
        deps.emit(UiEvent::PresentationChanged { active: true });
    }
    Ok(Some(ToolReply::ok("Mode présentation activé.")))
}

pub(crate) async fn stop_presentation(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    if deps.session.set_presentation(false) {
        deps.emit(UiEvent::PresentationChanged { active: false });
    }
    Ok(Some(ToolReply::ok("Mode présentation désactivé.")))
}

/// Tears the transport down. Anything already done stays done — there is no
/// compensating rollback for side effects of earlier tool calls.
pub(crate) async fn stop_conversation(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    tracing::info!("stopping the realtime conversation");
    deps.transport.shutdown().await;
    Ok(None)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
