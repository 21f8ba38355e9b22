//! Communication tools: mailbox, direct messages, calls, meetings, chats.
//!
//! Composing mail and starting calls are UI handoffs — the handler emits
//! the pre-filled event and the matching panel takes over. Reads go through
//! the messaging collaborator.

use std::sync::Arc;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("send_mail", handler(send_mail));
    registry.register("send_message", handler(send_message));
    registry.register("read_mail", handler(read_mail));
    registry.register("get_call_history", handler(get_call_history));
    registry.register("get_unread_count", handler(get_unread_count));
    registry.register("search_communications", handler(search_communications));
    registry.register("start_call", handler(start_call));
    registry.register("end_call", handler(end_call));
    registry.register("manage_meeting", handler(manage_meeting));
    registry.register("manage_chat", handler(manage_chat));
}

pub(crate) async fn send_mail(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let recipient = args.require_str("recipient")?;
    let subject = args.str("subject").unwrap_or("(sans objet)");
    let body = args.str("body").unwrap_or_default();
    let priority = args.str("priority").unwrap_or("normal");

    deps.emit(UiEvent::ComposeMail {
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        priority: priority.to_string(),
    });

    Ok(Some(ToolReply::ok(format!(
        "J'ai préparé le message pour {recipient}, il ne reste qu'à l'envoyer."
    ))))
}

pub(crate) async fn send_message(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let recipient = args.require_str("recipient")?;
    let content = args.require_str("content")?;

    deps.messaging.send_message(recipient, content).await?;
    Ok(Some(ToolReply::ok(format!(
        "Votre message à {recipient} est parti."
    ))))
}

pub(crate) async fn read_mail(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let folder = args.str("folder");
    let messages = deps.messaging.list_mail(folder).await?;
    let unread = messages.iter().filter(|m| m.unread).count();

    Ok(Some(
        ToolReply::ok(format!(
            "Vous avez {} message(s), dont {unread} non lu(s).",
            messages.len()
        ))
        .with_json("messages", &messages),
    ))
}

pub(crate) async fn get_call_history(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let history = deps.messaging.call_history().await?;
    let missed = history.iter().filter(|c| c.missed).count();

    Ok(Some(
        ToolReply::ok(format!(
            "{} appel(s) récent(s), dont {missed} manqué(s).",
            history.len()
        ))
        .with_json("calls", &history),
    ))
}

pub(crate) async fn get_unread_count(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let count = deps.messaging.unread_count().await?;
    Ok(Some(
        ToolReply::ok(format!("Vous avez {count} message(s) non lu(s)."))
            .with("unreadCount", count),
    ))
}

pub(crate) async fn search_communications(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let query = args.require_str("query")?;
    let results = deps.messaging.search(query).await?;

    let message = if results.is_empty() {
        format!("Aucun message ne correspond à « {query} ».")
    } else {
        format!("{} message(s) correspondent à « {query} ».", results.len())
    };
    Ok(Some(ToolReply::ok(message).with_json("messages", &results)))
}

pub(crate) async fn start_call(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let recipient = args.require_str("recipient")?;
    let video = args.bool_or("video", false);

    deps.emit(UiEvent::StartCall {
        recipient: recipient.to_string(),
        video,
    });
    Ok(Some(ToolReply::ok(format!("J'appelle {recipient}."))))
}

pub(crate) async fn end_call(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    deps.emit(UiEvent::EndCall);
    Ok(Some(ToolReply::ok("L'appel est terminé.")))
}

pub(crate) async fn manage_meeting(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let action = args.require_str("action")?;
    let outcome = deps
        .messaging
        .manage_meeting(action, args.str("title"), args.str("time"))
        .await?;
    Ok(Some(ToolReply::ok(outcome)))
}

pub(crate) async fn manage_chat(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let action = args.require_str("action")?;
    let outcome = deps
        .messaging
        .manage_chat(action, args.str("conversation"))
        .await?;
    Ok(Some(ToolReply::ok(outcome)))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
