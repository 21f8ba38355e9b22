//! Citizen-services tools: consular requests, appointments, service info.

use std::sync::Arc;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("request_consular_service", handler(request_consular_service));
    registry.register("schedule_appointment", handler(schedule_appointment));
    registry.register("view_requests", handler(view_requests));
    registry.register("get_service_info", handler(get_service_info));
}

pub(crate) async fn request_consular_service(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let service = args.require_str("service")?;
    let request = deps
        .services
        .request_service(service, args.str("details"))
        .await?;

    tracing::info!(request_id = %request.id, service, "service request filed");
    Ok(Some(
        ToolReply::ok(format!(
            "Votre demande « {service} » a été soumise, référence {}.",
            request.id
        ))
        .with("requestId", request.id),
    ))
}

pub(crate) async fn schedule_appointment(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let service = args.require_str("service")?;
    let confirmation = deps
        .services
        .schedule_appointment(service, args.str("date"), args.str("time"))
        .await?;
    Ok(Some(ToolReply::ok(format!("C'est noté : {confirmation}."))))
}

pub(crate) async fn view_requests(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let requests = deps.services.list_requests().await?;

    let message = if requests.is_empty() {
        "Vous n'avez aucune demande en cours.".to_string()
    } else {
        format!("Vous avez {} demande(s) en cours.", requests.len())
    };
    Ok(Some(ToolReply::ok(message).with_json("requests", &requests)))
}

pub(crate) async fn get_service_info(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let service = args.require_str("service")?;
    let info = deps.services.service_info(service).await?.ok_or_else(|| {
        HandlerError::not_found(format!("Je ne connais pas le service « {service} »."))
    })?;

    let message = if info.documents_required.is_empty() {
        info.description.clone()
    } else {
        format!(
            "{} Pièces à fournir : {}.",
            info.description,
            info.documents_required.join(", ")
        )
    };
    Ok(Some(ToolReply::ok(message).with_json("service", &info)))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
