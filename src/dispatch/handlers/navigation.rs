//! Navigation tools — free-text intent to concrete portal routes.
//!
//! A failed resolution performs no navigation at all: the reply is the only
//! side effect. Role-impersonation requests riding on `target_role` are
//! deliberately ignored client-side; role switching is a server-side
//! decision.

use std::sync::Arc;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("global_navigate", handler(global_navigate));
    registry.register("navigate_app", handler(navigate_app));
    registry.register("navigate_within_space", handler(navigate_within_space));
}

pub(crate) async fn global_navigate(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let query = args.require_str("query")?;

    if let Some(target_role) = args.str("target_role") {
        // Accepted but never acted on: any role switch must be authorized
        // and executed server-side.
        tracing::warn!(target_role, "ignoring client-side role impersonation request");
    }

    match deps.routes.resolve(query).await? {
        Some(route) => {
            deps.navigator.navigate(&route.path).await?;
            Ok(Some(
                ToolReply::ok(format!("Je vous emmène vers {}.", route.label))
                    .with("path", route.path),
            ))
        }
        None => Ok(Some(ToolReply::fail(format!(
            "Je n'ai pas trouvé de page correspondant à « {query} »."
        )))),
    }
}

pub(crate) async fn navigate_app(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let page = args.require_str("page")?;

    // The model sometimes hands back a route it saw earlier.
    if page.starts_with('/') {
        deps.navigator.navigate(page).await?;
        return Ok(Some(ToolReply::ok("C'est fait.").with("path", page)));
    }

    match deps.routes.resolve(page).await? {
        Some(route) => {
            deps.navigator.navigate(&route.path).await?;
            Ok(Some(
                ToolReply::ok(format!("Voici la page {}.", route.label)).with("path", route.path),
            ))
        }
        None => Ok(Some(ToolReply::fail(format!(
            "La page « {page} » n'existe pas dans le portail."
        )))),
    }
}

pub(crate) async fn navigate_within_space(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let section = args.require_str("section")?;
    let user = deps.identity.current().await;

    match deps.routes.resolve_section(user.role, section).await? {
        Some(route) => {
            deps.navigator.navigate(&route.path).await?;
            Ok(Some(
                ToolReply::ok(format!("Voici la section {}.", route.label))
                    .with("path", route.path),
            ))
        }
        None => Ok(Some(ToolReply::fail(format!(
            "Votre espace n'a pas de section « {section} »."
        )))),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::fakes::World;
    use serde_json::json;

    fn args(value: serde_json::Value) -> ToolArgs {
        match value {
            serde_json::Value::Object(map) => ToolArgs::new(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[tokio::test]
    async fn test_global_navigate_resolves_and_navigates() {
        let world = World::new();
        let reply = global_navigate(world.arc_deps(), args(json!({"query": "courrier"})))
            .await
            .unwrap()
            .unwrap();

        assert!(reply.success);
        assert_eq!(reply.payload["path"], "/depute/courrier");
        assert_eq!(world.visited(), vec!["/depute/courrier"]);
    }

    #[tokio::test]
    async fn test_global_navigate_no_match_navigates_nowhere() {
        let world = World::new();
        let reply = global_navigate(
            world.arc_deps(),
            args(json!({"query": "xyzzy gibberish"})),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(!reply.success);
        assert!(world.visited().is_empty());
    }

    #[tokio::test]
    async fn test_global_navigate_ignores_target_role_but_still_navigates() {
        let world = World::new();
        let reply = global_navigate(
            world.arc_deps(),
            args(json!({"query": "annuaire", "target_role": "president"})),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(reply.success);
        assert_eq!(world.visited(), vec!["/annuaire"]);
    }

    #[tokio::test]
    async fn test_navigate_app_accepts_direct_path() {
        let world = World::new();
        let reply = navigate_app(world.arc_deps(), args(json!({"page": "/documents"})))
            .await
            .unwrap()
            .unwrap();
        assert!(reply.success);
        assert_eq!(world.visited(), vec!["/documents"]);
    }

    #[tokio::test]
    async fn test_navigate_within_space_uses_role_section() {
        let world = World::new();
        let reply = navigate_within_space(
            world.arc_deps(),
            args(json!({"section": "courrier"})),
        )
        .await
        .unwrap()
        .unwrap();
        assert!(reply.success);
        assert_eq!(world.visited(), vec!["/depute/courrier"]);
    }

    #[tokio::test]
    async fn test_navigate_within_space_unknown_section_fails_cleanly() {
        let world = World::new();
        let reply = navigate_within_space(
            world.arc_deps(),
            args(json!({"section": "cafeteria"})),
        )
        .await
        .unwrap()
        .unwrap();
        assert!(!reply.success);
        assert!(world.visited().is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_is_validation_error() {
        let world = World::new();
        let err = global_navigate(world.arc_deps(), ToolArgs::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("query"));
    }
}
