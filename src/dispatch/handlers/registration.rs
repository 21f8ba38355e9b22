//! Registration-form tools — the voice-driven side of the multi-step form.
//!
//! Completion is owned by the form UI: `submit_form` only broadcasts the
//! submission event, it never marks the form complete itself.

use std::sync::Arc;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{handler, HandlerRegistry, HandlerResult};
use crate::dispatch::types::{ToolArgs, ToolReply};
use crate::events::UiEvent;
use crate::forms::{canonicalize_field, FormKind, FormStore, StepDirection, LAST_STEP};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry.register("select_citizen_type", handler(select_citizen_type));
    registry.register("start_registration_flow", handler(start_registration_flow));
    registry.register("fill_form_field", handler(fill_form_field));
    registry.register("navigate_form_step", handler(navigate_form_step));
    registry.register("get_form_status", handler(get_form_status));
    registry.register("submit_form", handler(submit_form));
}

async fn begin_flow(deps: &Deps, form: FormKind) -> Result<ToolReply, HandlerError> {
    deps.forms.reset(form);
    deps.navigator.navigate(form.route()).await?;
    Ok(ToolReply::ok(format!(
        "Très bien, nous commençons l'{}. Première étape sur {LAST_STEP}.",
        form.label()
    ))
    .with("path", form.route()))
}

pub(crate) async fn select_citizen_type(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let requested = args
        .str("citizen_type")
        .or_else(|| args.str("type"))
        .ok_or_else(|| HandlerError::invalid("Paramètre manquant : citizen_type"))?;

    let form = FormKind::parse(requested).ok_or_else(|| {
        HandlerError::invalid(format!(
            "Profil inconnu : {requested}. Les profils sont resident, \
             foreign_resident et organization."
        ))
    })?;

    Ok(Some(begin_flow(&deps, form).await?))
}

pub(crate) async fn start_registration_flow(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let form = args
        .str("citizen_type")
        .and_then(FormKind::parse)
        .unwrap_or(FormKind::Resident);
    Ok(Some(begin_flow(&deps, form).await?))
}

pub(crate) async fn fill_form_field(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let field = args.require_str("field")?;
    let value = args.require_str("value")?;

    let canonical = canonicalize_field(field, value);
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

pub(crate) async fn navigate_form_step(deps: Arc<Deps>, args: ToolArgs) -> HandlerResult {
    let direction = match args.str("direction").map(str::to_lowercase).as_deref() {
        Some("next") | Some("suivant") => StepDirection::Next,
        Some("previous") | Some("precedent") | Some("précédent") => StepDirection::Previous,
        Some(other) => {
            return Err(HandlerError::invalid(format!(
                "Direction inconnue : {other}."
            )))
        }
        None => match args.integer("step") {
            Some(n) => StepDirection::Goto(n.clamp(0, u8::MAX as i64) as u8),
            None => {
                return Err(HandlerError::invalid(
                    "Précisez une direction (next, previous) ou un numéro d'étape.",
                ))
            }
        },
    };

    let mut state = deps.forms.state();
    let step = state.apply(direction);
    deps.forms.set_step(step);

    deps.emit(UiEvent::NavigateStep {
        step,
        direction: direction.as_str().to_string(),
    });

    Ok(Some(
        ToolReply::ok(format!("Nous voici à l'étape {step} sur {LAST_STEP}."))
            .with("step", step as i64),
    ))
}

pub(crate) async fn get_form_status(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let state = deps.forms.state();
    let filled = state.filled_fields();

    let message = if filled.is_empty() {
        format!(
            "Formulaire {}, étape {} sur {LAST_STEP}. Aucun champ rempli pour l'instant.",
            state.form.label(),
            state.step
        )
    } else {
        format!(
            "Formulaire {}, étape {} sur {LAST_STEP}. Champs remplis : {}.",
            state.form.label(),
            state.step,
            filled.join(", ")
        )
    };

    Ok(Some(
        ToolReply::ok(message)
            .with("step", state.step as i64)
            .with_json("filled", &filled)
            .with_json("fields", &state.fields),
    ))
}

/// Broadcast-only: the form UI owns validation and completion.
pub(crate) async fn submit_form(deps: Arc<Deps>, _args: ToolArgs) -> HandlerResult {
    let state = deps.forms.state();
    deps.emit(UiEvent::FormSubmitted {
        form: state.form.label().to_string(),
    });
    Ok(Some(ToolReply::ok(
        "Le formulaire a été transmis pour validation.",
    )))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::fakes::World;
    use crate::forms::FIRST_STEP;
    use serde_json::json;

    fn args(value: serde_json::Value) -> ToolArgs {
        match value {
            serde_json::Value::Object(map) => ToolArgs::new(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[tokio::test]
    async fn test_fill_form_field_canonicalizes_family_name() {
        let world = World::new();
        let reply = fill_form_field(
            world.arc_deps(),
            args(json!({"field": "lastName", "value": "dupont"})),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(reply.payload["value"], "DUPONT");
        assert_eq!(world.forms.state().fields["lastName"], "DUPONT");
    }

    #[tokio::test]
    async fn test_fill_form_field_title_cases_given_name() {
        let world = World::new();
        fill_form_field(
            world.arc_deps(),
            args(json!({"field": "firstName", "value": "jean-pierre"})),
        )
        .await
        .unwrap();
        assert_eq!(world.forms.state().fields["firstName"], "Jean-Pierre");
    }

    #[tokio::test]
    async fn test_next_ten_times_from_last_step_stays_at_last() {
        let world = World::new();
        let deps = world.arc_deps();
        world.forms.set_step(LAST_STEP);

        for _ in 0..10 {
            let reply = navigate_form_step(deps.clone(), args(json!({"direction": "next"})))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(reply.payload["step"], LAST_STEP);
        }
        assert_eq!(world.forms.state().step, LAST_STEP);
    }

    #[tokio::test]
    async fn test_previous_clamps_at_first_step() {
        let world = World::new();
        let deps = world.arc_deps();

        for _ in 0..4 {
            navigate_form_step(deps.clone(), args(json!({"direction": "previous"})))
                .await
                .unwrap();
        }
        assert_eq!(world.forms.state().step, FIRST_STEP);
    }

    #[tokio::test]
    async fn test_goto_step_clamps() {
        let world = World::new();
        let deps = world.arc_deps();

        navigate_form_step(deps.clone(), args(json!({"step": 42})))
            .await
            .unwrap();
        assert_eq!(world.forms.state().step, LAST_STEP);

        navigate_form_step(deps.clone(), args(json!({"step": 3})))
            .await
            .unwrap();
        assert_eq!(world.forms.state().step, 3);
    }

    #[tokio::test]
    async fn test_navigate_without_direction_or_step_fails() {
        let world = World::new();
        let err = navigate_form_step(world.arc_deps(), ToolArgs::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("direction"));
    }

    #[tokio::test]
    async fn test_select_citizen_type_resets_and_navigates() {
        let world = World::new();
        world.forms.set_field("lastName", "DUPONT");
        world.forms.set_step(4);

        let reply = select_citizen_type(
            world.arc_deps(),
            args(json!({"citizen_type": "organization"})),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(reply.success);
        let state = world.forms.state();
        assert_eq!(state.form, FormKind::Organization);
        assert_eq!(state.step, FIRST_STEP);
        assert!(state.fields.is_empty());
        assert_eq!(world.visited(), vec!["/inscription/organisation"]);
    }

    #[tokio::test]
    async fn test_select_citizen_type_unknown_profile() {
        let world = World::new();
        let err = select_citizen_type(
            world.arc_deps(),
            args(json!({"citizen_type": "pirate"})),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("pirate"));
        assert!(world.visited().is_empty());
    }

    #[tokio::test]
    async fn test_start_registration_flow_defaults_to_resident() {
        let world = World::new();
        start_registration_flow(world.arc_deps(), ToolArgs::default())
            .await
            .unwrap();
        assert_eq!(world.forms.state().form, FormKind::Resident);
        assert_eq!(world.visited(), vec!["/inscription/resident"]);
    }

    #[tokio::test]
    async fn test_get_form_status_reports_filled_fields() {
        let world = World::new();
        world.forms.set_field("lastName", "DUPONT");
        world.forms.set_step(2);

        let reply = get_form_status(world.arc_deps(), ToolArgs::default())
            .await
            .unwrap()
            .unwrap();
        assert!(reply.message.contains("étape 2"));
        assert!(reply.message.contains("lastName"));
        assert_eq!(reply.payload["fields"]["lastName"], "DUPONT");
    }

    #[tokio::test]
    async fn test_submit_form_only_broadcasts() {
        let world = World::new();
        world.forms.set_step(4);

        let reply = submit_form(world.arc_deps(), ToolArgs::default())
            .await
            .unwrap()
            .unwrap();
        assert!(reply.success);

        // The event went out, but the form state is untouched — completion
        // belongs to the form UI.
        assert!(world
            .drain_events()
            .iter()
            .any(|e| matches!(e, UiEvent::FormSubmitted { .. })));
        assert_eq!(world.forms.state().step, 4);
    }

    #[tokio::test]
    async fn test_step_events_carry_direction() {
        let world = World::new();
        navigate_form_step(world.arc_deps(), args(json!({"direction": "next"})))
            .await
            .unwrap();
        assert!(world.drain_events().iter().any(|e| matches!(
            e,
            UiEvent::NavigateStep { step: 2, direction } if direction == "next"
        )));
    }
}
