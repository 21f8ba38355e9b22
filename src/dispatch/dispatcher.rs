//! ToolDispatcher — single entry point for tool calls from the transport.
//!
//! One call per model decision: resolve exactly one handler, run it with
//! the injected dependencies, and hand back `{success, message, …}` (or
//! nothing for fire-and-forget UI actions). Unrecognized names go to an
//! externally supplied fallback so embedding surfaces can extend the tool
//! surface without touching this crate.
//!
//! Serial delivery is a precondition owed by the transport. The dispatcher
//! does not queue or lock around it — it only surfaces violations: an
//! overlapping call is logged with both tool names and allowed through.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::collaborators::{
    CitizenServices, ContactDirectory, CorrespondenceService, DocumentVault, MessagingService,
    Navigator, Notifier, RouteResolver, TransportControl, UserContextProvider,
};
use crate::dispatch::handlers;
use crate::dispatch::registry::HandlerRegistry;
use crate::dispatch::types::{ToolArgs, ToolCallRequest, ToolReply};
use crate::events::{EventBus, UiEvent};
use crate::forms::FormStore;
use crate::prompt::{build_system_prompt, FormProgress, PromptContext, TimeOfDay};
use crate::session::{QuotaGate, SessionStore};

/// Everything a handler may touch, injected at construction.
///
/// Handlers never close over ambient component state: UI side effects go
/// through [`EventBus`], navigation through [`Navigator`], and all remote
/// work through the collaborator traits.
pub struct Deps {
    pub session: SessionStore,
    pub quota: QuotaGate,
    pub forms: Arc<dyn FormStore>,
    pub routes: Arc<dyn RouteResolver>,
    pub navigator: Arc<dyn Navigator>,
    pub contacts: Arc<dyn ContactDirectory>,
    pub vault: Arc<dyn DocumentVault>,
    pub correspondence: Arc<dyn CorrespondenceService>,
    pub messaging: Arc<dyn MessagingService>,
    pub services: Arc<dyn CitizenServices>,
    pub identity: Arc<dyn UserContextProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub transport: Arc<dyn TransportControl>,
    pub events: EventBus,
}

impl Deps {
    /// Emit a UI event (best-effort, see [`EventBus`]).
    pub fn emit(&self, event: UiEvent) {
        self.events.emit(event);
    }
}

/// Hook run for tool names this crate does not recognize.
pub type Fallback =
    Box<dyn Fn(ToolCallRequest) -> BoxFuture<'static, Option<ToolReply>> + Send + Sync>;

/// The dispatch core.
pub struct ToolDispatcher {
    deps: Arc<Deps>,
    registry: HandlerRegistry,
    fallback: Option<Fallback>,
    /// Dispatch counter, also used to tag log lines.
    sequence: AtomicU64,
    unknown_tools: AtomicU64,
    /// Tool name currently being handled, for precondition-violation logs.
    in_flight: Mutex<Option<String>>,
}

impl ToolDispatcher {
    /// Build a dispatcher with the full built-in tool surface.
    pub fn new(deps: Deps) -> Self {
        Self {
            deps: Arc::new(deps),
            registry: handlers::build_registry(),
            fallback: None,
            sequence: AtomicU64::new(0),
            unknown_tools: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    /// Install the fallback for unrecognized tool names.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Injected dependencies (used by hosts to reach the event bus and
    /// session state).
    pub fn deps(&self) -> &Arc<Deps> {
        &self.deps
    }

    /// All recognized tool names, sorted.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.tool_names()
    }

    /// How many unrecognized tool calls arrived so far.
    pub fn unknown_tool_count(&self) -> u64 {
        self.unknown_tools.load(Ordering::Relaxed)
    }

    /// Handle one tool call. Never returns an error and never panics on
    /// handler failure: every failure becomes a `{success:false, message}`
    /// reply so the conversational turn survives.
    pub async fn dispatch(&self, request: ToolCallRequest) -> Option<ToolReply> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let call_id = uuid::Uuid::new_v4();
        tracing::debug!(seq, %call_id, tool = %request.name, "tool call received");

        {
            let mut in_flight = self.in_flight.lock().expect("dispatch lock");
            if let Some(previous) = in_flight.as_deref() {
                tracing::warn!(
                    seq,
                    previous,
                    current = %request.name,
                    "overlapping tool calls — transport violated serial delivery"
                );
            }
            *in_flight = Some(request.name.clone());
        }

        let reply = self.run(seq, &request).await;

        *self.in_flight.lock().expect("dispatch lock") = None;
        reply
    }

    async fn run(&self, seq: u64, request: &ToolCallRequest) -> Option<ToolReply> {
        let Some(handler) = self.registry.get(&request.name) else {
            self.unknown_tools.fetch_add(1, Ordering::Relaxed);
            tracing::info!(seq, tool = %request.name, "unrecognized tool, trying fallback");
            return match &self.fallback {
                Some(fallback) => fallback(request.clone()).await,
                None => None,
            };
        };

        let args = ToolArgs::new(request.args.clone());

        match handler(self.deps.clone(), args).await {
            Ok(reply) => {
                if let Some(r) = &reply {
                    tracing::debug!(seq, tool = %request.name, success = r.success, "tool call done");
                }
                reply
            }
            Err(e) => {
                tracing::warn!(seq, tool = %request.name, error = %e, "tool call failed");
                Some(e.into_reply())
            }
        }
    }

    /// Assemble the outbound system prompt from the current user context,
    /// local time, and form progress.
    pub async fn system_prompt(&self) -> String {
        self.system_prompt_at(TimeOfDay::now()).await
    }

    /// Prompt assembly with an injected time of day (for tests and replays).
    pub async fn system_prompt_at(&self, time_of_day: TimeOfDay) -> String {
        let user = self.deps.identity.current().await;

        let form_progress = if user.current_path.starts_with("/inscription") {
            let state = self.deps.forms.state();
            Some(FormProgress {
                form: state.form,
                step: state.step,
                filled: state.filled_fields(),
            })
        } else {
            None
        };

        build_system_prompt(&PromptContext {
            role: user.role,
            first_name: user.first_name,
            current_path: user.current_path,
            time_of_day,
            form_progress,
        })
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
