//! Agora assistant — the voice assistant's tool-dispatch engine.
//!
//! The civic portal embeds a realtime voice model that emits named tool
//! calls. This crate is the layer between that transport and the rest of
//! the application: it interprets each call against live session state,
//! triggers side effects across the portal (navigation, messaging,
//! correspondence, the document vault, the registration form, UI theming),
//! and returns a structured result plus a spoken acknowledgement.
//!
//! Wiring at a glance:
//!
//! ```ignore
//! let deps = Deps { /* collaborators, stores, event bus */ };
//! let dispatcher = ToolDispatcher::new(deps);
//!
//! // once per tool call from the transport:
//! let reply = dispatcher.dispatch(request).await;
//!
//! // when (re)connecting the voice session:
//! let prompt = dispatcher.system_prompt().await;
//! ```
//!
//! The transport must deliver tool calls serially; see
//! [`dispatch::ToolDispatcher`] for how violations are surfaced.

pub mod collaborators;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod forms;
pub mod prompt;
pub mod session;
pub mod telemetry;

// Re-exports for convenience
pub use collaborators::{CollaboratorError, Contact, DocumentRef, Role, UserContext};
pub use config::AssistantConfig;
pub use dispatch::{Deps, ToolCallRequest, ToolDispatcher, ToolReply};
pub use events::{EventBus, UiEvent};
pub use forms::{FormAssistantState, FormKind, FormStore, SharedFormStore};
pub use prompt::{build_system_prompt, resolve_title, PromptContext, TimeOfDay};
pub use session::{KeyValueStore, QuotaGate, SessionStore, VoiceProfile};
