//! Per-area handler groups.
//!
//! Each module registers its tools into the shared registry:
//! - `session_ui`: chat panel, voice, presentation mode, UI controls
//! - `navigation`: free-text and in-space navigation
//! - `communication`: mailbox, messages, calls, meetings
//! - `correspondence`: the formal-letter draft/send/file workflow
//! - `contacts`: directory search and call/mail handoffs
//! - `documents`: vault and extraction pipeline
//! - `registration`: the multi-step registration form
//! - `guidance`: guides and context explanations
//! - `services`: consular/citizen services desk
//! - `identity`: login, logout, anonymous question quota

pub(crate) mod communication;
pub(crate) mod contacts;
pub(crate) mod correspondence;
pub(crate) mod documents;
pub(crate) mod guidance;
pub(crate) mod identity;
pub(crate) mod navigation;
pub(crate) mod registration;
pub(crate) mod services;
pub(crate) mod session_ui;

use crate::dispatch::registry::HandlerRegistry;

/// Assemble the full built-in tool surface.
pub(crate) fn build_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    session_ui::register(&mut registry);
    navigation::register(&mut registry);
    communication::register(&mut registry);
    correspondence::register(&mut registry);
    contacts::register(&mut registry);
    documents::register(&mut registry);
    registration::register(&mut registry);
    guidance::register(&mut registry);
    services::register(&mut registry);
    identity::register(&mut registry);

    tracing::debug!(tools = registry.len(), "handler registry assembled");
    registry
}
