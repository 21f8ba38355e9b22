//! Tool dispatch — the core of the voice assistant.
//!
//! Submodules:
//! - `dispatcher`: ToolDispatcher, injected dependencies, fallback hook
//! - `registry`: name-keyed handler table
//! - `handlers`: per-area handler groups
//! - `types`: wire contract (`ToolCallRequest`, `ToolReply`, `ToolArgs`)
//! - `errors`: `HandlerError` and its conversion to failure replies

pub mod dispatcher;
pub mod errors;
pub(crate) mod handlers;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use dispatcher::{Deps, Fallback, ToolDispatcher};
pub use errors::HandlerError;
pub use registry::{handler, Handler, HandlerRegistry, HandlerResult};
pub use types::{ToolArgs, ToolCallRequest, ToolReply};
