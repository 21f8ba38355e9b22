//! Handler registry — one entry per recognized tool name.
//!
//! The original dispatch was a long conditional chain; here every tool is
//! an `async fn(Arc<Deps>, ToolArgs)` registered under its name, so each
//! handler can be called (and tested) in isolation.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::dispatch::dispatcher::Deps;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::types::{ToolArgs, ToolReply};

/// What a handler produces: a reply for the transport, `None` for
/// fire-and-forget UI actions, or an error the dispatcher converts.
pub type HandlerResult = Result<Option<ToolReply>, HandlerError>;

/// A registered tool handler.
pub type Handler = Box<dyn Fn(Arc<Deps>, ToolArgs) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Box an `async fn` into a registrable [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Arc<Deps>, ToolArgs) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = HandlerResult> + Send + 'static,
{
    Box::new(move |deps, args| Box::pin(f(deps, args)))
}

/// Name-keyed handler table.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a tool name. A duplicate registration is a
    /// programming error in an area module; the later one wins, loudly.
    pub fn register(&mut self, name: &'static str, handler: Handler) {
        if self.handlers.insert(name, handler).is_some() {
            tracing::error!(tool = name, "duplicate handler registration");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
