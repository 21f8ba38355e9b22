//! Wire types for the tool-call protocol.
//!
//! The realtime transport delivers `{name, args}` once per model decision
//! and expects either a `{success, message, …}` result (continuing the
//! spoken conversation) or nothing for fire-and-forget UI actions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dispatch::errors::HandlerError;

// ─── Request ────────────────────────────────────────────────────────────────

/// A named tool call emitted by the remote conversational model.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    /// Scalar arguments. Nested values are rejected by the typed accessors.
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(name: &str, args: Map<String, Value>) -> Self {
        Self {
            name: name.to_string(),
            args,
        }
    }
}

// ─── Reply ──────────────────────────────────────────────────────────────────

/// Structured result returned to the transport.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReply {
    pub success: bool,
    /// Natural-language acknowledgement the model speaks back.
    pub message: String,
    /// Optional payload fields, flattened next to `success`/`message`.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ToolReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Map::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: Map::new(),
        }
    }

    /// Attach a payload field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// Attach a serializable payload field, dropping it on serialization
    /// failure rather than failing the reply.
    pub fn with_json<T: Serialize>(mut self, key: &str, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.payload.insert(key.to_string(), v);
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "dropping unserializable reply payload");
            }
        }
        self
    }
}

// ─── Argument access ────────────────────────────────────────────────────────

/// Typed accessors over a tool call's scalar arguments.
///
/// Missing or wrongly-typed required arguments become validation failures
/// (never panics), phrased for the model to relay.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    pub fn new(args: Map<String, Value>) -> Self {
        Self(args)
    }

    /// A string argument, if present and non-empty.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A required string argument.
    pub fn require_str(&self, key: &str) -> Result<&str, HandlerError> {
        self.str(key)
            .ok_or_else(|| HandlerError::invalid(format!("Paramètre manquant : {key}")))
    }

    /// A boolean argument ("true"/"false" strings accepted — the transport
    /// occasionally stringifies scalars).
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "oui" => true,
                "false" | "0" | "no" | "non" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// An integer argument (number or numeric string).
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// A semicolon- or newline-separated list argument.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.str(key)
            .map(|s| {
                s.split(|c| c == ';' || c == '\n')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
