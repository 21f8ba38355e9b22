//! Anonymous question quota.
//!
//! Sessions without an identified role get a small question budget before
//! the assistant nudges them toward signing in. The count lives in the
//! session-scoped KV store so it survives a reload but resets with the
//! navigation session.
//!
//! This gate is a UX nudge only — it is enforced client-side and is NOT an
//! authorization boundary. A determined client can reset it; server-side
//! enforcement is a separate concern owned by the backend.

use std::sync::Arc;

use crate::session::kv::{KeyValueStore, Scope};

/// Session-scoped storage key for the remaining question count.
const QUOTA_KEY: &str = "assistant.questions_remaining";

/// Default question budget for anonymous sessions.
pub const DEFAULT_QUESTION_BUDGET: u8 = 3;

/// Outcome of one `decrement_questions` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaOutcome {
    /// Questions left after this call.
    pub remaining: u8,
    /// Whether this call consumed a question (identified users never do).
    pub counted: bool,
    /// True exactly once: on the call that first brings the count to 0.
    pub exhausted_now: bool,
}

/// Tracks the anonymous question budget.
pub struct QuotaGate {
    kv: Arc<dyn KeyValueStore>,
    budget: u8,
}

impl QuotaGate {
    pub fn new(kv: Arc<dyn KeyValueStore>, budget: u8) -> Self {
        Self { kv, budget }
    }

    /// Questions left in this session, clamped to `[0, budget]`.
    pub fn remaining(&self) -> u8 {
        self.kv
            .get(Scope::Session, QUOTA_KEY)
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(self.budget)
            .min(self.budget)
    }

    /// Consume one question for an anonymous user.
    ///
    /// For identified users this is a success no-op reporting the current
    /// count. The count clamps at 0; `exhausted_now` is set only on the
    /// transition into 0, never on later calls.
    pub fn decrement(&self, identified: bool) -> QuotaOutcome {
        let before = self.remaining();

        if identified {
            return QuotaOutcome {
                remaining: before,
                counted: false,
                exhausted_now: false,
            };
        }

        let after = before.saturating_sub(1);
        self.kv
            .set(Scope::Session, QUOTA_KEY, &after.to_string());

        let exhausted_now = before > 0 && after == 0;
        if exhausted_now {
            tracing::info!("anonymous question quota exhausted");
        }

        QuotaOutcome {
            remaining: after,
            counted: before > 0,
            exhausted_now,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
