//! Session layer — state owned by the assistant itself.
//!
//! Submodules:
//! - `state`: per-session state (voice, chat-open flag, presentation mode,
//!   pending correspondence, extraction report)
//! - `quota`: anonymous question budget with single-shot exhaustion notice
//! - `kv`: scoped key-value storage capability (session vs persistent)

pub mod kv;
pub mod quota;
pub mod state;

pub use kv::{FileStore, KeyValueStore, MemoryStore, Scope};
pub use quota::{QuotaGate, QuotaOutcome, DEFAULT_QUESTION_BUDGET};
pub use state::{SessionState, SessionStore, VoiceProfile};
