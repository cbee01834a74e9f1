//! Unified error types surfaced by the agent.
//!
//! None of these abort a running behavior: movement publish failures are
//! retried at the call site, generation failures fall back to canned text,
//! and malformed events are dropped. What remains here is what callers can
//! actually observe — response delivery failures, rejected payloads, and
//! builder misuse.
use thiserror::Error;

/// Boxed error type used at the collaborator trait seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("response publish failed")]
    Respond(#[source] BoxError),

    #[error("malformed {kind} event: {detail}")]
    MalformedEvent { kind: String, detail: String },

    #[error("agent requires a transport before building")]
    MissingTransport,

    #[error("agent requires a text generator before building")]
    MissingGenerator,
}
