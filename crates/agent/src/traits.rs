//! Asynchronous seams to the external collaborators.
//!
//! The agent is wired against these traits so the real transport and
//! text-generation service can be swapped for scripted fixtures in tests and
//! demos. Both are latency-bearing and fallible; the agent never lets a
//! failure here terminate a behavior task.
use async_trait::async_trait;

use crate::error::BoxError;
use crate::event::{HintResponse, MovementUpdate, NudgeResponse};

/// Outbound half of the real-time session transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Publishes a walk for the renderer to animate.
    async fn publish_movement(&self, update: MovementUpdate) -> Result<(), BoxError>;

    /// Delivers a hint answering an explicit help request.
    async fn send_hint(&self, response: HintResponse) -> Result<(), BoxError>;

    /// Delivers an unprompted check-in message.
    async fn send_nudge(&self, response: NudgeResponse) -> Result<(), BoxError>;
}

/// Opaque text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produces response text for the given prompt pair. Slow and fallible;
    /// callers substitute canned fallbacks on error.
    async fn generate(&self, system_prompt: &str, context: &str) -> Result<String, BoxError>;
}
