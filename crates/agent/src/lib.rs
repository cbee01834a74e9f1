//! Orchestration runtime for the guide bot.
//!
//! This crate wires the grid search from `nav` into a set of cooperating
//! background behaviors: idle wandering, stuck-user detection, and the
//! approach flows that walk the bot over to a user and deliver generated
//! text. Exactly one behavior drives movement at a time; arbitration happens
//! through one-shot cancellation tokens and a single-flight gate rather than
//! locks held across suspension points.
//!
//! Modules are organized by responsibility:
//! - [`agent`] hosts the orchestrator and builder
//! - [`approach`] arbitrates the help-request and proactive flows
//! - [`cancel`] provides the cooperative cancellation primitive
//! - [`event`] defines the wire payloads and their parsing
//! - [`session`] and [`world`] hold the shared mutable state
//! - [`traits`] declares the transport and text-generation seams
//! - wander and stuck-detection tasks stay internal to the crate
pub mod agent;
pub mod approach;
pub mod cancel;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod traits;
pub mod world;

mod context;
mod stuck;
mod wander;

pub use agent::{Agent, AgentBuilder};
pub use approach::ApproachCoordinator;
pub use cancel::CancelToken;
pub use config::AgentConfig;
pub use error::{AgentError, BoxError, Result};
pub use event::{
    HelpRequest, HintResponse, InboundEvent, MapUpdate, MovementUpdate, NudgeResponse,
    SessionClosed, SessionOpened,
};
pub use session::{SessionTable, TrackedSession};
pub use traits::{TextGenerator, Transport};
pub use world::{MapInfo, WorldState};
