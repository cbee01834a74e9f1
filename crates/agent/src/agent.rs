//! Top-level agent orchestrator.
//!
//! [`Agent`] owns the shared context, starts the background behaviors, and
//! exposes the inbound-event entry points the transport layer feeds. It is
//! built through [`AgentBuilder`] so collaborators and configuration can be
//! injected per deployment (or per test).

use std::sync::Arc;

use tracing::{info, warn};

use nav::GridCell;

use crate::approach::ApproachCoordinator;
use crate::cancel::CancelToken;
use crate::config::AgentConfig;
use crate::context::AgentContext;
use crate::error::{AgentError, Result};
use crate::event::{HelpRequest, InboundEvent, MapUpdate, SessionClosed, SessionOpened};
use crate::stuck::StuckDetector;
use crate::traits::{TextGenerator, Transport};

/// The guide bot: wanders when idle, watches for stuck users, walks over to
/// help on request.
pub struct Agent {
    ctx: Arc<AgentContext>,
    coordinator: ApproachCoordinator,
    stuck_token: CancelToken,
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Spawns the background behaviors: the wander loop and the stuck-user
    /// scan. Must run inside a tokio runtime.
    pub fn start(&self) {
        self.coordinator.start_wander();
        let detector = StuckDetector::new(
            self.ctx.clone(),
            self.coordinator.clone(),
            self.stuck_token.clone(),
        );
        tokio::spawn(detector.run());
        info!(target: "agent", "agent started");
    }

    /// Cancels the background behaviors. An in-flight help-request flow is
    /// not cancellable; it finishes on its own and restarts wandering when
    /// it does.
    pub fn shutdown(&self) {
        self.stuck_token.cancel();
        self.coordinator.cancel_wander();
        if let Some(token) = self
            .ctx
            .proactive_token
            .lock()
            .expect("proactive slot lock poisoned")
            .take()
        {
            token.cancel();
        }
        info!(target: "agent", "agent shut down");
    }

    /// Parses and dispatches a raw transport event. Malformed payloads are
    /// logged and dropped; shared state is never touched by them.
    pub fn handle_raw_event(&self, kind: &str, payload: serde_json::Value) {
        match InboundEvent::parse(kind, payload) {
            Ok(event) => self.handle_event(event),
            Err(error) => {
                warn!(target: "agent", error = %error, "dropping malformed event");
            }
        }
    }

    pub fn handle_event(&self, event: InboundEvent) {
        match event {
            InboundEvent::MapUpdate(update) => self.apply_map_update(update),
            InboundEvent::SessionOpened(opened) => self.session_opened(opened),
            InboundEvent::SessionClosed(closed) => self.session_closed(closed),
            InboundEvent::HelpRequest(request) => self.handle_help_request(request),
        }
    }

    /// Replaces the current map and resets the bot to the new spawn point.
    pub fn apply_map_update(&self, update: MapUpdate) {
        info!(
            target: "agent",
            map_id = %update.map_id,
            grid_size = update.grid_size,
            barriers = update.barriers.len(),
            "map update applied"
        );
        self.ctx.apply_map(update.into());
    }

    pub fn session_opened(&self, event: SessionOpened) {
        info!(
            target: "agent",
            session_id = %event.session_id,
            user = %event.user_name,
            "session opened"
        );
        self.ctx.sessions.open(event);
    }

    pub fn session_closed(&self, event: SessionClosed) {
        info!(target: "agent", session_id = %event.session_id, "session closed");
        self.ctx.sessions.close(&event.session_id);
    }

    /// Marks the requester's sessions and spawns the help flow. Returns
    /// immediately; the flow runs in the background.
    pub fn handle_help_request(&self, request: HelpRequest) {
        if !self.ctx.sessions.set_help_active_by_name(&request.requester_name) {
            // Help can still be given without a tracked session; it just
            // won't suppress future stuck nudges.
            warn!(
                target: "agent",
                requester = %request.requester_name,
                "help request from user with no tracked session"
            );
        }
        let coordinator = self.coordinator.clone();
        tokio::spawn(async move {
            coordinator.handle_help_request(request).await;
        });
    }

    /// Current grid position, as committed by the last completed walk.
    pub fn position(&self) -> GridCell {
        self.ctx.position()
    }

    /// Cloneable handle to the approach flows, for embedders that invoke
    /// them directly instead of going through [`Agent::handle_event`].
    pub fn coordinator(&self) -> ApproachCoordinator {
        self.coordinator.clone()
    }
}

/// Builder for [`Agent`] with injectable collaborators.
pub struct AgentBuilder {
    config: AgentConfig,
    transport: Option<Arc<dyn Transport>>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AgentBuilder {
    fn new() -> Self {
        Self {
            config: AgentConfig::default(),
            transport: None,
            generator: None,
        }
    }

    /// Override agent configuration.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required session transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the required text-generation service.
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the agent. Background tasks are not spawned until
    /// [`Agent::start`] is called.
    pub fn build(self) -> Result<Agent> {
        let transport = self.transport.ok_or(AgentError::MissingTransport)?;
        let generator = self.generator.ok_or(AgentError::MissingGenerator)?;
        let ctx = Arc::new(AgentContext::new(transport, generator, self.config));
        let coordinator = ApproachCoordinator::new(ctx.clone());
        Ok(Agent {
            ctx,
            coordinator,
            stuck_token: CancelToken::new(),
        })
    }
}
