//! Approach orchestration: help-request and proactive check-in flows.
//!
//! Invariant: at most one of {wander task, approach flow} drives movement at
//! a time. Every flow cancels wander synchronously on entry — before its
//! first suspension point — and the flow that owns movement on exit starts a
//! fresh wander task; a preempted flow hands that duty to its preemptor.
//! Entry into a flow is guarded by the context's one-permit semaphore; the
//! permit is held for the flow's duration and released by RAII, so the gate
//! clears even when a flow fails internally.

use std::sync::Arc;

use tracing::{debug, info, warn};

use nav::GridCell;

use crate::cancel::CancelToken;
use crate::context::AgentContext;
use crate::error::{AgentError, Result};
use crate::event::{HelpRequest, HintResponse, MovementUpdate, NudgeResponse};
use crate::session::TrackedSession;
use crate::wander::WanderTask;
use crate::world::MapInfo;

const HINT_SYSTEM_PROMPT: &str = "You are Sprocket, the guide bot of a multiplayer coding \
     arcade. A player at a terminal asked you for help with their challenge. Reply with one \
     short, concrete hint that nudges them forward without handing over the solution.";

const NUDGE_SYSTEM_PROMPT: &str = "You are Sprocket, the guide bot of a multiplayer coding \
     arcade. A player has been quiet at a terminal for a while. Write one brief, friendly \
     check-in offering help. Do not reveal anything about the solution.";

/// Cloneable façade orchestrating the approach flows over the shared
/// context.
#[derive(Clone)]
pub struct ApproachCoordinator {
    ctx: Arc<AgentContext>,
}

impl ApproachCoordinator {
    pub(crate) fn new(ctx: Arc<AgentContext>) -> Self {
        Self { ctx }
    }

    /// Starts a fresh wander task from the current position, cancelling and
    /// replacing whatever token sits in the wander slot.
    pub(crate) fn start_wander(&self) {
        let token = CancelToken::new();
        {
            let mut slot = self
                .ctx
                .wander_token
                .lock()
                .expect("wander slot lock poisoned");
            slot.cancel();
            *slot = token.clone();
        }
        let task = WanderTask::new(self.ctx.clone(), token);
        tokio::spawn(task.run());
        debug!(target: "agent::approach", "wander task started");
    }

    /// Cancels the active wander task. Synchronous: takes effect before any
    /// suspension point of the calling flow.
    pub(crate) fn cancel_wander(&self) {
        self.ctx
            .wander_token
            .lock()
            .expect("wander slot lock poisoned")
            .cancel();
    }

    /// User-initiated help flow. Highest priority: preempts wander and any
    /// proactive flow, and its own walk is not preemptable.
    pub async fn handle_help_request(&self, request: HelpRequest) {
        self.cancel_wander();
        if let Some(token) = self
            .ctx
            .proactive_token
            .lock()
            .expect("proactive slot lock poisoned")
            .take()
        {
            info!(target: "agent::approach", "help request preempts proactive approach");
            token.cancel();
        }

        // The preempted flow releases its permit at its next suspension
        // point; waiting here is bounded by that.
        let Ok(permit) = self.ctx.gate.clone().acquire_owned().await else {
            return;
        };
        info!(
            target: "agent::approach",
            request_id = %request.request_id,
            requester = %request.requester_name,
            "help request flow started"
        );
        self.run_help_flow(&request).await;
        drop(permit);
        self.start_wander();
    }

    async fn run_help_flow(&self, request: &HelpRequest) {
        let cfg = &self.ctx.config;
        let generation = self.generate_hint(request);

        let text = match self.ctx.map() {
            None => {
                // No map yet: answer from wherever we are, skip movement.
                generation.await
            }
            Some(map) => {
                let (text, ()) =
                    tokio::join!(generation, self.walk_for_help(&map, request.target()));
                text
            }
        };

        let response = HintResponse {
            request_id: request.request_id.clone(),
            text,
        };
        if let Err(error) = self.send_hint(response).await {
            warn!(target: "agent::approach", error = %error, "failed to deliver hint");
        }

        // Hold position next to the user before wandering off again.
        tokio::time::sleep(cfg.linger).await;
    }

    /// Walks toward the request target while the hint is being generated.
    async fn walk_for_help(&self, map: &MapInfo, target: GridCell) {
        let cfg = &self.ctx.config;
        let Some(path) = self.plan_walk(map, target) else {
            return;
        };
        let steps = path.len() - 1;
        let end = path[path.len() - 1];
        let update = MovementUpdate::from_path(&path, map.cell_size);
        if let Err(error) = self.ctx.transport.publish_movement(update).await {
            warn!(target: "agent::approach", error = %error, "movement publish failed");
            return;
        }
        // Once published the walk runs to completion: nothing outranks a
        // help request, so there is no legitimate canceller for this wait.
        tokio::time::sleep(cfg.step_duration * steps as u32).await;
        self.ctx.commit_position(end);
    }

    /// System-initiated check-in flow for a stuck session. Yields to help
    /// requests at every suspension point.
    pub async fn offer_proactive_help(&self, session_id: String) {
        // Set the single-flight gate before anything else; losing the race
        // to a concurrent flow degrades to a no-op.
        let Ok(permit) = self.ctx.gate.clone().try_acquire_owned() else {
            debug!(target: "agent::approach", %session_id, "approach already active, skipping");
            return;
        };
        self.cancel_wander();

        let token = CancelToken::new();
        *self
            .ctx
            .proactive_token
            .lock()
            .expect("proactive slot lock poisoned") = Some(token.clone());

        self.run_proactive_flow(&session_id, &token).await;

        // If the token is gone from the slot, a help request (or shutdown)
        // took it and now owns movement; restarting wander here would run it
        // alongside that flow. Otherwise clear the slot and resume wandering.
        let preempted = {
            let mut slot = self
                .ctx
                .proactive_token
                .lock()
                .expect("proactive slot lock poisoned");
            match slot.as_ref() {
                Some(current) if current.same(&token) => {
                    *slot = None;
                    false
                }
                _ => true,
            }
        };
        drop(permit);
        if !preempted {
            self.start_wander();
        }
    }

    async fn run_proactive_flow(&self, session_id: &str, token: &CancelToken) {
        let cfg = &self.ctx.config;

        // The session may have closed while the nudge sat in the spawn
        // queue.
        let Some(session) = self.ctx.sessions.get(session_id) else {
            return;
        };
        if token.is_cancelled() {
            return;
        }

        if let Some(map) = self.ctx.map()
            && let Some(path) = self.plan_walk(&map, session.terminal)
        {
            let steps = path.len() - 1;
            let end = path[path.len() - 1];
            let update = MovementUpdate::from_path(&path, map.cell_size);
            match self.ctx.transport.publish_movement(update).await {
                Ok(()) => {
                    if !token.sleep(cfg.step_duration * steps as u32).await {
                        debug!(target: "agent::approach", %session_id, "cancelled mid-walk");
                        return;
                    }
                    self.ctx.commit_position(end);
                }
                Err(error) => {
                    // Walk abandoned; the check-in still goes out.
                    warn!(target: "agent::approach", error = %error, "movement publish failed");
                }
            }
        }

        // Generation is slow; the target may disappear or a help request may
        // preempt while it runs. Check on both sides of the call.
        if token.is_cancelled() || !self.ctx.sessions.contains(session_id) {
            return;
        }
        let text = self.generate_nudge(&session).await;
        if token.is_cancelled() || !self.ctx.sessions.contains(session_id) {
            debug!(target: "agent::approach", %session_id, "target gone after generation, dropping nudge");
            return;
        }

        let response = NudgeResponse {
            session_id: session_id.to_string(),
            text,
        };
        if let Err(error) = self.send_nudge(response).await {
            warn!(target: "agent::approach", error = %error, "failed to deliver nudge");
        }
        self.ctx.sessions.mark_proactive_offered(session_id);
        info!(target: "agent::approach", %session_id, "nudge delivered");

        let _ = token.sleep(cfg.linger).await;
    }

    /// Plans the walk toward `target`'s approach cell.
    ///
    /// Returns `None` when no walk is needed or possible: already adjacent,
    /// every neighbor of the target blocked, or no route found.
    fn plan_walk(&self, map: &MapInfo, target: GridCell) -> Option<Vec<GridCell>> {
        let position = self.ctx.position();
        if position.chebyshev(target) <= 1 {
            return None;
        }
        let approach = nav::find_adjacent_cell(target, &map.barriers, map.grid_size)?;
        let path = nav::find_path(position, approach, &map.barriers, map.grid_size);
        if path.len() < 2 {
            debug!(target: "agent::approach", goal = %target, "no route to approach cell");
            return None;
        }
        Some(nav::truncate(path, self.ctx.config.max_walk_steps))
    }

    async fn generate_hint(&self, request: &HelpRequest) -> String {
        let context = format!(
            "{} is asking for help with the \"{}\" challenge.\nTheir current code:\n{}",
            request.requester_name, request.challenge, request.code
        );
        match self.ctx.generator.generate(HINT_SYSTEM_PROMPT, &context).await {
            Ok(text) => text,
            Err(error) => {
                warn!(target: "agent::approach", error = %error, "hint generation failed, using fallback");
                self.ctx.config.fallback_hint.clone()
            }
        }
    }

    async fn generate_nudge(&self, session: &TrackedSession) -> String {
        let context = format!(
            "{} has been sitting at the \"{}\" challenge for a while without finishing.",
            session.user_name, session.challenge
        );
        match self.ctx.generator.generate(NUDGE_SYSTEM_PROMPT, &context).await {
            Ok(text) => text,
            Err(error) => {
                warn!(target: "agent::approach", error = %error, "nudge generation failed, using fallback");
                self.ctx.config.fallback_nudge.clone()
            }
        }
    }

    async fn send_hint(&self, response: HintResponse) -> Result<()> {
        self.ctx
            .transport
            .send_hint(response)
            .await
            .map_err(AgentError::Respond)
    }

    async fn send_nudge(&self, response: NudgeResponse) -> Result<()> {
        self.ctx
            .transport
            .send_nudge(response)
            .await
            .map_err(AgentError::Respond)
    }
}
