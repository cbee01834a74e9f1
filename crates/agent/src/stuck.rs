//! Periodic detection of stuck users.

use std::sync::Arc;

use tracing::{debug, info};

use crate::approach::ApproachCoordinator;
use crate::cancel::CancelToken;
use crate::context::AgentContext;

/// Background task scanning the session table at a fixed interval.
///
/// At most one proactive approach is attempted per scan cycle, and only when
/// the single-flight gate has a free permit. The attempt is spawned, never
/// awaited, so a slow flow cannot stall the scan loop.
pub(crate) struct StuckDetector {
    ctx: Arc<AgentContext>,
    coordinator: ApproachCoordinator,
    token: CancelToken,
}

impl StuckDetector {
    pub fn new(ctx: Arc<AgentContext>, coordinator: ApproachCoordinator, token: CancelToken) -> Self {
        Self {
            ctx,
            coordinator,
            token,
        }
    }

    pub async fn run(self) {
        let cfg = &self.ctx.config;
        loop {
            if !self.token.sleep(cfg.stuck_scan_interval).await {
                return;
            }

            if self.ctx.gate.available_permits() == 0 {
                debug!(target: "agent::stuck", "approach flow active, skipping scan");
                continue;
            }

            let Some(session_id) = self.ctx.sessions.first_stuck(cfg.stuck_threshold) else {
                continue;
            };

            info!(target: "agent::stuck", %session_id, "user looks stuck, offering help");
            let coordinator = self.coordinator.clone();
            tokio::spawn(async move {
                coordinator.offer_proactive_help(session_id).await;
            });
        }
    }
}
