//! Idle wandering behavior.
//!
//! Runs as a background task whenever no approach flow is active: wait for a
//! map, pick a nearby random destination, walk it, pause, repeat. The task is
//! cancellable at every suspension point and exits silently when its token is
//! signaled.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use nav::GridCell;

use crate::cancel::CancelToken;
use crate::context::AgentContext;
use crate::event::MovementUpdate;
use crate::world::MapInfo;

/// Background task driving the idle wander loop.
pub(crate) struct WanderTask {
    ctx: Arc<AgentContext>,
    token: CancelToken,
}

impl WanderTask {
    pub fn new(ctx: Arc<AgentContext>, token: CancelToken) -> Self {
        Self { ctx, token }
    }

    /// Main loop. Returns when the token is cancelled.
    pub async fn run(self) {
        let cfg = &self.ctx.config;
        loop {
            if self.token.is_cancelled() {
                return;
            }

            // WaitingForMap: poll until the world has a map.
            let map = loop {
                if let Some(map) = self.ctx.map() {
                    break map;
                }
                if !self.token.sleep(cfg.map_poll_interval).await {
                    return;
                }
            };

            // Walking: sample a destination and publish the route.
            let position = self.ctx.position();
            let Some(destination) = self.pick_destination(&map, position) else {
                debug!(target: "agent::wander", "no walkable destination sampled");
                if !self.token.sleep(cfg.retry_backoff).await {
                    return;
                }
                continue;
            };

            let path = nav::find_path(position, destination, &map.barriers, map.grid_size);
            if path.len() < 2 {
                debug!(target: "agent::wander", %destination, "destination unreachable");
                if !self.token.sleep(cfg.retry_backoff).await {
                    return;
                }
                continue;
            }

            let path = nav::truncate(path, cfg.max_walk_steps);
            let steps = path.len() - 1;
            let end = path[path.len() - 1];
            let update = MovementUpdate::from_path(&path, map.cell_size);

            if let Err(error) = self.ctx.transport.publish_movement(update).await {
                // Transient: drop this walk and try again after a backoff.
                warn!(target: "agent::wander", error = %error, "movement publish failed");
                if !self.token.sleep(cfg.retry_backoff).await {
                    return;
                }
                continue;
            }

            debug!(target: "agent::wander", %position, %end, steps, "walk published");

            // The renderer animates one step per step_duration; the position
            // commits only if the full walk elapses uncancelled. A cancelled
            // walk is abandoned even though the path was already published.
            if !self.token.sleep(cfg.step_duration * steps as u32).await {
                return;
            }
            self.ctx.commit_position(end);

            // Pausing.
            let pause = {
                let mut rng = rand::thread_rng();
                rng.gen_range(cfg.pause_min..=cfg.pause_max)
            };
            if !self.token.sleep(pause).await {
                return;
            }
        }
    }

    /// Samples up to the retry budget of random in-bounds, non-barrier cells
    /// within the wander radius of `from`.
    fn pick_destination(&self, map: &MapInfo, from: GridCell) -> Option<GridCell> {
        let cfg = &self.ctx.config;
        let radius = cfg.wander_radius;
        let mut rng = rand::thread_rng();
        for _ in 0..cfg.wander_retry_budget {
            let candidate = from.offset(
                rng.gen_range(-radius..=radius),
                rng.gen_range(-radius..=radius),
            );
            if candidate != from
                && candidate.in_bounds(map.grid_size)
                && !map.barriers.contains(candidate)
            {
                return Some(candidate);
            }
        }
        None
    }
}
