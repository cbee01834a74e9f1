//! Agent tuning knobs shared across the behavior tasks.
use std::time::Duration;

/// Configuration for the behavior tasks and approach flows.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Poll interval while waiting for the first map payload.
    pub map_poll_interval: Duration,

    /// Chebyshev radius around the current position that wander destinations
    /// are sampled from.
    pub wander_radius: i32,

    /// Attempts at sampling a walkable wander destination before giving up
    /// for this iteration.
    pub wander_retry_budget: u32,

    /// Hard cap on steps per published walk; longer paths are truncated.
    pub max_walk_steps: usize,

    /// Wall-clock duration of one movement step. Must equal the renderer's
    /// per-step animation duration; the two are kept in sync by convention,
    /// not enforced in-process.
    pub step_duration: Duration,

    /// Idle pause between wander walks, sampled uniformly from this window.
    pub pause_min: Duration,
    pub pause_max: Duration,

    /// Backoff after a failed movement publish or a failed destination
    /// sample before the wander loop retries.
    pub retry_backoff: Duration,

    /// Interval between stuck-session scans.
    pub stuck_scan_interval: Duration,

    /// Session age past which a user with no offer and no active help
    /// request counts as stuck.
    pub stuck_threshold: Duration,

    /// How long the bot holds position next to a user after responding,
    /// before wandering resumes.
    pub linger: Duration,

    /// Canned responses used when text generation fails.
    pub fallback_hint: String,
    pub fallback_nudge: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            map_poll_interval: Duration::from_millis(500),
            wander_radius: 10,
            wander_retry_budget: 20,
            max_walk_steps: 24,
            step_duration: Duration::from_millis(450),
            pause_min: Duration::from_secs(2),
            pause_max: Duration::from_secs(6),
            retry_backoff: Duration::from_secs(1),
            stuck_scan_interval: Duration::from_secs(30),
            stuck_threshold: Duration::from_secs(300),
            linger: Duration::from_secs(10),
            fallback_hint: "I'm having trouble putting a hint together right now. \
                            Take another look at the error output and try breaking the \
                            problem into smaller steps."
                .to_string(),
            fallback_nudge: "Hey, still working on this one? Give me a shout if you'd \
                             like a hand."
                .to_string(),
        }
    }
}
