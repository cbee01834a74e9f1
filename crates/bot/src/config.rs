//! Bot process configuration loaded from the environment.
use std::env;
use std::time::Duration;

use agent::AgentConfig;

/// Configuration for the demo process wrapping [`agent::Agent`].
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub agent: AgentConfig,

    /// Simulated latency of the scripted text generator.
    pub generation_delay: Duration,

    /// How long the demo keeps the bot alive after the scripted events.
    pub demo_duration: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            generation_delay: Duration::from_secs(2),
            demo_duration: Duration::from_secs(60),
        }
    }
}

impl BotConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOT_STEP_DURATION_MS` - per-step walk duration (default: 450)
    /// - `BOT_STUCK_THRESHOLD_SECS` - session age before a nudge (default: 300)
    /// - `BOT_STUCK_SCAN_INTERVAL_SECS` - stuck scan interval (default: 30)
    /// - `BOT_LINGER_SECS` - hold time after responding (default: 10)
    /// - `BOT_WANDER_RADIUS` - wander sampling radius (default: 10)
    /// - `BOT_GENERATION_DELAY_MS` - simulated generator latency (default: 2000)
    /// - `BOT_DEMO_DURATION_SECS` - demo run time (default: 60)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("BOT_STEP_DURATION_MS") {
            config.agent.step_duration = Duration::from_millis(ms.max(1));
        }
        if let Some(secs) = read_env::<u64>("BOT_STUCK_THRESHOLD_SECS") {
            config.agent.stuck_threshold = Duration::from_secs(secs);
        }
        if let Some(secs) = read_env::<u64>("BOT_STUCK_SCAN_INTERVAL_SECS") {
            config.agent.stuck_scan_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = read_env::<u64>("BOT_LINGER_SECS") {
            config.agent.linger = Duration::from_secs(secs);
        }
        if let Some(radius) = read_env::<i32>("BOT_WANDER_RADIUS") {
            config.agent.wander_radius = radius.max(1);
        }
        if let Some(ms) = read_env::<u64>("BOT_GENERATION_DELAY_MS") {
            config.generation_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = read_env::<u64>("BOT_DEMO_DURATION_SECS") {
            config.demo_duration = Duration::from_secs(secs);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
