//! In-process collaborators for running the bot without a live world.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use agent::{BoxError, HintResponse, MovementUpdate, NudgeResponse, TextGenerator, Transport};

/// Transport that logs every outbound payload instead of delivering it.
pub struct ConsoleTransport;

#[async_trait]
impl Transport for ConsoleTransport {
    async fn publish_movement(&self, update: MovementUpdate) -> Result<(), BoxError> {
        let payload = serde_json::to_string(&update)?;
        info!(
            target: "bot::transport",
            steps = update.steps(),
            payload = %payload,
            "movement published"
        );
        Ok(())
    }

    async fn send_hint(&self, response: HintResponse) -> Result<(), BoxError> {
        info!(
            target: "bot::transport",
            request_id = %response.request_id,
            text = %response.text,
            "hint delivered"
        );
        Ok(())
    }

    async fn send_nudge(&self, response: NudgeResponse) -> Result<(), BoxError> {
        info!(
            target: "bot::transport",
            session_id = %response.session_id,
            text = %response.text,
            "nudge delivered"
        );
        Ok(())
    }
}

/// Generator that simulates a slow model with rotating canned lines.
pub struct ScriptedGenerator {
    delay: Duration,
    lines: Vec<&'static str>,
    next: Mutex<usize>,
}

impl ScriptedGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            lines: vec![
                "Have you checked what happens at the boundaries of your loop?",
                "Your condition looks close; try tracing it with the smallest input.",
                "Hey! Stuck on this one? I'm around if you want a pointer.",
            ],
            next: Mutex::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _system: &str, _context: &str) -> Result<String, BoxError> {
        tokio::time::sleep(self.delay).await;
        let mut next = self.next.lock().expect("scripted generator lock poisoned");
        let line = self.lines[*next % self.lines.len()];
        *next += 1;
        Ok(line.to_string())
    }
}
