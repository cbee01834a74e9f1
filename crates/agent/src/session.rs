//! Tracking of open user challenge sessions.
//!
//! The table backs both the stuck-session scan and the freshness checks in
//! the approach flows. It is kept in insertion order so "the first stuck
//! session" is deterministic.

use std::sync::Mutex;
use std::time::Duration;

use nav::GridCell;
use tokio::time::Instant;

use crate::event::SessionOpened;

/// One open challenge session at a terminal.
#[derive(Clone, Debug)]
pub struct TrackedSession {
    pub session_id: String,
    pub user_name: String,
    pub challenge: String,
    pub terminal: GridCell,
    pub opened_at: Instant,
    pub proactive_offered: bool,
    pub help_active: bool,
}

/// Insertion-ordered session table. All operations are short synchronous
/// critical sections.
#[derive(Debug, Default)]
pub struct SessionTable {
    inner: Mutex<Vec<TrackedSession>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly opened session; reopening an existing id replaces
    /// its entry in place.
    pub fn open(&self, event: SessionOpened) {
        let session = TrackedSession {
            session_id: event.session_id,
            user_name: event.user_name,
            challenge: event.challenge,
            terminal: event.terminal,
            opened_at: Instant::now(),
            proactive_offered: false,
            help_active: false,
        };
        let mut table = self.lock();
        match table.iter_mut().find(|s| s.session_id == session.session_id) {
            Some(existing) => *existing = session,
            None => table.push(session),
        }
    }

    /// Removes a session. Unknown ids are a no-op.
    pub fn close(&self, session_id: &str) {
        self.lock().retain(|s| s.session_id != session_id);
    }

    pub fn get(&self, session_id: &str) -> Option<TrackedSession> {
        self.lock()
            .iter()
            .find(|s| s.session_id == session_id)
            .cloned()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().iter().any(|s| s.session_id == session_id)
    }

    pub fn mark_proactive_offered(&self, session_id: &str) {
        if let Some(session) = self
            .lock()
            .iter_mut()
            .find(|s| s.session_id == session_id)
        {
            session.proactive_offered = true;
        }
    }

    /// Flags every session owned by `user_name` as having an active help
    /// request. Returns whether any session matched.
    pub fn set_help_active_by_name(&self, user_name: &str) -> bool {
        let mut matched = false;
        for session in self.lock().iter_mut() {
            if session.user_name == user_name {
                session.help_active = true;
                matched = true;
            }
        }
        matched
    }

    /// First session (in insertion order) older than `threshold` with no
    /// offer made and no help request in flight.
    pub fn first_stuck(&self, threshold: Duration) -> Option<String> {
        self.lock()
            .iter()
            .find(|s| {
                !s.proactive_offered && !s.help_active && s.opened_at.elapsed() > threshold
            })
            .map(|s| s.session_id.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TrackedSession>> {
        self.inner.lock().expect("session table lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(session_id: &str, user_name: &str) -> SessionOpened {
        SessionOpened {
            session_id: session_id.to_string(),
            user_name: user_name.to_string(),
            challenge: "fizzbuzz".to_string(),
            terminal: GridCell::new(4, 4),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_scan_honors_threshold_and_flags() {
        let table = SessionTable::new();
        table.open(opened("s1", "ada"));
        table.open(opened("s2", "grace"));

        // Too young to qualify.
        assert_eq!(table.first_stuck(Duration::from_secs(60)), None);

        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(table.first_stuck(Duration::from_secs(60)).as_deref(), Some("s1"));

        // An offered session is skipped; the next one in order qualifies.
        table.mark_proactive_offered("s1");
        assert_eq!(table.first_stuck(Duration::from_secs(60)).as_deref(), Some("s2"));

        // An active help request disqualifies too.
        assert!(table.set_help_active_by_name("grace"));
        assert_eq!(table.first_stuck(Duration::from_secs(60)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_a_session_resets_its_entry() {
        let table = SessionTable::new();
        table.open(opened("s1", "ada"));
        table.mark_proactive_offered("s1");
        tokio::time::advance(Duration::from_secs(300)).await;

        table.open(opened("s1", "ada"));
        assert_eq!(table.len(), 1);
        // Fresh entry: no offer flag, age restarted.
        assert_eq!(table.first_stuck(Duration::from_secs(60)), None);
    }

    #[test]
    fn close_removes_only_the_named_session() {
        let table = SessionTable::new();
        table.open(opened("s1", "ada"));
        table.open(opened("s2", "grace"));
        table.close("s1");
        assert!(!table.contains("s1"));
        assert!(table.contains("s2"));
        table.close("missing");
        assert_eq!(table.len(), 1);
    }
}
