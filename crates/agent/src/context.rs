//! Shared state threaded through every behavior task.

use std::sync::{Arc, Mutex};

use nav::GridCell;
use tokio::sync::Semaphore;

use crate::cancel::CancelToken;
use crate::config::AgentConfig;
use crate::session::SessionTable;
use crate::traits::{TextGenerator, Transport};
use crate::world::{MapInfo, WorldState};

/// Per-agent context object. One instance per agent lifetime, owned by the
/// [`crate::agent::Agent`] and shared by reference with every task — never
/// global or static, so concurrent agents cannot leak state into each other.
pub(crate) struct AgentContext {
    pub world: Mutex<WorldState>,
    pub sessions: SessionTable,
    pub transport: Arc<dyn Transport>,
    pub generator: Arc<dyn TextGenerator>,
    pub config: AgentConfig,

    /// Single-flight gate for approach flows: one permit, held for the whole
    /// flow, released on every exit path.
    pub gate: Arc<Semaphore>,

    /// The active wander task's token. Replaced atomically whenever a new
    /// wander task starts; any flow may cancel-and-replace it.
    pub wander_token: Mutex<CancelToken>,

    /// Token of the proactive-approach flow currently in flight, if any.
    pub proactive_token: Mutex<Option<CancelToken>>,
}

impl AgentContext {
    pub fn new(
        transport: Arc<dyn Transport>,
        generator: Arc<dyn TextGenerator>,
        config: AgentConfig,
    ) -> Self {
        Self {
            world: Mutex::new(WorldState::new()),
            sessions: SessionTable::new(),
            transport,
            generator,
            config,
            gate: Arc::new(Semaphore::new(1)),
            wander_token: Mutex::new(CancelToken::new()),
            proactive_token: Mutex::new(None),
        }
    }

    pub fn map(&self) -> Option<Arc<MapInfo>> {
        self.world.lock().expect("world lock poisoned").map()
    }

    pub fn position(&self) -> GridCell {
        self.world.lock().expect("world lock poisoned").position()
    }

    pub fn commit_position(&self, cell: GridCell) {
        self.world
            .lock()
            .expect("world lock poisoned")
            .commit_position(cell);
    }

    pub fn apply_map(&self, map: MapInfo) {
        self.world.lock().expect("world lock poisoned").apply_map(map);
    }
}
