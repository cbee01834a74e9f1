//! Wire payloads exchanged with the session transport.
//!
//! Inbound events arrive as tagged JSON; [`InboundEvent::parse`] converts a
//! tag + payload pair into a typed event. Malformed payloads surface as
//! [`AgentError::MalformedEvent`] so the caller can log and drop them
//! without touching shared state.

use nav::{GridCell, PixelPoint};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// Replaces the current map and resets the bot to its spawn point.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapUpdate {
    pub map_id: String,
    pub barriers: Vec<GridCell>,
    pub terminals: Vec<GridCell>,
    pub spawn_point: GridCell,
    pub grid_size: i32,
    pub cell_size: i32,
}

/// A user sat down at a terminal and started a challenge.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOpened {
    pub session_id: String,
    pub user_name: String,
    pub challenge: String,
    pub terminal: GridCell,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClosed {
    pub session_id: String,
}

/// A user explicitly asked the bot for help.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub request_id: String,
    pub target_x: i32,
    pub target_y: i32,
    pub requester_name: String,
    pub challenge: String,
    #[serde(default)]
    pub code: String,
}

impl HelpRequest {
    pub fn target(&self) -> GridCell {
        GridCell::new(self.target_x, self.target_y)
    }
}

/// Typed inbound event, dispatched by tag.
#[derive(Clone, Debug)]
pub enum InboundEvent {
    MapUpdate(MapUpdate),
    SessionOpened(SessionOpened),
    SessionClosed(SessionClosed),
    HelpRequest(HelpRequest),
}

impl InboundEvent {
    /// Parses a tagged payload. Unknown tags and payloads that fail to
    /// deserialize both come back as [`AgentError::MalformedEvent`].
    pub fn parse(kind: &str, payload: serde_json::Value) -> Result<Self> {
        fn typed<T: serde::de::DeserializeOwned>(
            kind: &str,
            payload: serde_json::Value,
        ) -> Result<T> {
            serde_json::from_value(payload).map_err(|e| AgentError::MalformedEvent {
                kind: kind.to_string(),
                detail: e.to_string(),
            })
        }

        match kind {
            "mapUpdate" => Ok(Self::MapUpdate(typed(kind, payload)?)),
            "sessionOpened" => Ok(Self::SessionOpened(typed(kind, payload)?)),
            "sessionClosed" => Ok(Self::SessionClosed(typed(kind, payload)?)),
            "helpRequest" => Ok(Self::HelpRequest(typed(kind, payload)?)),
            other => Err(AgentError::MalformedEvent {
                kind: other.to_string(),
                detail: "unknown event tag".to_string(),
            }),
        }
    }
}

/// Outbound walk payload: pixel waypoints plus one direction per step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovementUpdate {
    pub points: Vec<PixelPoint>,
    pub directions: Vec<String>,
}

impl MovementUpdate {
    /// Builds the payload for a cell path. `directions` always has one fewer
    /// element than `points`.
    pub fn from_path(path: &[GridCell], cell_size: i32) -> Self {
        Self {
            points: nav::to_pixels(path, cell_size),
            directions: nav::to_directions(path)
                .into_iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    /// Number of movement steps this walk performs.
    pub fn steps(&self) -> usize {
        self.directions.len()
    }
}

/// Generated hint answering a help request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintResponse {
    pub request_id: String,
    pub text: String,
}

/// Unprompted check-in for a stuck user.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeResponse {
    pub session_id: String,
    pub text: String,
}
