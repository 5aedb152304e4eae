//! HTTP request and response payloads.

use serde::{Deserialize, Serialize};

use crate::state::{RoomState, RoomSummary};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub host_name: String,
    pub total_seats: usize,
    pub ai_players: usize,
    #[serde(default)]
    pub starting_stack: Option<u32>,
    #[serde(default)]
    pub small_blind: Option<u32>,
    #[serde(default)]
    pub big_blind: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub player_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartHandRequest {
    pub player_id: String,
    pub player_secret: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionRequest {
    pub player_id: String,
    pub player_secret: String,
    pub action: String,
    #[serde(default)]
    pub amount: Option<u32>,
}

/// Query parameters of `GET /rooms/{id}`; both present for a seated viewer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateQuery {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub player_secret: Option<String>,
}

/// Response of room creation and join: the caller's credentials plus a
/// snapshot taken from its point of view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeatedResponse {
    pub room_id: String,
    pub player_id: String,
    pub player_secret: String,
    pub state: RoomState,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomStateResponse {
    pub room_id: String,
    pub state: RoomState,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub rooms: Vec<RoomSummary>,
}

/// Error body: a human-readable detail string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
