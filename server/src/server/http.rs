//! Request handlers. Thin: validate the payload shape, delegate to the
//! room manager, wrap the result.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};

use poker_shared::{
    ActionRequest, CreateRoomRequest, JoinRoomRequest, RoomListResponse, RoomStateResponse,
    SeatedResponse, StartHandRequest, StateQuery,
};

use super::{ApiError, AppState};

const NAME_MAX_LEN: usize = 32;

fn validate_name(name: &str, what: &str) -> Result<(), ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > NAME_MAX_LEN {
        return Err(ApiError::bad_request(format!(
            "{} must be 1-{} characters",
            what, NAME_MAX_LEN
        )));
    }
    Ok(())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_rooms(State(state): State<AppState>) -> Json<RoomListResponse> {
    let rooms = state.manager.list_rooms().await;
    Json(RoomListResponse { rooms })
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<SeatedResponse>, ApiError> {
    validate_name(&req.host_name, "host_name")?;
    if req.starting_stack.is_some_and(|stack| stack < 100) {
        return Err(ApiError::bad_request("starting_stack must be at least 100"));
    }
    if req.small_blind.is_some_and(|blind| blind < 1) {
        return Err(ApiError::bad_request("small_blind must be at least 1"));
    }
    if req.big_blind.is_some_and(|blind| blind < 2) {
        return Err(ApiError::bad_request("big_blind must be at least 2"));
    }
    let (room, host) = state
        .manager
        .create_room(
            req.host_name.trim(),
            req.total_seats,
            req.ai_players,
            req.starting_stack,
            req.small_blind,
            req.big_blind,
        )
        .await?;
    let snapshot = room.snapshot_as(Some(&host.id)).await;
    Ok(Json(SeatedResponse {
        room_id: room.id.clone(),
        player_id: host.id,
        player_secret: host.secret,
        state: snapshot,
    }))
}

pub async fn join_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(req): Json<JoinRoomRequest>,
) -> Result<Json<SeatedResponse>, ApiError> {
    validate_name(&req.player_name, "player_name")?;
    let (room, seat) = state
        .manager
        .join_room(&room_id, req.player_name.trim())
        .await?;
    let snapshot = room.snapshot_as(Some(&seat.id)).await;
    Ok(Json(SeatedResponse {
        room_id,
        player_id: seat.id,
        player_secret: seat.secret,
        state: snapshot,
    }))
}

pub async fn start_hand(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(req): Json<StartHandRequest>,
) -> Result<Json<RoomStateResponse>, ApiError> {
    let snapshot = state
        .manager
        .start_hand(&room_id, &req.player_id, &req.player_secret)
        .await?;
    Ok(Json(RoomStateResponse {
        room_id,
        state: snapshot,
    }))
}

pub async fn player_action(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<RoomStateResponse>, ApiError> {
    let snapshot = state
        .manager
        .submit_action(
            &room_id,
            &req.player_id,
            &req.player_secret,
            &req.action,
            req.amount.unwrap_or(0),
        )
        .await?;
    Ok(Json(RoomStateResponse {
        room_id,
        state: snapshot,
    }))
}

pub async fn room_state(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(query): Query<StateQuery>,
) -> Result<Json<RoomStateResponse>, ApiError> {
    let snapshot = state
        .manager
        .fetch_state(
            &room_id,
            query.player_id.as_deref(),
            query.player_secret.as_deref(),
        )
        .await?;
    Ok(Json(RoomStateResponse {
        room_id,
        state: snapshot,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation_bounds() {
        assert!(validate_name("Ann", "host_name").is_ok());
        assert!(validate_name("  padded  ", "host_name").is_ok());
        assert!(validate_name("", "host_name").is_err());
        assert!(validate_name("   ", "host_name").is_err());
        assert!(validate_name(&"x".repeat(33), "host_name").is_err());
        assert!(validate_name(&"x".repeat(32), "host_name").is_ok());
    }
}
