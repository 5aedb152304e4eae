//! Mapping from core errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use poker_shared::ErrorBody;

use crate::rooms::{ManagerError, RoomError};

/// An error ready to leave the process: status code plus a human-readable
/// detail string.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        let status = match &err {
            ManagerError::UnknownRoom => StatusCode::NOT_FOUND,
            ManagerError::RoomLimit => StatusCode::SERVICE_UNAVAILABLE,
            ManagerError::Room(room) => return room_status(room, err.to_string()),
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError {
            status,
            detail: err.to_string(),
        }
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        let detail = err.to_string();
        room_status(&err, detail)
    }
}

fn room_status(err: &RoomError, detail: String) -> ApiError {
    let status = match err {
        RoomError::UnknownPlayer => StatusCode::NOT_FOUND,
        RoomError::SecretMismatch | RoomError::NotHost => StatusCode::FORBIDDEN,
        _ => StatusCode::BAD_REQUEST,
    };
    ApiError { status, detail }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
