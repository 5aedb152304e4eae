//! HTTP surface: router, handlers and the error-to-status mapping.

mod error;
mod http;
mod run;

pub use error::ApiError;
pub use run::{build_router, run_server};

use std::sync::Arc;

use crate::rooms::RoomManager;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<RoomManager>,
}
