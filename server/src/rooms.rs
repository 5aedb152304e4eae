//! Rooms and the process-wide registry.
//!
//! A [`Room`] owns its seats and the active hand behind one lock; the
//! [`RoomManager`] owns the room map behind another. The two are leaves:
//! no path holds two room locks, and the registry lock is never held
//! across an external call.

mod driver;
mod manager;
mod room;

pub use manager::{ManagerError, RoomManager};
pub use room::{Room, RoomError};
