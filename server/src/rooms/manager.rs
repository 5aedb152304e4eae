//! Process-wide room registry.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tokio::sync::RwLock;

use poker_shared::{RoomState, RoomSummary};

use crate::ai::DeepSeekClient;
use crate::config::Settings;
use crate::game::Seat;

use super::room::{Room, RoomError};

const ROOM_CODE_LEN: usize = 6;
const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("room not found")]
    UnknownRoom,
    #[error("room limit reached")]
    RoomLimit,
    #[error("seats must be between 2 and 9")]
    InvalidSeats,
    #[error("AI players must be fewer than seats")]
    InvalidAiCount,
    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Owns every room. The registry lock only guards the map itself and is
/// released before any room lock is taken.
pub struct RoomManager {
    settings: Settings,
    ai: Arc<DeepSeekClient>,
    rooms: RwLock<HashMap<String, Arc<Room>>>,
}

impl RoomManager {
    pub fn new(settings: Settings, ai: Arc<DeepSeekClient>) -> Self {
        RoomManager {
            settings,
            ai,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Create a room and seat its host. Collisions on the short code are
    /// improbable at the configured cap and are simply overwritten.
    pub async fn create_room(
        &self,
        host_name: &str,
        total_seats: usize,
        ai_players: usize,
        starting_stack: Option<u32>,
        small_blind: Option<u32>,
        big_blind: Option<u32>,
    ) -> Result<(Arc<Room>, Seat), ManagerError> {
        if !(2..=9).contains(&total_seats) {
            return Err(ManagerError::InvalidSeats);
        }
        if ai_players >= total_seats {
            return Err(ManagerError::InvalidAiCount);
        }
        let stack = starting_stack.unwrap_or(self.settings.starting_stack);
        let small_blind = small_blind.unwrap_or(self.settings.small_blind);
        let big_blind = big_blind.unwrap_or(self.settings.big_blind);
        let host = Seat::new_human(host_name, stack, true);

        let mut rooms = self.rooms.write().await;
        if rooms.len() >= self.settings.max_rooms {
            return Err(ManagerError::RoomLimit);
        }
        let room_id = new_room_code(&mut rand::rng());
        let room = Arc::new(Room::new(
            room_id.clone(),
            host.clone(),
            total_seats,
            ai_players,
            stack,
            small_blind,
            big_blind,
            self.ai.clone(),
        ));
        rooms.insert(room_id, room.clone());
        drop(rooms);

        tracing::info!(room = %room.id, host = %host.name, seats = total_seats, ai = ai_players, "room created");
        Ok((room, host))
    }

    pub async fn get_room(&self, room_id: &str) -> Result<Arc<Room>, ManagerError> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).cloned().ok_or(ManagerError::UnknownRoom)
    }

    pub async fn join_room(
        &self,
        room_id: &str,
        name: &str,
    ) -> Result<(Arc<Room>, Seat), ManagerError> {
        let room = self.get_room(room_id).await?;
        let seat = room.add_human(name).await?;
        Ok((room, seat))
    }

    /// Start the next hand, drive automated seats to a stable point, and
    /// return a snapshot for the host.
    pub async fn start_hand(
        &self,
        room_id: &str,
        player_id: &str,
        secret: &str,
    ) -> Result<RoomState, ManagerError> {
        let room = self.get_room(room_id).await?;
        room.start_hand(player_id, secret).await?;
        room.auto_play().await;
        Ok(room.snapshot_as(Some(player_id)).await)
    }

    /// Apply a human action, drive automated seats to a stable point, and
    /// return a snapshot for the actor.
    pub async fn submit_action(
        &self,
        room_id: &str,
        player_id: &str,
        secret: &str,
        action: &str,
        amount: u32,
    ) -> Result<RoomState, ManagerError> {
        let room = self.get_room(room_id).await?;
        room.submit_action(player_id, secret, action, amount).await?;
        room.auto_play().await;
        Ok(room.snapshot_as(Some(player_id)).await)
    }

    pub async fn fetch_state(
        &self,
        room_id: &str,
        player_id: Option<&str>,
        secret: Option<&str>,
    ) -> Result<RoomState, ManagerError> {
        let room = self.get_room(room_id).await?;
        let viewer = match (player_id, secret) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        };
        Ok(room.snapshot_checked(viewer).await?)
    }

    pub async fn list_rooms(&self) -> Vec<RoomSummary> {
        let rooms: Vec<Arc<Room>> = {
            let map = self.rooms.read().await;
            map.values().cloned().collect()
        };
        let mut summaries = Vec::with_capacity(rooms.len());
        for room in rooms {
            summaries.push(room.summary().await);
        }
        summaries
    }
}

fn new_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| {
            let index = rng.random_range(0..ROOM_CODE_ALPHABET.len());
            ROOM_CODE_ALPHABET[index] as char
        })
        .collect()
}
