//! Room snapshot schema.
//!
//! A snapshot is everything a client needs to render a room. Hole cards are
//! collapsed to a count unless the hand is over or the viewer owns the seat;
//! the viewer's own seat additionally carries its secret, and a `self`
//! object with the legal actions.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{ActionKind, ActionRecord, Phase};

/// Hole cards as seen by a particular viewer: a count while hidden, the
/// labels once revealed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CardsView {
    Hidden(usize),
    Revealed(Vec<Card>),
}

/// One seat as it appears in a snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeatPublic {
    pub id: String,
    pub name: String,
    pub stack: u32,
    pub bet: u32,
    pub seat: usize,
    pub is_ai: bool,
    pub is_host: bool,
    pub folded: bool,
    pub all_in: bool,
    pub busted: bool,
    pub cards: CardsView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// A showdown (or fold-out) winner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WinnerEntry {
    pub player_id: String,
    pub player_name: String,
    pub hand: String,
    pub cards: Vec<Card>,
}

/// Viewer-private fields, present when the viewer is a seat in the room.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelfView {
    pub player_id: String,
    pub legal_actions: Vec<ActionKind>,
    pub to_call: u32,
    pub stack: u32,
}

/// Full room snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomState {
    pub room_id: String,
    pub total_seats: usize,
    pub ai_players: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub state_version: u64,
    pub created_at: String,
    pub host_player_id: String,
    pub players: Vec<SeatPublic>,
    pub phase: Phase,
    pub pot: u32,
    pub current_bet: u32,
    pub community_cards: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    pub winners: Vec<WinnerEntry>,
    pub current_player_id: Option<String>,
    pub last_event: Option<String>,
    pub dealer_player_id: Option<String>,
    pub small_blind_player_id: Option<String>,
    pub big_blind_player_id: Option<String>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_view: Option<SelfView>,
}

/// Row of the room listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: String,
    pub total_seats: usize,
    pub ai_players: usize,
    pub humans: usize,
    pub phase: Phase,
    pub created_at: String,
}
