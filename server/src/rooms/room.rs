//! A long-lived table: fixed seat budget, dealer rotation, one active hand.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;
use tokio::sync::RwLock;

use poker_shared::{ActionKind, Phase, RoomState, RoomSummary, SelfView};

use crate::ai::DeepSeekClient;
use crate::auth;
use crate::game::{GameError, Hand, Seat};
use crate::pretty;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room is full for human players")]
    HumanSeatsFull,
    #[error("room is at capacity")]
    RoomFull,
    #[error("only the host can start a hand")]
    NotHost,
    #[error("current hand is not finished yet")]
    HandInProgress,
    #[error("need at least two players with chips")]
    TooFewChipped,
    #[error("no active hand")]
    NoActiveHand,
    #[error("player not found")]
    UnknownPlayer,
    #[error("invalid player secret")]
    SecretMismatch,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Mutable room state, guarded by the room lock.
#[derive(Debug)]
pub(crate) struct RoomInner {
    pub(crate) players: Vec<Seat>,
    pub(crate) hand: Option<Hand>,
    pub(crate) dealer_index: Option<usize>,
    pub(crate) state_version: u64,
}

#[derive(Debug)]
pub struct Room {
    pub id: String,
    pub total_seats: usize,
    pub ai_requested: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub created_at: DateTime<Utc>,
    pub host_player_id: String,
    pub(crate) ai: Arc<DeepSeekClient>,
    pub(crate) inner: RwLock<RoomInner>,
}

impl Room {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        host: Seat,
        total_seats: usize,
        ai_requested: usize,
        starting_stack: u32,
        small_blind: u32,
        big_blind: u32,
        ai: Arc<DeepSeekClient>,
    ) -> Self {
        let host_player_id = host.id.clone();
        Room {
            id,
            total_seats,
            ai_requested,
            starting_stack,
            small_blind,
            big_blind,
            created_at: Utc::now(),
            host_player_id,
            ai,
            inner: RwLock::new(RoomInner {
                players: vec![host],
                hand: None,
                dealer_index: None,
                state_version: 1,
            }),
        }
    }

    /// ISO-8601 UTC timestamp with a trailing Z.
    pub fn created_at_label(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Seat a human player; returns the new seat with its credentials.
    pub async fn add_human(&self, name: &str) -> Result<Seat, RoomError> {
        let mut inner = self.inner.write().await;
        let seat = self.add_player_locked(&mut inner, name, false)?;
        tracing::info!(room = %self.id, player = %seat.name, seat = seat.seat_index, "player joined");
        Ok(seat)
    }

    fn add_player_locked(
        &self,
        inner: &mut RoomInner,
        name: &str,
        is_ai: bool,
    ) -> Result<Seat, RoomError> {
        if !is_ai {
            let humans = inner.players.iter().filter(|p| !p.is_ai).count();
            if humans >= self.total_seats - self.ai_requested {
                return Err(RoomError::HumanSeatsFull);
            }
        }
        if inner.players.len() >= self.total_seats {
            return Err(RoomError::RoomFull);
        }
        let mut seat = if is_ai {
            Seat::new_ai(name, self.starting_stack)
        } else {
            Seat::new_human(name, self.starting_stack, false)
        };
        seat.seat_index = inner.players.len();
        inner.players.push(seat.clone());
        inner.state_version += 1;
        Ok(seat)
    }

    /// Begin the next hand. Only the host may start; automated seats are
    /// spawned on demand so the table is full before the deal.
    pub async fn start_hand(&self, player_id: &str, secret: &str) -> Result<(), RoomError> {
        let mut inner = self.inner.write().await;
        let requester = verify_seat(&inner.players, player_id, secret)?;
        self.start_hand_locked(&mut inner, requester, &mut rand::rng())
    }

    fn start_hand_locked<R: Rng + ?Sized>(
        &self,
        inner: &mut RoomInner,
        requester: usize,
        rng: &mut R,
    ) -> Result<(), RoomError> {
        if inner.players[requester].id != self.host_player_id {
            return Err(RoomError::NotHost);
        }
        if inner.hand.as_ref().is_some_and(|hand| !hand.hand_over) {
            return Err(RoomError::HandInProgress);
        }
        self.spawn_ai_players_locked(inner)?;
        if inner.players.iter().filter(|p| p.stack > 0).count() < 2 {
            return Err(RoomError::TooFewChipped);
        }
        let dealer = next_dealer_position(inner, rng)?;
        inner.dealer_index = Some(dealer);
        let mut hand = Hand::new(dealer, self.small_blind, self.big_blind);
        hand.start(&mut inner.players, rng)?;
        tracing::info!(
            "{}",
            pretty::hand_header(
                &self.id,
                &inner.players[dealer].name,
                self.small_blind,
                self.big_blind
            )
        );
        inner.hand = Some(hand);
        inner.state_version += 1;
        Ok(())
    }

    fn spawn_ai_players_locked(&self, inner: &mut RoomInner) -> Result<(), RoomError> {
        let current_ai = inner.players.iter().filter(|p| p.is_ai).count();
        let needed = self.ai_requested.saturating_sub(current_ai);
        for offset in 0..needed {
            let name = format!("Bot {}", current_ai + offset + 1);
            self.add_player_locked(inner, &name, true)?;
        }
        Ok(())
    }

    /// Apply one human action. The raw label is parsed here so an unknown
    /// label surfaces as the same rule violation the engine would report.
    pub async fn submit_action(
        &self,
        player_id: &str,
        secret: &str,
        action: &str,
        amount: u32,
    ) -> Result<(), RoomError> {
        let mut inner = self.inner.write().await;
        let seat_index = verify_seat(&inner.players, player_id, secret)?;
        let RoomInner {
            players,
            hand,
            state_version,
            ..
        } = &mut *inner;
        let hand = hand.as_mut().ok_or(RoomError::NoActiveHand)?;
        let kind = ActionKind::from_label(action).ok_or(GameError::UnknownAction)?;
        hand.apply_action(players, seat_index, kind, amount)?;
        *state_version += 1;
        announce_if_finished(&self.id, hand);
        Ok(())
    }

    /// Snapshot from the point of view of an already-authenticated viewer
    /// (or no viewer at all).
    pub async fn snapshot_as(&self, viewer_id: Option<&str>) -> RoomState {
        let inner = self.inner.read().await;
        let viewer = viewer_id.and_then(|id| find_seat(&inner.players, id).ok());
        self.state_locked(&inner, viewer)
    }

    /// Snapshot for an external request; credentials are checked when
    /// present.
    pub async fn snapshot_checked(
        &self,
        viewer: Option<(&str, &str)>,
    ) -> Result<RoomState, RoomError> {
        let inner = self.inner.read().await;
        let viewer_index = match viewer {
            Some((player_id, secret)) => Some(verify_seat(&inner.players, player_id, secret)?),
            None => None,
        };
        Ok(self.state_locked(&inner, viewer_index))
    }

    pub async fn summary(&self) -> RoomSummary {
        let inner = self.inner.read().await;
        RoomSummary {
            room_id: self.id.clone(),
            total_seats: self.total_seats,
            ai_players: self.ai_requested,
            humans: inner.players.iter().filter(|p| !p.is_ai).count(),
            phase: inner
                .hand
                .as_ref()
                .map(|hand| hand.phase)
                .unwrap_or(Phase::Waiting),
            created_at: self.created_at_label(),
        }
    }

    fn state_locked(&self, inner: &RoomInner, viewer_index: Option<usize>) -> RoomState {
        let hand = inner.hand.as_ref();
        let reveal_all = hand.map(|h| h.hand_over).unwrap_or(false);
        let players = inner
            .players
            .iter()
            .enumerate()
            .map(|(index, seat)| {
                let own = viewer_index == Some(index);
                seat.public(reveal_all || own, own)
            })
            .collect();
        let seat_id = |index: Option<usize>| index.map(|i| inner.players[i].id.clone());
        let self_view = match (viewer_index, hand) {
            (Some(index), Some(hand)) => {
                let seat = &inner.players[index];
                Some(SelfView {
                    player_id: seat.id.clone(),
                    legal_actions: hand.legal_actions(seat),
                    to_call: hand.current_bet.saturating_sub(seat.bet),
                    stack: seat.stack,
                })
            }
            _ => None,
        };
        RoomState {
            room_id: self.id.clone(),
            total_seats: self.total_seats,
            ai_players: self.ai_requested,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            state_version: inner.state_version,
            created_at: self.created_at_label(),
            host_player_id: self.host_player_id.clone(),
            players,
            phase: hand.map(|h| h.phase).unwrap_or(Phase::Waiting),
            pot: hand.map(|h| h.pot).unwrap_or(0),
            current_bet: hand.map(|h| h.current_bet).unwrap_or(0),
            community_cards: hand.map(|h| h.community_cards.clone()).unwrap_or_default(),
            actions: hand.map(|h| h.actions.clone()).unwrap_or_default(),
            winners: hand.map(|h| h.winners.clone()).unwrap_or_default(),
            current_player_id: seat_id(hand.and_then(|h| h.current_player_index)),
            last_event: hand.and_then(|h| h.last_event.clone()),
            dealer_player_id: seat_id(hand.map(|h| h.dealer_index)),
            small_blind_player_id: seat_id(hand.and_then(|h| h.small_blind_index)),
            big_blind_player_id: seat_id(hand.and_then(|h| h.big_blind_index)),
            self_view,
        }
    }
}

/// Index of the seat with `player_id`.
pub(crate) fn find_seat(players: &[Seat], player_id: &str) -> Result<usize, RoomError> {
    players
        .iter()
        .position(|seat| seat.id == player_id)
        .ok_or(RoomError::UnknownPlayer)
}

/// Index of the seat with `player_id`, after checking its secret.
pub(crate) fn verify_seat(
    players: &[Seat],
    player_id: &str,
    secret: &str,
) -> Result<usize, RoomError> {
    let index = find_seat(players, player_id)?;
    if !auth::secrets_match(&players[index].secret, secret) {
        return Err(RoomError::SecretMismatch);
    }
    Ok(index)
}

/// First hand: uniform among chipped seats. Afterwards: the next chipped
/// seat clockwise from the previous dealer.
fn next_dealer_position<R: Rng + ?Sized>(
    inner: &RoomInner,
    rng: &mut R,
) -> Result<usize, RoomError> {
    let alive: Vec<usize> = inner
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.stack > 0 && !p.busted)
        .map(|(i, _)| i)
        .collect();
    if alive.is_empty() {
        return Err(RoomError::TooFewChipped);
    }
    match inner.dealer_index {
        None => alive.choose(rng).copied().ok_or(RoomError::TooFewChipped),
        Some(previous) => {
            let len = inner.players.len();
            let next = (1..=len)
                .map(|offset| (previous + offset) % len)
                .find(|idx| alive.contains(idx));
            Ok(next.unwrap_or(alive[0]))
        }
    }
}

pub(crate) fn announce_if_finished(room_id: &str, hand: &Hand) {
    if hand.hand_over {
        if let Some(event) = hand.last_event.as_deref() {
            tracing::info!(room = %room_id, "{}", pretty::winner_banner(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_room(total_seats: usize, ai_requested: usize) -> Room {
        let ai = Arc::new(DeepSeekClient::new(&Settings::default()).unwrap());
        let host = Seat::new_human("Host", 1000, true);
        Room::new(
            "TEST01".to_string(),
            host,
            total_seats,
            ai_requested,
            1000,
            10,
            20,
            ai,
        )
    }

    #[tokio::test]
    async fn seat_budget_is_enforced() {
        let room = test_room(3, 1);
        room.add_human("Bob").await.unwrap();
        // Two human slots are taken; the third seat is reserved for the bot.
        let err = room.add_human("Carl").await.unwrap_err();
        assert!(matches!(err, RoomError::HumanSeatsFull));
    }

    #[tokio::test]
    async fn only_the_host_starts_hands() {
        let room = test_room(3, 1);
        let bob = room.add_human("Bob").await.unwrap();
        let err = room.start_hand(&bob.id, &bob.secret).await.unwrap_err();
        assert!(matches!(err, RoomError::NotHost));
    }

    #[tokio::test]
    async fn starting_spawns_ai_seats_and_deals() {
        let room = test_room(3, 2);
        let host_id = room.host_player_id.clone();
        let host_secret = {
            let inner = room.inner.read().await;
            inner.players[0].secret.clone()
        };
        room.start_hand(&host_id, &host_secret).await.unwrap();

        let inner = room.inner.read().await;
        assert_eq!(inner.players.len(), 3);
        assert!(inner.players[1].is_ai && inner.players[2].is_ai);
        assert_eq!(inner.players[1].name, "Bot 1");
        assert!(inner.players[1].secret.is_empty());
        let hand = inner.hand.as_ref().unwrap();
        assert_eq!(hand.phase, Phase::Preflop);
        assert_eq!(hand.pot, 30);
    }

    #[tokio::test]
    async fn second_start_requires_finished_hand() {
        let room = test_room(2, 1);
        let host_id = room.host_player_id.clone();
        let host_secret = {
            let inner = room.inner.read().await;
            inner.players[0].secret.clone()
        };
        room.start_hand(&host_id, &host_secret).await.unwrap();
        let err = room.start_hand(&host_id, &host_secret).await.unwrap_err();
        assert!(matches!(err, RoomError::HandInProgress));
    }

    #[tokio::test]
    async fn secrets_gate_actions_and_private_state() {
        let room = test_room(2, 1);
        let host_id = room.host_player_id.clone();
        let err = room
            .submit_action(&host_id, "wrong-secret", "fold", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, RoomError::SecretMismatch));

        let err = room
            .snapshot_checked(Some((&host_id, "wrong-secret")))
            .await
            .unwrap_err();
        assert!(matches!(err, RoomError::SecretMismatch));

        let err = room
            .snapshot_checked(Some(("missing", "whatever")))
            .await
            .unwrap_err();
        assert!(matches!(err, RoomError::UnknownPlayer));

        // With good credentials but no deal yet, actions have nowhere to go.
        let host_secret = {
            let inner = room.inner.read().await;
            inner.players[0].secret.clone()
        };
        let err = room
            .submit_action(&host_id, &host_secret, "check", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, RoomError::NoActiveHand));
    }

    #[tokio::test]
    async fn snapshot_hides_other_seats_cards_until_hand_over() {
        use poker_shared::CardsView;

        let room = test_room(2, 1);
        let host_id = room.host_player_id.clone();
        let host_secret = {
            let inner = room.inner.read().await;
            inner.players[0].secret.clone()
        };
        room.start_hand(&host_id, &host_secret).await.unwrap();

        // The host sees its own cards and secret, but not the bot's.
        let state = room.snapshot_as(Some(&host_id)).await;
        assert_eq!(state.players[0].id, host_id);
        assert!(
            matches!(state.players[0].cards, CardsView::Revealed(ref cards) if cards.len() == 2)
        );
        assert!(state.players[0].secret.is_some());
        assert_eq!(state.players[1].cards, CardsView::Hidden(2));
        assert!(state.players[1].secret.is_none());
        assert!(state.self_view.is_some());

        // An anonymous viewer sees nothing private.
        let state = room.snapshot_as(None).await;
        for seat in &state.players {
            assert_eq!(seat.cards, CardsView::Hidden(2));
            assert!(seat.secret.is_none());
        }
        assert!(state.self_view.is_none());
    }

    #[tokio::test]
    async fn state_version_strictly_increases() {
        let room = test_room(3, 1);
        let v1 = room.snapshot_as(None).await.state_version;
        room.add_human("Bob").await.unwrap();
        let v2 = room.snapshot_as(None).await.state_version;
        assert!(v2 > v1);

        let host_id = room.host_player_id.clone();
        let host_secret = {
            let inner = room.inner.read().await;
            inner.players[0].secret.clone()
        };
        room.start_hand(&host_id, &host_secret).await.unwrap();
        let v3 = room.snapshot_as(None).await.state_version;
        assert!(v3 > v2);
    }

    #[test]
    fn dealer_rotates_to_the_next_chipped_seat() {
        let mut inner = RoomInner {
            players: vec![
                Seat::new_human("A", 100, true),
                Seat::new_human("B", 0, false),
                Seat::new_human("C", 100, false),
            ],
            hand: None,
            dealer_index: Some(0),
            state_version: 1,
        };
        let mut rng = StdRng::seed_from_u64(4);
        // Seat 1 has no chips; rotation from 0 skips to seat 2.
        assert_eq!(next_dealer_position(&inner, &mut rng).unwrap(), 2);

        inner.dealer_index = None;
        let first = next_dealer_position(&inner, &mut rng).unwrap();
        assert!(first == 0 || first == 2);
    }
}
