//! Auto-play loop for automated seats.
//!
//! The single most important rule here: the room lock is NOT held while the
//! adapter's network call is in flight. Each iteration snapshots the
//! decision context under the lock, releases it, asks the adapter, then
//! reacquires the lock and re-checks that the table still looks the way it
//! did before applying anything.

use poker_shared::ActionKind;

use super::room::{announce_if_finished, Room, RoomInner};

impl Room {
    /// Drive automated seats until a human is to act, the hand ends, or
    /// there is no hand. Yields between iterations so other room work can
    /// interleave.
    pub async fn auto_play(&self) {
        loop {
            let (actor_index, ctx) = {
                let inner = self.inner.read().await;
                let Some(hand) = inner.hand.as_ref().filter(|hand| !hand.hand_over) else {
                    return;
                };
                let Some(index) = hand.current_player_index else {
                    return;
                };
                if !inner.players[index].is_ai {
                    return;
                }
                (index, hand.build_ai_context(&inner.players[index]))
            };

            let decision = self.ai.choose_action(&ctx).await;

            {
                let mut inner = self.inner.write().await;
                let RoomInner {
                    players,
                    hand,
                    state_version,
                    ..
                } = &mut *inner;
                let Some(hand) = hand.as_mut().filter(|hand| !hand.hand_over) else {
                    return;
                };
                // Re-check: another request may have moved the table on
                // while the adapter was thinking.
                match hand.current_player_index {
                    Some(index) if index == actor_index && players[index].is_ai => {
                        let applied = ActionKind::from_label(&decision.action)
                            .map(|kind| {
                                hand.apply_action(players, index, kind, decision.amount)
                                    .is_ok()
                            })
                            .unwrap_or(false);
                        if !applied {
                            let (kind, amount) = hand.fallback_action(&players[index]);
                            if let Err(err) = hand.apply_action(players, index, kind, amount) {
                                tracing::error!(
                                    room = %self.id,
                                    error = %err,
                                    "fallback action rejected; stopping auto-play"
                                );
                                return;
                            }
                        }
                        *state_version += 1;
                        announce_if_finished(&self.id, hand);
                    }
                    _ => continue,
                }
            }

            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poker_shared::Phase;

    use crate::ai::DeepSeekClient;
    use crate::config::Settings;
    use crate::game::Seat;
    use crate::rooms::Room;

    fn room_with_bots(total_seats: usize, ai_requested: usize) -> Room {
        // No API key configured: the adapter answers with its
        // deterministic fallback, which keeps these tests offline.
        let ai = Arc::new(DeepSeekClient::new(&Settings::default()).unwrap());
        let host = Seat::new_human("Host", 1000, true);
        Room::new(
            "DRIVE1".to_string(),
            host,
            total_seats,
            ai_requested,
            1000,
            10,
            20,
            ai,
        )
    }

    async fn host_credentials(room: &Room) -> (String, String) {
        let inner = room.inner.read().await;
        (inner.players[0].id.clone(), inner.players[0].secret.clone())
    }

    #[tokio::test]
    async fn bots_act_until_the_human_holds_the_turn() {
        let room = room_with_bots(3, 2);
        let (host_id, host_secret) = host_credentials(&room).await;
        room.start_hand(&host_id, &host_secret).await.unwrap();
        room.auto_play().await;

        let inner = room.inner.read().await;
        let hand = inner.hand.as_ref().unwrap();
        if !hand.hand_over {
            let current = hand.current_player_index.unwrap();
            assert!(!inner.players[current].is_ai);
        }
    }

    #[tokio::test]
    async fn fallback_checks_a_hand_down_after_the_human_calls() {
        let room = room_with_bots(2, 1);
        let (host_id, host_secret) = host_credentials(&room).await;
        room.start_hand(&host_id, &host_secret).await.unwrap();
        room.auto_play().await;

        // Play the human side with the same safe policy until the hand
        // resolves; the bot keeps answering with check/call fallbacks.
        let mut guard = 0;
        loop {
            let action = {
                let inner = room.inner.read().await;
                let hand = inner.hand.as_ref().unwrap();
                if hand.hand_over {
                    break;
                }
                let index = hand.current_player_index.unwrap();
                assert!(!inner.players[index].is_ai);
                let (kind, _) = hand.fallback_action(&inner.players[index]);
                kind.label()
            };
            room.submit_action(&host_id, &host_secret, action, 0)
                .await
                .unwrap();
            room.auto_play().await;
            guard += 1;
            assert!(guard < 16, "hand did not resolve");
        }

        let inner = room.inner.read().await;
        let hand = inner.hand.as_ref().unwrap();
        assert_eq!(hand.phase, Phase::Showdown);
        assert!(!hand.winners.is_empty());
        // Chips were conserved end to end.
        assert_eq!(inner.players.iter().map(|p| p.stack).sum::<u32>(), 2000);
    }
}
