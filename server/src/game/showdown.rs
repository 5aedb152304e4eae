//! Showdown resolution and pot awarding.

use std::cmp::Ordering;

use poker_shared::{Phase, WinnerEntry};

use super::{Hand, Seat};
use crate::poker::evaluation::{compare_strength, evaluate_best_hand, HandStrength};

impl Hand {
    /// Run the board out if needed, evaluate every live seat and split the
    /// pot among the best. Remainder chips go one at a time to the earliest
    /// winners in seat order.
    pub(crate) fn resolve_showdown(&mut self, seats: &mut [Seat]) {
        self.deal_remaining_board();
        let contenders: Vec<usize> = (0..seats.len())
            .filter(|&i| seats[i].in_hand())
            .collect();
        if contenders.is_empty() {
            self.finish_hand_empty("no players left");
            return;
        }
        let scored: Vec<(usize, HandStrength)> = contenders
            .into_iter()
            .map(|i| {
                let strength =
                    evaluate_best_hand(&seats[i].hole_cards, &self.community_cards);
                (i, strength)
            })
            .collect();
        let best = scored
            .iter()
            .map(|(_, s)| s)
            .max_by(|a, b| compare_strength(a, b))
            .cloned();
        let Some(best) = best else {
            self.finish_hand_empty("no players left");
            return;
        };
        let winners: Vec<usize> = scored
            .iter()
            .filter(|(_, s)| compare_strength(s, &best) == Ordering::Equal)
            .map(|(i, _)| *i)
            .collect();
        self.award_pot(seats, &winners, Some(&best));
    }

    /// Everyone else folded; the last seat standing takes the pot unseen.
    pub(crate) fn finish_single_player(&mut self, seats: &mut [Seat]) {
        let remaining: Vec<usize> = (0..seats.len())
            .filter(|&i| seats[i].in_hand())
            .collect();
        match remaining.first() {
            Some(&winner) => self.award_pot(seats, &[winner], None),
            None => self.finish_hand_empty("hand aborted"),
        }
    }

    fn award_pot(&mut self, seats: &mut [Seat], winners: &[usize], strength: Option<&HandStrength>) {
        if winners.is_empty() {
            self.finish_hand_empty("no players left");
            return;
        }
        let share = self.pot / winners.len() as u32;
        let remainder = self.pot % winners.len() as u32;
        for (position, &idx) in winners.iter().enumerate() {
            let extra = if (position as u32) < remainder { 1 } else { 0 };
            seats[idx].stack += share + extra;
        }
        let names: Vec<&str> = winners.iter().map(|&i| seats[i].name.as_str()).collect();
        self.last_event = Some(format!("{} won {} chips", names.join(", "), self.pot));
        let hand_name = strength
            .map(|s| s.category.name().to_string())
            .unwrap_or_else(|| "No contest".to_string());
        self.winners = winners
            .iter()
            .map(|&i| WinnerEntry {
                player_id: seats[i].id.clone(),
                player_name: seats[i].name.clone(),
                hand: hand_name.clone(),
                cards: seats[i].hole_cards.clone(),
            })
            .collect();
        self.pot = 0;
        self.hand_over = true;
        self.current_player_index = None;
        self.phase = Phase::Showdown;
    }

    fn finish_hand_empty(&mut self, message: &str) {
        self.winners.clear();
        self.last_event = Some(message.to_string());
        self.pot = 0;
        self.hand_over = true;
        self.current_player_index = None;
        self.phase = Phase::Showdown;
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{rigged_deck, seats};
    use super::*;
    use poker_shared::ActionKind;

    #[test]
    fn split_pot_gives_odd_chip_to_earliest_seat() {
        // Three seats, dealer 2: seat 0 posts SB 1, seat 1 posts BB 2.
        // Both contenders end up playing the board's straight flush.
        let mut table = seats(&[1000, 1000, 1000]);
        let mut hand = Hand::new(2, 1, 2);
        let deck = rigged_deck(&[
            // Hole cards: pass one (seats 0, 1, 2), pass two.
            "2H", "3H", "4H", "2D", "3D", "4D",
            // Board: straight flush in spades.
            "5S", "6S", "7S", "8S", "9S",
        ]);
        hand.start_with_deck(&mut table, deck).unwrap();

        // Seat 2 raises to 100, seat 0 folds, seat 1 calls: pot 201.
        hand.apply_action(&mut table, 2, ActionKind::Raise, 100)
            .unwrap();
        hand.apply_action(&mut table, 0, ActionKind::Fold, 0).unwrap();
        hand.apply_action(&mut table, 1, ActionKind::Call, 0).unwrap();

        // Check the hand down to showdown.
        while !hand.hand_over {
            let idx = hand.current_player_index.unwrap();
            hand.apply_action(&mut table, idx, ActionKind::Check, 0)
                .unwrap();
        }

        assert_eq!(hand.winners.len(), 2);
        assert_eq!(hand.winners[0].player_id, table[1].id);
        assert_eq!(hand.winners[0].hand, "Straight Flush");
        // Pot of 201: seat 1 is first in seat order and takes the odd chip.
        assert_eq!(table[1].stack, 1000 - 100 + 101);
        assert_eq!(table[2].stack, 1000 - 100 + 100);
        assert_eq!(table[0].stack, 999);
        assert_eq!(hand.pot, 0);
    }

    #[test]
    fn winner_entries_reveal_hole_cards() {
        let mut table = seats(&[100, 100]);
        let mut hand = Hand::new(1, 10, 20);
        let deck = rigged_deck(&[
            "AS", "2C", "AD", "7D", // seat 0 gets AS AD; seat 1 gets 2C 7D
            "AH", "KC", "QD", "3C", "8H",
        ]);
        hand.start_with_deck(&mut table, deck).unwrap();

        hand.apply_action(&mut table, 0, ActionKind::Call, 0).unwrap();
        while !hand.hand_over {
            let idx = hand.current_player_index.unwrap();
            hand.apply_action(&mut table, idx, ActionKind::Check, 0)
                .unwrap();
        }

        assert_eq!(hand.winners.len(), 1);
        let winner = &hand.winners[0];
        assert_eq!(winner.player_id, table[0].id);
        assert_eq!(winner.hand, "Three of a Kind");
        assert_eq!(
            winner.cards,
            table[0].hole_cards,
        );
        assert_eq!(
            hand.last_event.as_deref(),
            Some("P0 won 40 chips")
        );
    }
}
