//! Turn iteration, round completion and board advancement.

use poker_shared::Phase;

use super::{Hand, Seat};
use crate::pretty::board_line;

/// Clockwise scan of seat indexes starting after `start`, wrapping once.
pub(crate) fn iter_from(start: usize, len: usize) -> impl Iterator<Item = usize> {
    (1..=len).map(move |offset| (start + offset) % len)
}

impl Hand {
    /// First seat after `start` that can still put chips in: in the hand,
    /// not all-in, chips behind.
    pub(crate) fn next_active_index(
        &self,
        seats: &[Seat],
        start: Option<usize>,
    ) -> Option<usize> {
        let start = start?;
        iter_from(start, seats.len()).find(|&idx| {
            let seat = &seats[idx];
            seat.in_hand() && !seat.all_in && seat.stack > 0
        })
    }

    /// Seat that still owes action this round: unmatched bet, or has not
    /// acted yet (the big blind's option lives here).
    fn find_next_to_act(&self, seats: &[Seat]) -> Option<usize> {
        let current = self.current_player_index?;
        iter_from(current, seats.len()).find(|&idx| {
            let seat = &seats[idx];
            if !seat.in_hand() || seat.all_in {
                return false;
            }
            seat.bet != self.current_bet || !seat.has_acted
        })
    }

    pub(crate) fn advance_turn_or_round(&mut self, seats: &mut [Seat]) {
        match self.find_next_to_act(seats) {
            Some(next) => self.current_player_index = Some(next),
            None => self.complete_betting_round(seats),
        }
    }

    /// Close the street: clear per-round state, deal the next board cards,
    /// and hand the action to the first live seat after the dealer.
    fn complete_betting_round(&mut self, seats: &mut [Seat]) {
        for seat in seats.iter_mut() {
            seat.bet = 0;
            seat.has_acted = false;
        }
        self.current_bet = 0;
        self.min_raise = self.big_blind;
        if self.phase == Phase::River {
            self.resolve_showdown(seats);
            return;
        }
        self.advance_board();
        self.current_player_index = self.next_active_index(seats, Some(self.dealer_index));
        if self.current_player_index.is_none() {
            self.resolve_showdown(seats);
        }
    }

    fn advance_board(&mut self) {
        match self.phase {
            Phase::Preflop => {
                self.phase = Phase::Flop;
                for _ in 0..3 {
                    if let Some(card) = self.deck.pop() {
                        self.community_cards.push(card);
                    }
                }
                tracing::debug!(board = %board_line(&self.community_cards), "flop");
            }
            Phase::Flop => {
                self.phase = Phase::Turn;
                if let Some(card) = self.deck.pop() {
                    self.community_cards.push(card);
                }
                tracing::debug!(board = %board_line(&self.community_cards), "turn");
            }
            Phase::Turn => {
                self.phase = Phase::River;
                if let Some(card) = self.deck.pop() {
                    self.community_cards.push(card);
                }
                tracing::debug!(board = %board_line(&self.community_cards), "river");
            }
            _ => {}
        }
    }

    /// Run the board out to five cards; used when everyone is all-in
    /// before the river.
    pub(crate) fn deal_remaining_board(&mut self) {
        while self.community_cards.len() < 5 {
            match self.deck.pop() {
                Some(card) => self.community_cards.push(card),
                None => break,
            }
        }
    }
}
