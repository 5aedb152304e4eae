//! Hand start: shuffle, hole cards, blinds, first to act.

use rand::seq::SliceRandom;
use rand::Rng;

use poker_shared::{Card, Phase};

use super::flow::iter_from;
use super::{GameError, Hand, Seat};
use crate::poker::fresh_deck;

impl Hand {
    /// Start the deal: reset seats, shuffle, deal hole cards, post blinds
    /// and hand the action to the first seat after the big blind.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        seats: &mut [Seat],
        rng: &mut R,
    ) -> Result<(), GameError> {
        let mut deck = fresh_deck();
        deck.shuffle(rng);
        self.start_with_deck(seats, deck)
    }

    /// Same as [`Hand::start`] with the shuffled deck supplied by the
    /// caller. Cards are drawn from the tail.
    pub(crate) fn start_with_deck(
        &mut self,
        seats: &mut [Seat],
        deck: Vec<Card>,
    ) -> Result<(), GameError> {
        let eligible = seats
            .iter()
            .filter(|s| s.stack > 0 && !s.busted)
            .count();
        if eligible < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        self.deck = deck;
        for (index, seat) in seats.iter_mut().enumerate() {
            seat.seat_index = index;
            seat.reset_for_new_hand();
        }
        self.community_cards.clear();
        self.pot = 0;
        self.phase = Phase::Preflop;
        self.current_bet = 0;
        self.min_raise = self.big_blind;
        self.actions.clear();
        self.winners.clear();
        self.hand_over = false;
        self.last_event = None;

        self.deal_hole_cards(seats);

        let sb_index = self
            .next_active_index(seats, Some(self.dealer_index))
            .ok_or(GameError::NotEnoughPlayers)?;
        let bb_index = self
            .next_active_index(seats, Some(sb_index))
            .ok_or(GameError::NotEnoughPlayers)?;
        self.small_blind_index = Some(sb_index);
        self.big_blind_index = Some(bb_index);
        self.post_blind(seats, sb_index, self.small_blind, "small_blind");
        self.post_blind(seats, bb_index, self.big_blind, "big_blind");

        self.current_bet = seats.iter().map(|s| s.bet).max().unwrap_or(0);
        self.min_raise = self.big_blind;
        self.current_player_index = self.next_active_index(seats, Some(bb_index));
        if self.current_player_index.is_none() {
            self.resolve_showdown(seats);
        }
        Ok(())
    }

    /// One card per eligible seat, starting left of the dealer, then a
    /// second pass.
    fn deal_hole_cards(&mut self, seats: &mut [Seat]) {
        for _ in 0..2 {
            for idx in iter_from(self.dealer_index, seats.len()) {
                let seat = &mut seats[idx];
                if seat.stack == 0 || seat.busted {
                    continue;
                }
                if let Some(card) = self.deck.pop() {
                    seat.hole_cards.push(card);
                }
            }
        }
    }

    /// Post a blind, short if the stack cannot cover it. Does not set
    /// `has_acted`.
    fn post_blind(&mut self, seats: &mut [Seat], index: usize, amount: u32, label: &str) {
        let chips = seats[index].stack.min(amount);
        self.commit(&mut seats[index], chips);
        let seat = &seats[index];
        self.record(seat, label, chips);
    }

    /// The single chip-moving routine: clamp to the stack, move chips into
    /// the pot, flag an all-in when the stack empties.
    pub(crate) fn commit(&mut self, seat: &mut Seat, amount: u32) {
        let amount = amount.min(seat.stack);
        seat.stack -= amount;
        seat.bet += amount;
        self.pot += amount;
        if seat.stack == 0 && amount > 0 {
            seat.all_in = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{rigged_deck, seats, total_chips};
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn requires_two_chipped_seats() {
        let mut solo = seats(&[1000]);
        let mut hand = Hand::new(0, 10, 20);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            hand.start(&mut solo, &mut rng),
            Err(GameError::NotEnoughPlayers)
        );

        let mut broke = seats(&[1000, 0]);
        assert_eq!(
            hand.start(&mut broke, &mut rng),
            Err(GameError::NotEnoughPlayers)
        );
    }

    #[test]
    fn blinds_wrap_around_the_dealer() {
        let mut table = seats(&[1000, 1000, 1000]);
        let mut hand = Hand::new(2, 10, 20);
        let mut rng = StdRng::seed_from_u64(7);
        hand.start(&mut table, &mut rng).unwrap();

        assert_eq!(hand.small_blind_index, Some(0));
        assert_eq!(hand.big_blind_index, Some(1));
        assert_eq!(hand.current_player_index, Some(2));
        assert_eq!(table[0].bet, 10);
        assert_eq!(table[1].bet, 20);
        assert_eq!(hand.pot, 30);
        assert_eq!(hand.current_bet, 20);
        assert_eq!(hand.min_raise, 20);
    }

    #[test]
    fn blind_records_do_not_mark_seats_acted() {
        let mut table = seats(&[1000, 1000]);
        let mut hand = Hand::new(0, 10, 20);
        let mut rng = StdRng::seed_from_u64(3);
        hand.start(&mut table, &mut rng).unwrap();

        let labels: Vec<&str> = hand.actions.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(labels, vec!["small_blind", "big_blind"]);
        assert!(hand.actions.iter().all(|r| r.phase == Phase::Preflop));
        assert!(table.iter().all(|s| !s.has_acted));
    }

    #[test]
    fn short_stack_blind_goes_all_in() {
        let mut table = seats(&[1000, 5, 1000]);
        let mut hand = Hand::new(0, 10, 20);
        let mut rng = StdRng::seed_from_u64(9);
        hand.start(&mut table, &mut rng).unwrap();

        // Seat 1 is the small blind but can only post 5.
        assert_eq!(hand.small_blind_index, Some(1));
        assert!(table[1].all_in);
        assert_eq!(table[1].bet, 5);
        assert_eq!(hand.actions[0].amount, 5);
        assert_eq!(hand.pot, 25);
    }

    #[test]
    fn every_eligible_seat_gets_two_cards() {
        let mut table = seats(&[1000, 0, 1000, 1000]);
        table[1].busted = true;
        let mut hand = Hand::new(0, 10, 20);
        let mut rng = StdRng::seed_from_u64(11);
        hand.start(&mut table, &mut rng).unwrap();

        assert_eq!(table[0].hole_cards.len(), 2);
        assert!(table[1].hole_cards.is_empty());
        assert_eq!(table[2].hole_cards.len(), 2);
        assert_eq!(table[3].hole_cards.len(), 2);
        assert_eq!(hand.deck.len(), 52 - 6);
        assert_eq!(total_chips(&table, &hand), 3000);
    }

    #[test]
    fn rigged_deck_deals_in_pass_order() {
        let mut table = seats(&[1000, 1000]);
        let mut hand = Hand::new(0, 10, 20);
        // Dealer 0: first pass seat 1 then seat 0, second pass the same.
        let deck = rigged_deck(&["AS", "KS", "QS", "JS"]);
        hand.start_with_deck(&mut table, deck).unwrap();

        assert_eq!(table[1].hole_cards[0].label(), "AS");
        assert_eq!(table[0].hole_cards[0].label(), "KS");
        assert_eq!(table[1].hole_cards[1].label(), "QS");
        assert_eq!(table[0].hole_cards[1].label(), "JS");
    }
}
