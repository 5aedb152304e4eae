//! The per-deal betting state machine.
//!
//! A [`Hand`] owns the deck, board, pot and turn state for a single deal.
//! It never owns the seats: the room passes its seat list into every call,
//! and the hand addresses seats by index. Implementation is split across
//! sibling modules: dealing, betting, turn flow, showdown, AI context.

mod betting;
mod context;
mod dealing;
mod flow;
mod seat;
mod showdown;

pub use context::AiContext;
pub use seat::Seat;

use poker_shared::{ActionRecord, Card, Phase, WinnerEntry};
use thiserror::Error;

/// Rule violations surfaced by the hand. Any failed action leaves the hand
/// exactly as it was: every branch validates fully before the single commit
/// routine moves chips.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("not enough players with chips")]
    NotEnoughPlayers,
    #[error("hand already finished")]
    HandOver,
    #[error("not this player's turn")]
    WrongTurn,
    #[error("unknown action")]
    UnknownAction,
    #[error("cannot check facing a bet")]
    CannotCheck,
    #[error("nothing to call")]
    NothingToCall,
    #[error("bet not allowed, must raise")]
    BetNotAllowed,
    #[error("bet must be at least the big blind")]
    BelowMinBet,
    #[error("insufficient chips to bet")]
    InsufficientChips,
    #[error("nothing to raise")]
    NothingToRaise,
    #[error("raise must increase bet")]
    RaiseMustIncrease,
    #[error("raise must exceed call amount")]
    RaiseMustExceedCall,
}

/// State of one deal.
#[derive(Clone, Debug)]
pub struct Hand {
    pub dealer_index: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub deck: Vec<Card>,
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub phase: Phase,
    /// Highest per-seat `bet` this betting round.
    pub current_bet: u32,
    /// Minimum legal raise increment.
    pub min_raise: u32,
    pub current_player_index: Option<usize>,
    pub actions: Vec<ActionRecord>,
    pub hand_over: bool,
    pub winners: Vec<WinnerEntry>,
    pub last_event: Option<String>,
    pub small_blind_index: Option<usize>,
    pub big_blind_index: Option<usize>,
}

impl Hand {
    pub fn new(dealer_index: usize, small_blind: u32, big_blind: u32) -> Self {
        Hand {
            dealer_index,
            small_blind,
            big_blind,
            deck: Vec::new(),
            community_cards: Vec::new(),
            pot: 0,
            phase: Phase::Waiting,
            current_bet: 0,
            min_raise: big_blind,
            current_player_index: None,
            actions: Vec::new(),
            hand_over: false,
            winners: Vec::new(),
            last_event: None,
            small_blind_index: None,
            big_blind_index: None,
        }
    }

    /// Append an action record for `seat` with the current phase.
    pub(crate) fn record(&mut self, seat: &Seat, action: &str, amount: u32) {
        self.actions.push(ActionRecord {
            player_id: seat.id.clone(),
            player_name: seat.name.clone(),
            action: action.to_string(),
            amount,
            phase: self.phase,
        });
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    /// Seats with the given stacks, named "P0", "P1", …
    pub(crate) fn seats(stacks: &[u32]) -> Vec<Seat> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &stack)| Seat::new_human(&format!("P{}", i), stack, false))
            .collect()
    }

    /// Total chips across seats plus the pot; conserved until awarding.
    pub(crate) fn total_chips(seats: &[Seat], hand: &Hand) -> u32 {
        seats.iter().map(|s| s.stack).sum::<u32>() + hand.pot
    }

    /// A full deck rearranged so the listed labels are drawn first, in
    /// order. Dealing pops from the tail: first hole-card pass starting
    /// left of the dealer, second pass, then flop, turn, river.
    pub(crate) fn rigged_deck(draw_order: &[&str]) -> Vec<Card> {
        let chosen: Vec<Card> = draw_order
            .iter()
            .map(|l| Card::from_label(l).expect("bad label in test deck"))
            .collect();
        let mut deck: Vec<Card> = crate::poker::fresh_deck()
            .into_iter()
            .filter(|c| !chosen.contains(c))
            .collect();
        deck.extend(chosen.iter().rev());
        deck
    }
}
