//! Deck construction and hand evaluation. Pure functions over cards.

pub mod evaluation;

use poker_shared::{Card, RANKS, SUITS};

/// The full 52-card deck in a deterministic order (rank-major, deuces
/// first). Callers shuffle before use; cards are drawn from the tail.
pub fn fresh_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &rank in &RANKS {
        for &suit in &SUITS {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}
