//! Seat state: one player's chips, flags and hole cards.

use poker_shared::{Card, CardsView, SeatPublic};

use crate::auth;

/// A seat at the table. Identity is stable for the life of the room; the
/// per-hand flags are reset by [`Seat::reset_for_new_hand`].
#[derive(Clone, Debug)]
pub struct Seat {
    pub id: String,
    pub name: String,
    pub stack: u32,
    /// Opaque token used by the API to authenticate actions. Automated
    /// seats carry an empty secret.
    pub secret: String,
    pub is_ai: bool,
    pub is_host: bool,
    pub seat_index: usize,
    /// Chips committed this betting round.
    pub bet: u32,
    pub folded: bool,
    pub all_in: bool,
    /// Sticky across hands once the stack is empty at the start of a deal.
    pub busted: bool,
    pub has_acted: bool,
    pub hole_cards: Vec<Card>,
}

impl Seat {
    pub fn new_human(name: &str, stack: u32, is_host: bool) -> Self {
        Seat {
            id: auth::new_player_id(),
            name: name.to_string(),
            stack,
            secret: auth::new_secret(),
            is_ai: false,
            is_host,
            seat_index: 0,
            bet: 0,
            folded: false,
            all_in: false,
            busted: false,
            has_acted: false,
            hole_cards: Vec::new(),
        }
    }

    pub fn new_ai(name: &str, stack: u32) -> Self {
        Seat {
            secret: String::new(),
            is_ai: true,
            ..Seat::new_human(name, stack, false)
        }
    }

    /// Reset per-hand state. A seat that starts a hand with no chips is
    /// busted from then on.
    pub fn reset_for_new_hand(&mut self) {
        if self.stack == 0 {
            self.busted = true;
        }
        self.bet = 0;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
        self.hole_cards.clear();
    }

    /// Still contesting the current hand.
    pub fn in_hand(&self) -> bool {
        !self.folded && !self.busted
    }

    /// Snapshot entry for this seat as seen by a viewer.
    pub fn public(&self, reveal_cards: bool, include_secret: bool) -> SeatPublic {
        SeatPublic {
            id: self.id.clone(),
            name: self.name.clone(),
            stack: self.stack,
            bet: self.bet,
            seat: self.seat_index,
            is_ai: self.is_ai,
            is_host: self.is_host,
            folded: self.folded,
            all_in: self.all_in,
            busted: self.busted,
            cards: if reveal_cards {
                CardsView::Revealed(self.hole_cards.clone())
            } else {
                CardsView::Hidden(self.hole_cards.len())
            },
            secret: include_secret.then(|| self.secret.clone()),
        }
    }
}
