//! Decision context handed to the AI adapter, and the safe fallback.

use poker_shared::{ActionKind, ActionRecord, Card, Phase};

use super::{Hand, Seat};

/// Snapshot of everything an external decider needs to pick a legal action
/// for one seat. Built under the room lock, consumed outside it.
#[derive(Clone, Debug)]
pub struct AiContext {
    pub player_id: String,
    pub player_name: String,
    pub hole_cards: Vec<Card>,
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub stack: u32,
    pub to_call: u32,
    pub min_raise: u32,
    pub phase: Phase,
    pub legal_actions: Vec<ActionKind>,
    pub actions: Vec<ActionRecord>,
}

impl Hand {
    pub fn build_ai_context(&self, seat: &Seat) -> AiContext {
        let to_call = self.current_bet.saturating_sub(seat.bet);
        AiContext {
            player_id: seat.id.clone(),
            player_name: seat.name.clone(),
            hole_cards: seat.hole_cards.clone(),
            community_cards: self.community_cards.clone(),
            pot: self.pot,
            stack: seat.stack,
            to_call,
            min_raise: self.min_raise,
            phase: self.phase,
            legal_actions: self.legal_actions(seat),
            actions: self.actions.clone(),
        }
    }

    /// Deterministic safe play: check when possible, call when affordable,
    /// fold otherwise.
    pub fn fallback_action(&self, seat: &Seat) -> (ActionKind, u32) {
        let to_call = self.current_bet.saturating_sub(seat.bet);
        let legal = self.legal_actions(seat);
        if legal.contains(&ActionKind::Check) {
            return (ActionKind::Check, 0);
        }
        if legal.contains(&ActionKind::Call) && seat.stack >= to_call {
            return (ActionKind::Call, to_call);
        }
        (ActionKind::Fold, 0)
    }
}
