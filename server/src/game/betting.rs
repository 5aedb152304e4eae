//! Action legality and application.

use poker_shared::ActionKind;

use super::{GameError, Hand, Seat};

impl Hand {
    /// What `seat` may legally do right now. Empty when the hand is over or
    /// the seat cannot act.
    pub fn legal_actions(&self, seat: &Seat) -> Vec<ActionKind> {
        if self.hand_over || seat.folded || seat.all_in || seat.busted {
            return Vec::new();
        }
        let to_call = self.current_bet.saturating_sub(seat.bet);
        let mut options = Vec::new();
        if to_call > 0 {
            options.push(ActionKind::Fold);
            options.push(ActionKind::Call);
            if seat.stack + seat.bet > self.current_bet {
                options.push(ActionKind::Raise);
            }
        } else {
            options.push(ActionKind::Check);
            if seat.stack > 0 {
                options.push(ActionKind::Bet);
            }
        }
        options
    }

    /// Apply one action for the seat at `seat_index`.
    ///
    /// For `bet` and `raise` the amount is the desired on-street total, not
    /// the increment; it is clamped to the seat's reach, which is how an
    /// all-in for less is expressed. A failed call leaves the hand
    /// untouched.
    pub fn apply_action(
        &mut self,
        seats: &mut [Seat],
        seat_index: usize,
        action: ActionKind,
        amount: u32,
    ) -> Result<(), GameError> {
        if self.hand_over {
            return Err(GameError::HandOver);
        }
        if self.current_player_index != Some(seat_index) {
            return Err(GameError::WrongTurn);
        }
        let to_call = self.current_bet.saturating_sub(seats[seat_index].bet);
        let mut logged_amount = 0;
        match action {
            ActionKind::Fold => {
                seats[seat_index].folded = true;
            }
            ActionKind::Check => {
                if to_call != 0 {
                    return Err(GameError::CannotCheck);
                }
            }
            ActionKind::Call => {
                if to_call == 0 {
                    return Err(GameError::NothingToCall);
                }
                logged_amount = seats[seat_index].stack.min(to_call);
                self.commit(&mut seats[seat_index], to_call);
            }
            ActionKind::Bet => {
                if self.current_bet != 0 {
                    return Err(GameError::BetNotAllowed);
                }
                if amount < self.big_blind {
                    return Err(GameError::BelowMinBet);
                }
                let seat = &seats[seat_index];
                let desired_total = amount.min(seat.bet + seat.stack);
                let commit = desired_total - seat.bet;
                if commit == 0 {
                    return Err(GameError::InsufficientChips);
                }
                self.commit(&mut seats[seat_index], commit);
                self.current_bet = seats[seat_index].bet;
                self.min_raise = commit;
                logged_amount = seats[seat_index].bet;
            }
            ActionKind::Raise => {
                if self.current_bet == 0 {
                    return Err(GameError::NothingToRaise);
                }
                if amount <= self.current_bet {
                    return Err(GameError::RaiseMustIncrease);
                }
                let seat = &seats[seat_index];
                let min_total = self.current_bet + self.min_raise;
                let desired_total = amount.max(min_total).min(seat.bet + seat.stack);
                let commit = desired_total - seat.bet;
                if commit <= to_call {
                    return Err(GameError::RaiseMustExceedCall);
                }
                self.commit(&mut seats[seat_index], commit);
                self.min_raise = desired_total - self.current_bet;
                self.current_bet = desired_total;
                logged_amount = seats[seat_index].bet;
            }
        }
        seats[seat_index].has_acted = true;
        self.record(&seats[seat_index], action.label(), logged_amount);

        if seats.iter().filter(|s| s.in_hand()).count() <= 1 {
            self.finish_single_player(seats);
            return Ok(());
        }
        self.advance_turn_or_round(seats);
        Ok(())
    }
}
