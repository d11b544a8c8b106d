extern crate alloc;

use alloc::vec::Vec;

use crate::error::{IllegalAction, RoundError};
use crate::hand::{Hand, HandId, HandStatus};

use super::{Action, Game, Phase, RoundSnapshot};

impl Game {
    /// Finds the hand that may act, returning its index in play order.
    fn locate(&self, hand_id: HandId) -> Result<usize, RoundError> {
        self.expect_phase(Phase::PlayerTurn)?;
        let round = self.round_ref()?;

        let Some(index) = round.hands.iter().position(|h| h.id() == hand_id) else {
            return Err(if round.retired.iter().any(|h| h.id() == hand_id) {
                IllegalAction::HandNotActive.into()
            } else {
                IllegalAction::HandNotFound.into()
            });
        };

        if round.hands[index].status().is_terminal() {
            return Err(IllegalAction::HandNotActive.into());
        }
        if round.current_index() != Some(index) {
            return Err(IllegalAction::NotYourTurn.into());
        }
        Ok(index)
    }

    /// Checks whether `action` may be applied to `hand` without changing anything.
    fn check_action(&self, hand: &Hand, action: Action) -> Result<(), RoundError> {
        let rules = &self.config.rules;
        let locked_ace = hand.is_split_ace() && !rules.hit_split_aces;

        match action {
            Action::Stand => Ok(()),
            Action::Hit if locked_ace => Err(IllegalAction::CannotHit.into()),
            Action::Hit => Ok(()),
            Action::Double => {
                let permitted = hand.len() == 2
                    && rules.double.permits(hand.value().total)
                    && (!hand.is_from_split() || rules.double_after_split)
                    && !locked_ace;
                if !permitted {
                    return Err(IllegalAction::CannotDouble.into());
                }
                if self.balance < hand.bet() {
                    return Err(RoundError::InsufficientBalance);
                }
                Ok(())
            }
            Action::Split => {
                if !hand.is_pair() {
                    return Err(IllegalAction::CannotSplit.into());
                }
                if hand.splits_so_far() >= rules.max_splits {
                    return Err(IllegalAction::MaxSplitsReached.into());
                }
                if hand.is_ace_pair() && hand.is_from_split() && !rules.resplit_aces {
                    return Err(IllegalAction::CannotSplit.into());
                }
                if self.balance < hand.bet() {
                    return Err(RoundError::InsufficientBalance);
                }
                Ok(())
            }
            Action::Surrender => {
                if !rules.surrender || hand.len() != 2 || hand.is_from_split() {
                    return Err(IllegalAction::CannotSurrender.into());
                }
                Ok(())
            }
        }
    }

    /// Returns the actions `hand_id` may take right now.
    ///
    /// Actions the balance cannot cover are left out. The list is empty when
    /// the hand cannot act at all.
    pub fn legal_actions(&self, hand_id: HandId) -> Vec<Action> {
        let Ok(index) = self.locate(hand_id) else {
            return Vec::new();
        };
        let Ok(round) = self.round_ref() else {
            return Vec::new();
        };
        let hand = &round.hands[index];
        Action::ALL
            .into_iter()
            .filter(|&action| self.check_action(hand, action).is_ok())
            .collect()
    }

    /// Applies a player action to the hand whose turn it is.
    ///
    /// When the last hand finishes, the dealer plays and the round settles
    /// before this returns; the snapshot then shows [`Phase::Completed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not legal for the hand, the balance
    /// does not cover a double or split, or the shoe runs out. The game is
    /// left unchanged on error.
    pub fn submit_action(
        &mut self,
        hand_id: HandId,
        action: Action,
    ) -> Result<RoundSnapshot, RoundError> {
        self.transact(|game| {
            let index = game.locate(hand_id)?;
            game.check_action(&game.round_ref()?.hands[index], action)?;

            tracing::debug!(round = game.round_number, hand = hand_id.0, ?action, "player action");
            match action {
                Action::Hit => game.hit(index)?,
                Action::Stand => game.round_mut()?.hands[index].set_status(HandStatus::Stood),
                Action::Double => game.double(index)?,
                Action::Split => game.split(index)?,
                Action::Surrender => {
                    game.round_mut()?.hands[index].set_status(HandStatus::Surrendered);
                }
            }

            game.round_mut()?.acted = true;
            game.advance()?;
            Ok(game.snapshot())
        })
    }

    fn hit(&mut self, index: usize) -> Result<(), RoundError> {
        let card = self.shoe.draw()?;
        let hand = &mut self.round_mut()?.hands[index];
        hand.add_card(card);
        tracing::trace!(hand = hand.id().0, total = hand.value().total, "hit");
        Ok(())
    }

    fn double(&mut self, index: usize) -> Result<(), RoundError> {
        let stake = self.round_ref()?.hands[index].bet();
        self.debit(stake)?;
        let card = self.shoe.draw()?;

        let hand = &mut self.round_mut()?.hands[index];
        hand.double_bet();
        hand.add_card(card);
        if hand.status() != HandStatus::Busted {
            hand.set_status(HandStatus::Doubled);
        }
        Ok(())
    }

    fn split(&mut self, index: usize) -> Result<(), RoundError> {
        let stake = self.round_ref()?.hands[index].bet();
        self.debit(stake)?;
        let first_draw = self.shoe.draw()?;
        let second_draw = self.shoe.draw()?;

        let rules = &self.config.rules;
        let hit_split_aces = rules.hit_split_aces;
        let resplit_aces = rules.resplit_aces;
        let max_splits = rules.max_splits;

        let round = self.round.as_mut().ok_or(IllegalAction::WrongPhase)?;
        let mut origin = round.hands.remove(index);
        let [left, right] = origin.take_pair().ok_or(IllegalAction::CannotSplit)?;
        let splits_so_far = origin.splits_so_far() + 1;

        let mut children = [
            Hand::from_split(round.allocate_id(), left, stake, splits_so_far),
            Hand::from_split(round.allocate_id(), right, stake, splits_so_far),
        ];
        children[0].add_card(first_draw);
        children[1].add_card(second_draw);

        // Split aces that cannot take cards stand unless they can split again.
        let can_resplit = resplit_aces && splits_so_far < max_splits;
        for child in &mut children {
            let locked = child.is_split_ace() && !hit_split_aces;
            if locked && child.status() == HandStatus::Active && !(child.is_ace_pair() && can_resplit) {
                child.set_status(HandStatus::Stood);
            }
        }

        tracing::debug!(
            origin = origin.id().0,
            left = children[0].id().0,
            right = children[1].id().0,
            splits_so_far,
            "hand split"
        );
        round.retired.push(origin);
        let [first, second] = children;
        round.hands.insert(index, second);
        round.hands.insert(index, first);
        Ok(())
    }
}
