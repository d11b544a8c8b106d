use crate::card::Rank;
use crate::error::{IllegalAction, RoundError};

use super::{Game, Insurance, Phase, RoundSnapshot};

impl Game {
    fn ensure_insurance_open(&self) -> Result<(), RoundError> {
        self.expect_phase(Phase::PlayerTurn)?;
        let round = self.round_ref()?;

        if round.insurance != Insurance::Undecided {
            return Err(IllegalAction::InsuranceAlreadyDecided.into());
        }
        let ace_up = round
            .dealer
            .up_card()
            .is_some_and(|card| card.rank == Rank::Ace);
        if !self.config.rules.insurance || !ace_up || round.acted {
            return Err(IllegalAction::InsuranceNotOffered.into());
        }
        Ok(())
    }

    /// Returns whether insurance can be taken or declined right now.
    ///
    /// Insurance is offered while the dealer shows an ace and no action has
    /// been taken on the player's hand.
    pub fn insurance_offered(&self) -> bool {
        self.ensure_insurance_open().is_ok()
    }

    /// Takes insurance for `stake`, at most half the main bet.
    ///
    /// The stake is taken from the balance immediately and pays 2:1 if the
    /// dealer turns out to hold a blackjack.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not on offer, was already decided,
    /// the stake is zero or too large, or the balance does not cover it.
    pub fn take_insurance(&mut self, stake: usize) -> Result<RoundSnapshot, RoundError> {
        self.transact(|game| {
            game.ensure_insurance_open()?;
            if stake == 0 || stake > game.round_ref()?.main_bet / 2 {
                return Err(IllegalAction::InsuranceTooLarge.into());
            }
            game.debit(stake)?;
            game.round_mut()?.insurance = Insurance::Taken(stake);
            tracing::debug!(round = game.round_number, stake, "insurance taken");
            Ok(game.snapshot())
        })
    }

    /// Declines insurance for this round.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not on offer or was already decided.
    pub fn decline_insurance(&mut self) -> Result<RoundSnapshot, RoundError> {
        self.transact(|game| {
            game.ensure_insurance_open()?;
            game.round_mut()?.insurance = Insurance::Declined;
            tracing::debug!(round = game.round_number, "insurance declined");
            Ok(game.snapshot())
        })
    }
}
