#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Face;
use crate::error::{IllegalAction, RoundError};
use crate::payout::SideBetKind;

use super::{Bet, Game, Phase, Round, RoundSnapshot};

impl Game {
    fn validate_side_bets(&self, bet: &Bet) -> Result<HashMap<SideBetKind, usize>, RoundError> {
        let mut side_bets = HashMap::new();
        for &(kind, stake) in &bet.side_bets {
            if stake == 0 || stake > self.config.limits.max_side_bet {
                return Err(IllegalAction::SideBetOutOfRange.into());
            }
            if side_bets.insert(kind, stake).is_some() {
                return Err(IllegalAction::DuplicateSideBet.into());
            }
        }
        Ok(side_bets)
    }

    /// Deals two cards to the player and two to the dealer, hole card face down.
    fn deal(&mut self) -> Result<(), RoundError> {
        let player_first = self.shoe.draw()?;
        let dealer_up = self.shoe.draw()?;
        let player_second = self.shoe.draw()?;
        let dealer_hole = self.shoe.draw()?.with_face(Face::Down);

        let round = self.round_mut()?;
        let hand = &mut round.hands[0];
        hand.add_card(player_first);
        hand.add_card(player_second);
        round.first_two = Some([player_first, player_second]);
        round.dealer.add_card(dealer_up);
        round.dealer.add_card(dealer_hole);

        tracing::debug!(
            player = hand.value().total,
            dealer_up = dealer_up.rank.points(),
            "initial deal"
        );
        Ok(())
    }

    /// Places the round's bets and deals.
    ///
    /// The main bet must be within the table limits and every side bet at
    /// most the side-bet limit. The total stake is taken from the balance
    /// when the hand is created. A dealt blackjack finishes the round at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not accepting bets, a stake is outside
    /// the limits, a side bet is declared twice, the balance does not cover
    /// the total or the shoe runs out while dealing.
    pub fn place_bet(&mut self, bet: Bet) -> Result<RoundSnapshot, RoundError> {
        self.transact(|game| {
            game.expect_phase(Phase::Betting)?;
            if !game.config.limits.allows(bet.main) {
                return Err(IllegalAction::BetOutOfRange.into());
            }
            let side_bets = game.validate_side_bets(&bet)?;
            game.debit(bet.total())?;

            game.round = Some(Round::new(bet.main, side_bets));
            tracing::debug!(round = game.round_number, main = bet.main, total = bet.total(), "bet placed");

            game.set_phase(Phase::Dealing);
            game.deal()?;
            game.set_phase(Phase::PlayerTurn);
            game.advance()?;
            Ok(game.snapshot())
        })
    }
}
