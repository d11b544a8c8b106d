extern crate alloc;

use alloc::vec::Vec;

use crate::error::{IllegalAction, RoundError};
use crate::hand::HandStatus;
use crate::payout::{
    SideBetKind, main_bet_outcome, settle_insurance, settle_main_bet, settle_side_bet,
    side_bet_odds,
};
use crate::policy::{self, DealerAction};
use crate::result::{HandResult, InsuranceResult, RoundResult, SideBetResult};

use super::{Game, Insurance};

impl Game {
    /// Reveals the hole card and draws until the dealer policy stands.
    ///
    /// The dealer does not draw when every player hand has busted or
    /// surrendered.
    pub(super) fn dealer_play(&mut self) -> Result<(), RoundError> {
        let round = self.round_mut()?;
        round.dealer.reveal_hole();

        let contested = round
            .hands
            .iter()
            .any(|hand| !matches!(hand.status(), HandStatus::Busted | HandStatus::Surrendered));
        if !contested {
            tracing::debug!(round = self.round_number, "dealer stands without drawing");
            return Ok(());
        }

        loop {
            let action = policy::next_action(self.round_ref()?.dealer.cards(), &self.config.rules);
            if action == DealerAction::Stand {
                break;
            }
            let card = self.shoe.draw().inspect_err(|_| {
                tracing::error!(round = self.round_number, "shoe ran dry during the dealer turn");
            })?;
            self.round_mut()?.dealer.add_card(card);
        }

        let value = self.round_ref()?.dealer.value();
        tracing::debug!(round = self.round_number, total = value.total, soft = value.soft, "dealer stands");
        Ok(())
    }

    /// Settles every bet of the round and credits the balance.
    pub(super) fn settle(&mut self) -> Result<RoundResult, RoundError> {
        let rules = &self.config.rules;
        let round = self.round.as_ref().ok_or(IllegalAction::WrongPhase)?;
        let dealer = &round.dealer;
        let dealer_value = dealer.value();

        let hands = round
            .hands
            .iter()
            .map(|hand| {
                Ok(HandResult {
                    hand_id: hand.id(),
                    outcome: main_bet_outcome(hand, dealer),
                    bet: hand.bet(),
                    delta: settle_main_bet(hand, dealer, rules)?,
                    player_value: hand.value().total,
                    dealer_value: dealer_value.total,
                })
            })
            .collect::<Result<Vec<HandResult>, RoundError>>()?;

        let insurance = match round.insurance {
            Insurance::Taken(stake) => Some(InsuranceResult {
                stake,
                delta: settle_insurance(stake, dealer),
            }),
            Insurance::Undecided | Insurance::Declined => None,
        };

        let side_bets: Vec<SideBetResult> = match (round.first_two, dealer.up_card()) {
            (Some(player), Some(&up)) => SideBetKind::ALL
                .into_iter()
                .filter_map(|kind| {
                    let stake = *round.side_bets.get(&kind)?;
                    Some(SideBetResult {
                        kind,
                        stake,
                        odds: side_bet_odds(kind, player, up),
                        delta: settle_side_bet(kind, stake, player, up, rules.rounding_side_bets),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        let net = hands.iter().map(|h| h.delta).sum::<isize>()
            + insurance.map_or(0, |i| i.delta)
            + side_bets.iter().map(|s| s.delta).sum::<isize>();

        let result = RoundResult {
            round: self.round_number,
            hands,
            insurance,
            side_bets,
            dealer_value: dealer_value.total,
            dealer_bust: dealer_value.is_bust(),
            dealer_blackjack: dealer.is_blackjack(),
            net,
            shoe: self.shoe.summary(),
        };

        let credit = result.total_return();
        self.balance = self.balance.saturating_add(credit);
        tracing::info!(
            round = result.round,
            net = result.net,
            credit,
            balance = self.balance,
            "round settled"
        );
        Ok(result)
    }
}
