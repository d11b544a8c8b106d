//! Round state machine.

extern crate alloc;

use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::{ConfigError, IllegalAction, RoundError};
use crate::hand::{DealerHand, Hand, HandId};
use crate::payout::SideBetKind;
use crate::result::RoundResult;
use crate::rules::{GameRules, TableConfig};
use crate::shoe::{Shoe, ShoeManager};

mod actions;
mod bet;
mod dealer;
mod insurance;
pub mod state;

pub use state::{Action, Bet, Phase, PhaseEvent, RoundSnapshot};

/// Undealt cards below which a shoe is retired at cleanup.
///
/// A stand-only round from one deck takes at most 12 cards: two for the
/// player and ten for the dealer.
pub const ROUND_RESERVE: usize = 15;

/// Insurance decision for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insurance {
    Undecided,
    Declined,
    Taken(usize),
}

/// Hands and stakes that live for one round.
#[derive(Debug, Clone)]
struct Round {
    /// Player hands in play order.
    hands: Vec<Hand>,
    /// Hands replaced by a split.
    retired: Vec<Hand>,
    dealer: DealerHand,
    side_bets: HashMap<SideBetKind, usize>,
    main_bet: usize,
    /// The first two player cards as dealt, for side bets.
    first_two: Option<[Card; 2]>,
    insurance: Insurance,
    next_hand_id: u32,
    /// Whether any player action has been applied.
    acted: bool,
}

impl Round {
    fn new(main_bet: usize, side_bets: HashMap<SideBetKind, usize>) -> Self {
        Self {
            hands: alloc::vec![Hand::new(HandId(0), main_bet)],
            retired: Vec::new(),
            dealer: DealerHand::new(),
            side_bets,
            main_bet,
            first_two: None,
            insurance: Insurance::Undecided,
            next_hand_id: 1,
            acted: false,
        }
    }

    const fn allocate_id(&mut self) -> HandId {
        let id = HandId(self.next_hand_id);
        self.next_hand_id += 1;
        id
    }

    /// Index of the first hand still waiting for an action.
    fn current_index(&self) -> Option<usize> {
        self.hands.iter().position(|h| !h.status().is_terminal())
    }

    fn all_hands_done(&self) -> bool {
        self.current_index().is_none()
    }

    /// Everything staked this round, for refunds.
    fn total_staked(&self) -> usize {
        let hands: usize = self.hands.iter().map(Hand::bet).sum();
        let sides: usize = self.side_bets.values().sum();
        let insurance = match self.insurance {
            Insurance::Taken(stake) => stake,
            Insurance::Undecided | Insurance::Declined => 0,
        };
        hands + sides + insurance
    }
}

/// A blackjack table for one player session.
///
/// The game owns the shoe, the round's hands and the player's balance. Every
/// operation either succeeds or leaves the game exactly as it was.
#[derive(Debug, Clone)]
pub struct Game {
    config: TableConfig,
    shoe_manager: ShoeManager,
    shoe: Shoe,
    balance: usize,
    phase: Phase,
    round_number: u64,
    round: Option<Round>,
    events: Vec<PhaseEvent>,
    last_result: Option<RoundResult>,
}

impl Game {
    /// Opens a table whose shuffles are driven by `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::{Game, Phase, TableConfig};
    ///
    /// let game = Game::new(TableConfig::default(), 42).unwrap();
    /// assert_eq!(game.phase(), Phase::Betting);
    /// assert_eq!(game.shoe().remaining(), 6 * 52);
    /// ```
    pub fn new(config: TableConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_manager(config, ShoeManager::new(seed))
    }

    /// Opens a table whose shuffles are seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn from_entropy(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_manager(config, ShoeManager::from_entropy())
    }

    fn with_manager(config: TableConfig, mut shoe_manager: ShoeManager) -> Result<Self, ConfigError> {
        config.validate()?;
        let shoe = shoe_manager.fresh_shoe(config.rules.decks, &config.shoe)?;

        Ok(Self {
            config,
            shoe_manager,
            shoe,
            balance: 0,
            phase: Phase::Betting,
            round_number: 1,
            round: None,
            events: Vec::new(),
            last_result: None,
        })
    }

    /// Sets the starting balance.
    #[must_use]
    pub const fn with_balance(mut self, balance: usize) -> Self {
        self.balance = balance;
        self
    }

    /// Runs `op`, restoring the game if it fails.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, RoundError>,
    ) -> Result<T, RoundError> {
        let checkpoint = self.clone();
        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(round = checkpoint.round_number, %err, "operation rejected");
                *self = checkpoint;
                Err(err)
            }
        }
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        tracing::debug!(round = self.round_number, ?from, ?to, "phase change");
        self.events.push(PhaseEvent {
            round: self.round_number,
            from,
            to,
        });
        self.phase = to;
    }

    fn expect_phase(&self, phase: Phase) -> Result<(), RoundError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(IllegalAction::WrongPhase.into())
        }
    }

    fn round_ref(&self) -> Result<&Round, RoundError> {
        self.round.as_ref().ok_or(IllegalAction::WrongPhase.into())
    }

    fn round_mut(&mut self) -> Result<&mut Round, RoundError> {
        self.round.as_mut().ok_or(IllegalAction::WrongPhase.into())
    }

    /// Takes `amount` from the balance.
    fn debit(&mut self, amount: usize) -> Result<(), RoundError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(RoundError::InsufficientBalance)?;
        Ok(())
    }

    /// Runs the dealer, settlement and cleanup once every hand is finished.
    fn advance(&mut self) -> Result<(), RoundError> {
        if self.phase != Phase::PlayerTurn || !self.round_ref()?.all_hands_done() {
            return Ok(());
        }

        self.set_phase(Phase::DealerTurn);
        self.dealer_play()?;
        self.set_phase(Phase::Settlement);
        let mut result = self.settle()?;
        self.set_phase(Phase::Cleanup);
        result.shoe.reshuffled = self.cleanup()?;
        self.last_result = Some(result);
        self.set_phase(Phase::Completed);
        Ok(())
    }

    /// Discards the round and replaces the shoe if the cut card has come out
    /// or fewer than [`ROUND_RESERVE`] cards are left.
    ///
    /// Returns whether the shoe was replaced.
    fn cleanup(&mut self) -> Result<bool, RoundError> {
        self.round = None;
        if !self.shoe.needs_reshuffle() && self.shoe.remaining() >= ROUND_RESERVE {
            return Ok(false);
        }
        self.shoe = self
            .shoe_manager
            .fresh_shoe(self.config.rules.decks, &self.config.shoe)?;
        Ok(true)
    }

    /// Starts the next round.
    ///
    /// # Errors
    ///
    /// Returns an error unless the previous round is completed.
    pub fn next_round(&mut self) -> Result<RoundSnapshot, RoundError> {
        self.transact(|game| {
            game.expect_phase(Phase::Completed)?;
            game.round_number += 1;
            game.set_phase(Phase::Betting);
            Ok(game.snapshot())
        })
    }

    /// Abandons the round in play, refunding every stake.
    ///
    /// This is the way out after [`RoundError::ShoeEmpty`]. The shoe is
    /// replaced as at the end of a played round. Returns the amount refunded.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is in play.
    pub fn void_round(&mut self) -> Result<usize, RoundError> {
        self.transact(|game| {
            let refund = game.round_ref()?.total_staked();
            game.balance = game.balance.saturating_add(refund);
            tracing::info!(round = game.round_number, refund, "round voided");
            game.set_phase(Phase::Cleanup);
            game.cleanup()?;
            game.set_phase(Phase::Completed);
            Ok(refund)
        })
    }

    /// Replaces the shoe with a fresh one between rounds.
    ///
    /// This is the way out when a swapped-in shoe is too short to deal from.
    ///
    /// # Errors
    ///
    /// Returns an error while a round is in play.
    pub fn reshuffle(&mut self) -> Result<(), RoundError> {
        self.transact(|game| {
            if game.round.is_some() {
                return Err(IllegalAction::WrongPhase.into());
            }
            tracing::info!(
                round = game.round_number,
                remaining = game.shoe.remaining(),
                "shoe retired between rounds"
            );
            game.shoe = game
                .shoe_manager
                .fresh_shoe(game.config.rules.decks, &game.config.shoe)?;
            Ok(())
        })
    }

    /// Swaps in another shoe between rounds, returning the retired one.
    ///
    /// # Errors
    ///
    /// Returns an error while a round is in play.
    pub fn replace_shoe(&mut self, shoe: Shoe) -> Result<Shoe, RoundError> {
        if self.round.is_some() {
            return Err(IllegalAction::WrongPhase.into());
        }
        Ok(core::mem::replace(&mut self.shoe, shoe))
    }

    /// Returns the table configuration.
    pub const fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the house rules.
    pub const fn rules(&self) -> &GameRules {
        &self.config.rules
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current round number, starting at 1.
    pub const fn round_number(&self) -> u64 {
        self.round_number
    }

    /// Returns the player balance.
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Sets the player balance after an outside adjustment.
    pub const fn set_balance(&mut self, balance: usize) {
        self.balance = balance;
    }

    /// Returns the shoe.
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the result of the last settled round.
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Removes and returns the phase changes recorded so far.
    pub fn drain_events(&mut self) -> Vec<PhaseEvent> {
        core::mem::take(&mut self.events)
    }

    /// Returns the player hands in play order.
    pub fn hands(&self) -> &[Hand] {
        self.round
            .as_ref()
            .map(|round| round.hands.as_slice())
            .unwrap_or_default()
    }

    /// Returns the hand with `id`, including hands retired by a split.
    pub fn hand(&self, id: HandId) -> Option<&Hand> {
        let round = self.round.as_ref()?;
        round
            .hands
            .iter()
            .chain(&round.retired)
            .find(|hand| hand.id() == id)
    }

    /// Returns the dealer's hand.
    pub fn dealer_hand(&self) -> Option<&DealerHand> {
        self.round.as_ref().map(|round| &round.dealer)
    }

    /// Returns the hand whose turn it is.
    pub fn current_hand(&self) -> Option<HandId> {
        if self.phase != Phase::PlayerTurn {
            return None;
        }
        let round = self.round.as_ref()?;
        round.current_index().map(|i| round.hands[i].id())
    }

    /// Returns a view of the table.
    pub fn snapshot(&self) -> RoundSnapshot {
        let round = self.round.as_ref();
        let dealer = round.map(|r| &r.dealer);
        let mut side_bets: Vec<(SideBetKind, usize)> = round
            .map(|r| r.side_bets.iter().map(|(&k, &v)| (k, v)).collect())
            .unwrap_or_default();
        side_bets.sort_unstable();

        RoundSnapshot {
            round: self.round_number,
            phase: self.phase,
            hands: self.hands().to_vec(),
            dealer_cards: dealer
                .map(|d| {
                    d.cards()
                        .iter()
                        .map(|c| c.is_face_up().then_some(*c))
                        .collect()
                })
                .unwrap_or_default(),
            dealer_value: dealer.map_or_else(
                || crate::hand::evaluate(&[]),
                DealerHand::visible_value,
            ),
            current_hand: self.current_hand(),
            balance: self.balance,
            insurance: round.and_then(|r| match r.insurance {
                Insurance::Taken(stake) => Some(stake),
                Insurance::Undecided | Insurance::Declined => None,
            }),
            side_bets,
            cards_remaining: self.shoe.remaining(),
        }
    }
}
