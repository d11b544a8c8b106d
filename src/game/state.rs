//! Round phases, player actions and the views handed to the UI.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::{Hand, HandId, HandValue};
use crate::payout::SideBetKind;

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Accepting bets for the next round.
    Betting,
    /// Dealing initial cards.
    Dealing,
    /// Waiting for player actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Bets are being paid and collected.
    Settlement,
    /// Hands are discarded and the shoe is checked.
    Cleanup,
    /// Round is over; the result is available.
    Completed,
}

/// A phase change, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseEvent {
    /// Round number.
    pub round: u64,
    /// Phase left.
    pub from: Phase,
    /// Phase entered.
    pub to: Phase,
}

/// Player action on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Draw a card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Double the bet, draw one card and stand.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Forfeit half the bet.
    Surrender,
}

impl Action {
    /// Every action.
    pub const ALL: [Self; 5] = [
        Self::Hit,
        Self::Stand,
        Self::Double,
        Self::Split,
        Self::Surrender,
    ];
}

/// Stakes submitted at the start of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bet {
    /// Main bet.
    pub main: usize,
    /// Declared side bets.
    pub side_bets: Vec<(SideBetKind, usize)>,
}

impl Bet {
    /// Creates a bet with no side bets.
    #[must_use]
    pub const fn new(main: usize) -> Self {
        Self {
            main,
            side_bets: Vec::new(),
        }
    }

    /// Adds a side bet.
    #[must_use]
    pub fn with_side_bet(mut self, kind: SideBetKind, stake: usize) -> Self {
        self.side_bets.push((kind, stake));
        self
    }

    /// Main bet plus every side bet.
    #[must_use]
    pub fn total(&self) -> usize {
        self.side_bets
            .iter()
            .fold(self.main, |sum, &(_, stake)| sum.saturating_add(stake))
    }
}

/// What the table looks like after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundSnapshot {
    /// Round number.
    pub round: u64,
    /// Current phase.
    pub phase: Phase,
    /// Player hands in play order.
    pub hands: Vec<Hand>,
    /// Dealer cards; a face-down card shows as `None`.
    pub dealer_cards: Vec<Option<Card>>,
    /// Value of the dealer's face-up cards.
    pub dealer_value: HandValue,
    /// Hand whose turn it is.
    pub current_hand: Option<HandId>,
    /// Player balance.
    pub balance: usize,
    /// Insurance stake, if taken.
    pub insurance: Option<usize>,
    /// Declared side bets.
    pub side_bets: Vec<(SideBetKind, usize)>,
    /// Undealt cards in the shoe.
    pub cards_remaining: usize,
}
