//! Round result types handed to persistence once a round settles.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hand::HandId;
use crate::payout::{Odds, SideBetKind};
use crate::shoe::ShoeSummary;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player has blackjack.
    Blackjack,
    /// Player surrendered.
    Surrendered,
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandResult {
    /// The hand.
    pub hand_id: HandId,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The amount at risk, including any double.
    pub bet: usize,
    /// Net result (positive = profit, negative = loss).
    pub delta: isize,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

/// Result for a side bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SideBetResult {
    /// Which side bet.
    pub kind: SideBetKind,
    /// Amount staked.
    pub stake: usize,
    /// Winning odds, `None` if the bet lost.
    pub odds: Option<Odds>,
    /// Net result.
    pub delta: isize,
}

/// Result of an insurance bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsuranceResult {
    /// Amount staked.
    pub stake: usize,
    /// Net result.
    pub delta: isize,
}

/// Result of the entire round after settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundResult {
    /// Round number within the session, starting at 1.
    pub round: u64,
    /// Results for each player hand, in play order.
    pub hands: Vec<HandResult>,
    /// Insurance result, if insurance was taken.
    pub insurance: Option<InsuranceResult>,
    /// Results for each declared side bet.
    pub side_bets: Vec<SideBetResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Sum of every delta in the round.
    pub net: isize,
    /// State of the shoe when the round finished.
    pub shoe: ShoeSummary,
}

impl RoundResult {
    /// Total staked across hands, insurance and side bets.
    #[must_use]
    pub fn total_staked(&self) -> usize {
        let hands: usize = self.hands.iter().map(|h| h.bet).sum();
        let sides: usize = self.side_bets.iter().map(|s| s.stake).sum();
        hands + sides + self.insurance.map_or(0, |i| i.stake)
    }

    /// Amount credited back to the balance: stakes plus the net result.
    #[must_use]
    pub fn total_return(&self) -> usize {
        self.total_staked().saturating_add_signed(self.net)
    }
}
