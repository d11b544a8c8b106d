//! Dealer drawing rules.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::{HandValue, evaluate};
use crate::rules::GameRules;

/// What the dealer does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DealerAction {
    /// Draw a card.
    Hit,
    /// Stop drawing.
    Stand,
}

/// Decides the dealer's next move for a hand value.
///
/// The dealer stands on 17 or more, except that soft 17 is hit when
/// `hits_soft_17` is set. A bust hand always stands.
#[must_use]
pub const fn decide(value: HandValue, hits_soft_17: bool) -> DealerAction {
    if value.total > 21 {
        return DealerAction::Stand;
    }
    if value.total == 17 && value.soft && hits_soft_17 {
        return DealerAction::Hit;
    }
    if value.total >= 17 {
        DealerAction::Stand
    } else {
        DealerAction::Hit
    }
}

/// Decides the dealer's next move for `cards` under `rules`.
#[must_use]
pub fn next_action(cards: &[Card], rules: &GameRules) -> DealerAction {
    decide(evaluate(cards), rules.dealer_hits_soft_17)
}
