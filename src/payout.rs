//! Settlement of main bets, insurance and side bets.
//!
//! Every function returns a signed delta relative to the stake: a win returns
//! the profit, a push returns zero and a loss returns the negated amount lost.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank, Suit};
use crate::error::ConfigError;
use crate::hand::{DealerHand, Hand, HandStatus, evaluate};
use crate::result::HandOutcome;
use crate::rules::{GameRules, RoundingMode};

/// Side-bet family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SideBetKind {
    /// Pair in the player's first two cards.
    PerfectPairs,
    /// Poker hand made of the player's first two cards and the dealer up card.
    TwentyOnePlusThree,
    /// Queens and twenties in the player's first two cards.
    LuckyLadies,
    /// Suited first two cards.
    RoyalMatch,
}

impl SideBetKind {
    /// All side bets, in settlement order.
    pub const ALL: [Self; 4] = [
        Self::PerfectPairs,
        Self::TwentyOnePlusThree,
        Self::LuckyLadies,
        Self::RoyalMatch,
    ];
}

/// Fixed odds, `to` for every `per` staked (5:2 pays 5 for every 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Odds {
    /// Amount won.
    pub to: usize,
    /// Amount staked.
    pub per: usize,
}

impl Odds {
    /// Creates odds of `to:per`.
    #[must_use]
    pub const fn new(to: usize, per: usize) -> Self {
        Self { to, per }
    }

    /// Creates odds of `to:1`.
    #[must_use]
    pub const fn to_one(to: usize) -> Self {
        Self::new(to, 1)
    }

    /// Profit on `stake` at these odds.
    #[must_use]
    pub const fn profit(self, stake: usize, rounding: RoundingMode) -> usize {
        rounding.scale(stake, self.to, self.per)
    }
}

const PERFECT_PAIRS_MIXED: Odds = Odds::to_one(5);
const PERFECT_PAIRS_COLORED: Odds = Odds::to_one(10);
const PERFECT_PAIRS_PERFECT: Odds = Odds::to_one(30);

const TWENTY_ONE_PLUS_THREE_FLUSH: Odds = Odds::to_one(5);
const TWENTY_ONE_PLUS_THREE_STRAIGHT: Odds = Odds::to_one(10);
const TWENTY_ONE_PLUS_THREE_TRIPS: Odds = Odds::to_one(30);
const TWENTY_ONE_PLUS_THREE_STRAIGHT_FLUSH: Odds = Odds::to_one(40);

const LUCKY_LADIES_QUEEN_OF_HEARTS: Odds = Odds::to_one(50);
const LUCKY_LADIES_QUEEN_PAIR: Odds = Odds::to_one(20);
const LUCKY_LADIES_QUEEN: Odds = Odds::to_one(10);
const LUCKY_LADIES_TWENTY: Odds = Odds::to_one(4);

const ROYAL_MATCH_ROYAL: Odds = Odds::to_one(25);
const ROYAL_MATCH_SUITED_BLACKJACK: Odds = Odds::to_one(5);
const ROYAL_MATCH_SUITED_PAIR: Odds = Odds::to_one(3);
const ROYAL_MATCH_SUITED: Odds = Odds::new(5, 2);

/// Odds of `stake * to / per` for the winning side-bet outcomes.
///
/// Only the player's first two cards (and the dealer up card for 21+3) are
/// considered. Jokers never win a side bet. Returns `None` for a losing bet.
#[must_use]
pub fn side_bet_odds(kind: SideBetKind, player: [Card; 2], dealer_up: Card) -> Option<Odds> {
    if player.iter().any(Card::is_joker) {
        return None;
    }
    match kind {
        SideBetKind::PerfectPairs => perfect_pairs(player),
        SideBetKind::TwentyOnePlusThree => twenty_one_plus_three([player[0], player[1], dealer_up]),
        SideBetKind::LuckyLadies => lucky_ladies(player),
        SideBetKind::RoyalMatch => royal_match(player),
    }
}

fn perfect_pairs([a, b]: [Card; 2]) -> Option<Odds> {
    if a.rank != b.rank {
        None
    } else if a.suit == b.suit {
        Some(PERFECT_PAIRS_PERFECT)
    } else if a.suit.is_red() == b.suit.is_red() {
        Some(PERFECT_PAIRS_COLORED)
    } else {
        Some(PERFECT_PAIRS_MIXED)
    }
}

fn is_run(mut ranks: [u8; 3]) -> bool {
    ranks.sort_unstable();
    ranks[1] == ranks[0] + 1 && ranks[2] == ranks[1] + 1
}

fn twenty_one_plus_three(cards: [Card; 3]) -> Option<Odds> {
    if cards.iter().any(Card::is_joker) {
        return None;
    }

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let trips = cards.iter().all(|c| c.rank == cards[0].rank);

    let ace_low = cards.map(|c| c.rank.ordinal());
    let ace_high = ace_low.map(|r| if r == 1 { 14 } else { r });
    let straight = is_run(ace_low) || is_run(ace_high);

    match (straight, trips, flush) {
        (true, _, true) => Some(TWENTY_ONE_PLUS_THREE_STRAIGHT_FLUSH),
        (_, true, _) => Some(TWENTY_ONE_PLUS_THREE_TRIPS),
        (true, _, false) => Some(TWENTY_ONE_PLUS_THREE_STRAIGHT),
        (false, false, true) => Some(TWENTY_ONE_PLUS_THREE_FLUSH),
        (false, false, false) => None,
    }
}

fn lucky_ladies(cards: [Card; 2]) -> Option<Odds> {
    let is_queen = |c: &Card| c.rank == Rank::Queen;

    if cards
        .iter()
        .any(|c| is_queen(c) && c.suit == Suit::Hearts)
    {
        Some(LUCKY_LADIES_QUEEN_OF_HEARTS)
    } else if cards.iter().all(is_queen) {
        Some(LUCKY_LADIES_QUEEN_PAIR)
    } else if cards.iter().any(is_queen) {
        Some(LUCKY_LADIES_QUEEN)
    } else if evaluate(&cards).total == 20 {
        Some(LUCKY_LADIES_TWENTY)
    } else {
        None
    }
}

fn royal_match([a, b]: [Card; 2]) -> Option<Odds> {
    if a.suit != b.suit {
        return None;
    }

    let ranks = (a.rank, b.rank);
    let royal = matches!(ranks, (Rank::King, Rank::Queen) | (Rank::Queen, Rank::King));
    let suited_blackjack = (a.rank == Rank::Ace && b.rank.is_ten_value())
        || (b.rank == Rank::Ace && a.rank.is_ten_value());

    if royal {
        Some(ROYAL_MATCH_ROYAL)
    } else if suited_blackjack {
        Some(ROYAL_MATCH_SUITED_BLACKJACK)
    } else if a.rank == b.rank {
        Some(ROYAL_MATCH_SUITED_PAIR)
    } else {
        Some(ROYAL_MATCH_SUITED)
    }
}

#[expect(clippy::cast_possible_wrap, reason = "stakes fit in isize")]
const fn signed(amount: usize) -> isize {
    amount as isize
}

/// Settles one side bet: `stake * odds` on a win, `-stake` on a loss.
#[must_use]
pub fn settle_side_bet(
    kind: SideBetKind,
    stake: usize,
    player: [Card; 2],
    dealer_up: Card,
    rounding: RoundingMode,
) -> isize {
    match side_bet_odds(kind, player, dealer_up) {
        Some(odds) => signed(odds.profit(stake, rounding)),
        None => -signed(stake),
    }
}

/// Settles insurance: twice the stake if the dealer has blackjack, else `-stake`.
#[must_use]
pub fn settle_insurance(stake: usize, dealer: &DealerHand) -> isize {
    if dealer.is_blackjack() {
        signed(stake.saturating_mul(2))
    } else {
        -signed(stake)
    }
}

/// Classifies a finished player hand against the dealer's final hand.
#[must_use]
pub fn main_bet_outcome(hand: &Hand, dealer: &DealerHand) -> HandOutcome {
    match hand.status() {
        HandStatus::Surrendered => return HandOutcome::Surrendered,
        HandStatus::Busted => return HandOutcome::Lose,
        _ if hand.is_bust() => return HandOutcome::Lose,
        _ => {}
    }

    match (hand.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => HandOutcome::Push,
        (true, false) => HandOutcome::Blackjack,
        (false, true) => HandOutcome::Lose,
        (false, false) => {
            let player = hand.value().total;
            let dealer_value = dealer.value();
            if dealer_value.is_bust() || player > dealer_value.total {
                HandOutcome::Win
            } else if player == dealer_value.total {
                HandOutcome::Push
            } else {
                HandOutcome::Lose
            }
        }
    }
}

/// Settles a player's main bet.
///
/// The hand's bet already includes any double, so a doubled win or loss moves
/// twice the original stake. Surrender loses half the stake; the refunded
/// half is rounded by `rules.rounding_surrender`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBlackjackPayout`] when the hand is a
/// blackjack and `rules.blackjack_pays` is not a supported ratio.
pub fn settle_main_bet(
    hand: &Hand,
    dealer: &DealerHand,
    rules: &GameRules,
) -> Result<isize, ConfigError> {
    let bet = hand.bet();
    let delta = match main_bet_outcome(hand, dealer) {
        HandOutcome::Win => signed(bet),
        HandOutcome::Lose => -signed(bet),
        HandOutcome::Push => 0,
        HandOutcome::Blackjack => {
            let (numerator, denominator) = rules.blackjack_ratio()?;
            signed(rules.rounding_blackjack.scale(bet, numerator, denominator))
        }
        HandOutcome::Surrendered => {
            let refund = rules.rounding_surrender.scale(bet, 1, 2);
            -signed(bet - refund)
        }
    };
    Ok(delta)
}
