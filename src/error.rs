//! Error types for engine operations.

use thiserror::Error;

/// Errors raised while validating table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Deck count outside `1..=8`.
    #[error("deck count must be between 1 and 8")]
    InvalidDeckCount,
    /// Blackjack payout other than 3:2, 6:5 or 1:1.
    #[error("blackjack payout must be 1.5, 1.2 or 1.0")]
    InvalidBlackjackPayout,
    /// Penetration outside `(0, 1]`.
    #[error("penetration must be greater than 0 and at most 1")]
    InvalidPenetration,
    /// Minimum bet is zero or above the maximum bet.
    #[error("bet limits must satisfy 1 <= min_bet <= max_bet")]
    InvalidBetLimits,
    /// Side bet limit is zero.
    #[error("side bet limit must be at least 1")]
    InvalidSideBetLimit,
    /// Split limit above the table maximum.
    #[error("max_splits must be at most 7")]
    TooManySplits,
    /// Explicit shuffle pass count of zero.
    #[error("shuffle passes must be at least 1")]
    InvalidShufflePasses,
}

/// Errors raised by the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// A draw was attempted with no cards remaining.
    #[error("no cards left in the shoe")]
    Empty,
}

/// The constraint an action violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalAction {
    /// Invalid game phase for this action.
    #[error("invalid game phase for this action")]
    WrongPhase,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Another hand must act first.
    #[error("not this hand's turn")]
    NotYourTurn,
    /// Hand may not take another card.
    #[error("cannot hit this hand")]
    CannotHit,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum splits reached.
    #[error("maximum splits reached")]
    MaxSplitsReached,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Main bet outside the table limits.
    #[error("bet outside table limits")]
    BetOutOfRange,
    /// Side bet stake outside the table limits.
    #[error("side bet outside table limits")]
    SideBetOutOfRange,
    /// The same side bet was declared twice.
    #[error("side bet declared twice")]
    DuplicateSideBet,
    /// Insurance is not on offer right now.
    #[error("insurance is not offered")]
    InsuranceNotOffered,
    /// Insurance was already taken or declined.
    #[error("insurance already decided")]
    InsuranceAlreadyDecided,
    /// Insurance stake is zero or above half the main bet.
    #[error("insurance stake must be between 1 and half the bet")]
    InsuranceTooLarge,
}

/// Errors that can occur while playing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The action is not valid for the current phase or hand.
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    /// The balance does not cover the stake.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// The shoe ran out of cards mid-round.
    #[error("no cards left in the shoe")]
    ShoeEmpty,
    /// The table configuration cannot be applied.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<ShoeError> for RoundError {
    fn from(err: ShoeError) -> Self {
        match err {
            ShoeError::Empty => Self::ShoeEmpty,
        }
    }
}
