//! House rules and table configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::shoe::ShoeConfig;

/// Largest number of splits a table may allow in one round.
pub const MAX_SPLITS_LIMIT: u8 = 7;

/// Conditions under which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum DoubleOption {
    /// Double down allowed on any two-card hand.
    #[default]
    Any,
    /// Double down allowed only on 9 or 10.
    NineOrTen,
    /// Double down allowed only on 9 through 11.
    NineThrough11,
    /// Double down allowed only on 9 through 15.
    NineThrough15,
    /// Double down not allowed.
    None,
}

impl DoubleOption {
    /// Checks if a hand totalling `value` may double.
    #[must_use]
    pub fn permits(self, value: u8) -> bool {
        match self {
            Self::Any => true,
            Self::NineOrTen => value == 9 || value == 10,
            Self::NineThrough11 => (9..=11).contains(&value),
            Self::NineThrough15 => (9..=15).contains(&value),
            Self::None => false,
        }
    }
}

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves up.
    Nearest,
}

impl RoundingMode {
    /// Computes `amount * numerator / denominator` with this rounding.
    ///
    /// `denominator` must be non-zero.
    #[must_use]
    pub const fn scale(self, amount: usize, numerator: usize, denominator: usize) -> usize {
        let product = amount.saturating_mul(numerator);
        let quotient = product / denominator;
        let remainder = product % denominator;
        let round_up = match self {
            Self::Up => remainder > 0,
            Self::Down => false,
            Self::Nearest => remainder * 2 >= denominator,
        };
        if round_up { quotient + 1 } else { quotient }
    }
}

/// House rules for a blackjack table.
///
/// Use the builder pattern to customize rules:
///
/// ```
/// use bjengine::GameRules;
///
/// let rules = GameRules::default()
///     .with_decks(6)
///     .with_blackjack_pays(1.2)
///     .with_dealer_hits_soft_17(true);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameRules {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Blackjack payout ratio: 1.5 (3:2), 1.2 (6:5) or 1.0 (even money).
    pub blackjack_pays: f64,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Double down conditions. [`DoubleOption::None`] disables doubling.
    pub double: DoubleOption,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Whether late surrender is allowed.
    pub surrender: bool,
    /// Whether insurance is offered against a dealer ace.
    pub insurance: bool,
    /// A hand may be split while fewer than this many splits led to it.
    pub max_splits: u8,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Whether split aces may take further cards.
    pub hit_split_aces: bool,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for the half stake returned on surrender.
    pub rounding_surrender: RoundingMode,
    /// Rounding mode for fractional side-bet odds.
    pub rounding_side_bets: RoundingMode,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            decks: 6,
            blackjack_pays: 1.5,
            dealer_hits_soft_17: false,
            double: DoubleOption::Any,
            max_splits: 3,
            double_after_split: true,
            surrender: true,
            insurance: true,
            resplit_aces: false,
            hit_split_aces: false,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
            rounding_side_bets: RoundingMode::Down,
        }
    }
}

impl GameRules {
    /// Checks the rules once, before any round is played.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck count, blackjack payout or split limit is
    /// out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.decks) {
            return Err(ConfigError::InvalidDeckCount);
        }
        self.blackjack_ratio()?;
        if self.max_splits > MAX_SPLITS_LIMIT {
            return Err(ConfigError::TooManySplits);
        }
        Ok(())
    }

    /// Returns the blackjack payout as an exact `(numerator, denominator)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if `blackjack_pays` is not 1.5, 1.2 or 1.0.
    pub fn blackjack_ratio(&self) -> Result<(usize, usize), ConfigError> {
        const RATIOS: [(f64, (usize, usize)); 3] = [(1.5, (3, 2)), (1.2, (6, 5)), (1.0, (1, 1))];

        RATIOS
            .iter()
            .find(|(pays, _)| {
                let diff = self.blackjack_pays - pays;
                diff > -1e-9 && diff < 1e-9
            })
            .map(|&(_, ratio)| ratio)
            .ok_or(ConfigError::InvalidBlackjackPayout)
    }

    /// Returns whether doubling is allowed at all.
    #[must_use]
    pub fn double_allowed(&self) -> bool {
        self.double != DoubleOption::None
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameRules;
    ///
    /// let rules = GameRules::default().with_decks(8);
    /// assert_eq!(rules.decks, 8);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameRules;
    ///
    /// let rules = GameRules::default().with_dealer_hits_soft_17(true);
    /// assert!(rules.dealer_hits_soft_17);
    /// ```
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the double down conditions.
    #[must_use]
    pub const fn with_double(mut self, double: DoubleOption) -> Self {
        self.double = double;
        self
    }

    /// Enables doubling on any hand, or disables it entirely.
    #[must_use]
    pub const fn with_double_allowed(mut self, allowed: bool) -> Self {
        self.double = if allowed {
            DoubleOption::Any
        } else {
            DoubleOption::None
        };
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether insurance is offered.
    #[must_use]
    pub const fn with_insurance(mut self, offered: bool) -> Self {
        self.insurance = offered;
        self
    }

    /// Sets the maximum number of splits allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameRules;
    ///
    /// let rules = GameRules::default().with_max_splits(4);
    /// assert_eq!(rules.max_splits, 4);
    /// ```
    #[must_use]
    pub const fn with_max_splits(mut self, splits: u8) -> Self {
        self.max_splits = splits;
        self
    }

    /// Sets whether split aces may be split again.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets whether split aces may take further cards.
    #[must_use]
    pub const fn with_hit_split_aces(mut self, allowed: bool) -> Self {
        self.hit_split_aces = allowed;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Sets the rounding mode for side-bet payouts.
    #[must_use]
    pub const fn with_rounding_side_bets(mut self, mode: RoundingMode) -> Self {
        self.rounding_side_bets = mode;
        self
    }
}

/// Betting limits for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableLimits {
    /// Smallest main bet.
    pub min_bet: usize,
    /// Largest main bet.
    pub max_bet: usize,
    /// Largest stake on any single side bet.
    pub max_side_bet: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            min_bet: 10,
            max_bet: 1_000,
            max_side_bet: 100,
        }
    }
}

impl TableLimits {
    /// Creates limits for main bets; side bets are capped at `max_bet`.
    #[must_use]
    pub const fn new(min_bet: usize, max_bet: usize) -> Self {
        Self {
            min_bet,
            max_bet,
            max_side_bet: max_bet,
        }
    }

    /// Sets the side-bet cap.
    #[must_use]
    pub const fn with_max_side_bet(mut self, max_side_bet: usize) -> Self {
        self.max_side_bet = max_side_bet;
        self
    }

    /// Checks the limits.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_bet` is zero or above `max_bet`, or the side
    /// bet cap is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(ConfigError::InvalidBetLimits);
        }
        if self.max_side_bet == 0 {
            return Err(ConfigError::InvalidSideBetLimit);
        }
        Ok(())
    }

    /// Returns whether a main bet is within the limits.
    #[must_use]
    pub const fn allows(&self, bet: usize) -> bool {
        bet >= self.min_bet && bet <= self.max_bet
    }
}

/// Everything a [`Game`](crate::Game) needs to open a table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableConfig {
    /// House rules.
    pub rules: GameRules,
    /// Betting limits.
    pub limits: TableLimits,
    /// Shoe composition and shuffling.
    pub shoe: ShoeConfig,
}

impl TableConfig {
    /// Bundles rules, limits and shoe settings.
    #[must_use]
    pub const fn new(rules: GameRules, limits: TableLimits, shoe: ShoeConfig) -> Self {
        Self {
            rules,
            limits,
            shoe,
        }
    }

    /// Validates all three parts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        self.limits.validate()?;
        self.shoe.validate()
    }
}
