//! Multi-deck shoes, cut-card placement and the session shuffler.

extern crate alloc;

use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, Face, jokers, new_deck};
use crate::error::{ConfigError, ShoeError};
use crate::shuffle::{ShuffleMethod, shuffle_with};

/// Shoe composition and shuffling settings.
///
/// The deck count lives in [`GameRules`](crate::GameRules).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShoeConfig {
    /// Extra cards appended after the decks.
    pub custom_cards: Vec<Card>,
    /// Whether a red and a black joker are added.
    pub include_jokers: bool,
    /// Fraction of the shoe dealt before the cut card comes out.
    pub penetration: f64,
    /// Shuffle algorithm used for every new shoe.
    pub shuffle: ShuffleMethod,
    /// Passes (or strip cuts) for the shuffle; `None` uses the method default.
    pub passes: Option<u32>,
}

impl Default for ShoeConfig {
    fn default() -> Self {
        Self {
            custom_cards: Vec::new(),
            include_jokers: false,
            penetration: 0.75,
            shuffle: ShuffleMethod::FisherYates,
            passes: None,
        }
    }
}

impl ShoeConfig {
    /// Sets the penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::ShoeConfig;
    ///
    /// let config = ShoeConfig::default().with_penetration(0.8);
    /// assert_eq!(config.penetration, 0.8);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the shuffle method and pass count.
    #[must_use]
    pub const fn with_shuffle(mut self, method: ShuffleMethod, passes: Option<u32>) -> Self {
        self.shuffle = method;
        self.passes = passes;
        self
    }

    /// Sets whether jokers are added.
    #[must_use]
    pub const fn with_jokers(mut self, include: bool) -> Self {
        self.include_jokers = include;
        self
    }

    /// Sets the extra cards appended to every shoe.
    #[must_use]
    pub fn with_custom_cards(mut self, cards: Vec<Card>) -> Self {
        self.custom_cards = cards;
        self
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the penetration is outside `(0, 1]` or the pass
    /// count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.penetration > 0.0 && self.penetration <= 1.0) {
            return Err(ConfigError::InvalidPenetration);
        }
        if self.passes == Some(0) {
            return Err(ConfigError::InvalidShufflePasses);
        }
        Ok(())
    }
}

/// A shoe of cards.
///
/// The front of the undealt sequence is the top of the shoe. Dealt cards stay
/// counted in [`Shoe::total`], so `remaining + dealt == total` for the whole
/// life of the shoe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
    position: usize,
    cut_card_position: usize,
    shuffled: bool,
}

impl Shoe {
    /// Builds an unshuffled shoe of `decks` fresh decks in deck order,
    /// followed by `custom_cards` and, optionally, two jokers.
    ///
    /// Cards are numbered in build order.
    #[must_use]
    pub fn build(decks: u8, custom_cards: &[Card], include_jokers: bool) -> Self {
        let joker_count = if include_jokers { 2 } else { 0 };
        let mut cards =
            Vec::with_capacity(decks as usize * DECK_SIZE + custom_cards.len() + joker_count);

        for _ in 0..decks {
            cards.extend(new_deck());
        }
        cards.extend_from_slice(custom_cards);
        if include_jokers {
            cards.extend(jokers());
        }

        Self::from_cards(cards)
    }

    /// Creates a stacked shoe dealing `cards` front to back.
    ///
    /// Cards are renumbered in order and turned face up.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let cards = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| card.with_id(i as u32).with_face(Face::Up))
            .collect();

        Self {
            cards,
            position: 0,
            cut_card_position: 0,
            shuffled: false,
        }
    }

    /// Returns the shoe with its undealt cards reordered by `method`.
    #[must_use]
    pub fn shuffled(
        mut self,
        method: ShuffleMethod,
        passes: Option<u32>,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut undealt = self.cards.split_off(self.position);
        shuffle_with(&mut undealt, method, passes, rng);
        self.cards.extend(undealt);
        self.shuffled = true;
        self
    }

    /// Returns the shoe with the cut card placed `penetration` of the way in.
    ///
    /// The cut card sits `floor(remaining * (1 - penetration))` cards from the
    /// bottom.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPenetration`] unless `penetration` is in
    /// `(0, 1]`.
    pub fn with_cut_card(mut self, penetration: f64) -> Result<Self, ConfigError> {
        if !(penetration > 0.0 && penetration <= 1.0) {
            return Err(ConfigError::InvalidPenetration);
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let behind = self.remaining() as f64 * (1.0 - penetration);
        self.cut_card_position = behind as usize;
        Ok(self)
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] when no cards remain.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        let card = *self.cards.get(self.position).ok_or(ShoeError::Empty)?;
        self.position += 1;
        tracing::trace!(id = card.id, rank = ?card.rank, suit = ?card.suit, "card drawn");
        Ok(card)
    }

    /// Returns whether the cut card has come out.
    ///
    /// This is advisory: rounds already in progress finish with this shoe.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.remaining() <= self.cut_card_position
    }

    /// Returns the undealt cards, top first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards[self.position..]
    }

    /// Returns the number of undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    /// Returns the number of cards dealt so far.
    #[must_use]
    pub const fn dealt(&self) -> usize {
        self.position
    }

    /// Returns the number of cards the shoe was built with.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Returns the cut card position, counted from the bottom.
    #[must_use]
    pub const fn cut_card_position(&self) -> usize {
        self.cut_card_position
    }

    /// Returns whether the shoe has been shuffled.
    #[must_use]
    pub const fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Returns a summary of the shoe's state.
    #[must_use]
    pub fn summary(&self) -> ShoeSummary {
        ShoeSummary {
            total: self.total(),
            remaining: self.remaining(),
            dealt: self.dealt(),
            cut_card_position: self.cut_card_position,
            reshuffled: false,
        }
    }
}

/// Snapshot of a shoe's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShoeSummary {
    /// Cards the shoe was built with.
    pub total: usize,
    /// Undealt cards.
    pub remaining: usize,
    /// Dealt cards.
    pub dealt: usize,
    /// Cut card position, counted from the bottom.
    pub cut_card_position: usize,
    /// Whether the shoe was replaced after this summary was taken.
    pub reshuffled: bool,
}

/// Builds and shuffles shoes for one session.
///
/// The manager owns the session's random number generator. Shuffles given an
/// explicit seed ignore it and are reproducible on their own.
#[derive(Debug, Clone)]
pub struct ShoeManager {
    rng: ChaCha8Rng,
}

impl ShoeManager {
    /// Creates a manager whose generator is seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a manager seeded from the operating system.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Builds an unshuffled shoe. See [`Shoe::build`].
    #[must_use]
    pub fn build(&self, decks: u8, custom_cards: &[Card], include_jokers: bool) -> Shoe {
        Shoe::build(decks, custom_cards, include_jokers)
    }

    /// Returns `shoe` shuffled with `method`.
    ///
    /// With `Some(seed)` the result depends only on the shoe, the method, the
    /// pass count and the seed. With `None` the session generator is used.
    #[must_use]
    pub fn shuffle(
        &mut self,
        shoe: Shoe,
        method: ShuffleMethod,
        passes: Option<u32>,
        seed: Option<u64>,
    ) -> Shoe {
        match seed {
            Some(seed) => shoe.shuffled(method, passes, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => shoe.shuffled(method, passes, &mut self.rng),
        }
    }

    /// Places the cut card. See [`Shoe::with_cut_card`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPenetration`] unless `penetration` is in
    /// `(0, 1]`.
    pub fn place_cut_card(&self, shoe: Shoe, penetration: f64) -> Result<Shoe, ConfigError> {
        shoe.with_cut_card(penetration)
    }

    /// Builds, shuffles and cuts a fresh shoe from the session generator.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid. The generator is not advanced
    /// in that case.
    pub fn fresh_shoe(&mut self, decks: u8, config: &ShoeConfig) -> Result<Shoe, ConfigError> {
        config.validate()?;
        let shoe = self.build(decks, &config.custom_cards, config.include_jokers);
        let shoe = self.shuffle(shoe, config.shuffle, config.passes, None);
        let shoe = self.place_cut_card(shoe, config.penetration)?;
        tracing::info!(
            total = shoe.total(),
            cut_card = shoe.cut_card_position(),
            method = ?config.shuffle,
            "new shoe"
        );
        Ok(shoe)
    }
}
