//! Card types and deck utilities.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    /// Returns whether the suit is red.
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Hearts | Self::Diamonds)
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rank {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Joker. Only present when a shoe is built with jokers.
    Joker,
}

impl Rank {
    /// The thirteen standard ranks in deck order.
    pub const STANDARD: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Position in a suit with the ace low (Ace = 1, King = 13, Joker = 0).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Joker => 0,
            Self::Ace => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
            Self::Jack => 11,
            Self::Queen => 12,
            Self::King => 13,
        }
    }

    /// Blackjack point value with aces counted as 11.
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::Joker => 0,
            Self::Ace => 11,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            _ => self.ordinal(),
        }
    }

    /// Returns whether the rank is worth ten points.
    #[must_use]
    pub const fn is_ten_value(self) -> bool {
        matches!(self, Self::Ten | Self::Jack | Self::Queen | Self::King)
    }
}

/// Whether a card is visible to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    /// Visible.
    #[default]
    Up,
    /// Hidden (the dealer's hole card).
    Down,
}

/// A playing card.
///
/// Cards are plain values. Turning a card over yields a new card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Card {
    /// Identifier unique within the shoe the card was built into.
    pub id: u32,
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: Rank,
    /// Which side is showing.
    pub face: Face,
}

impl Card {
    /// Creates a new face-up card with id 0.
    ///
    /// Shoes assign their own ids when cards are built into them.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            id: 0,
            suit,
            rank,
            face: Face::Up,
        }
    }

    /// Returns the same card with the given id.
    #[must_use]
    pub const fn with_id(self, id: u32) -> Self {
        Self { id, ..self }
    }

    /// Returns the same card showing the given face.
    #[must_use]
    pub const fn with_face(self, face: Face) -> Self {
        Self { face, ..self }
    }

    /// Returns the card turned over.
    #[must_use]
    pub const fn flipped(self) -> Self {
        let face = match self.face {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        };
        self.with_face(face)
    }

    /// Returns whether the card is face up.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        matches!(self.face, Face::Up)
    }

    /// Returns whether the card is a joker.
    #[must_use]
    pub const fn is_joker(&self) -> bool {
        matches!(self.rank, Rank::Joker)
    }

    /// Returns whether two cards show the same rank and suit, ignoring id and face.
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Creates one unshuffled deck in suit-major order.
///
/// Ids run from 0 to 51; shoes renumber cards as they are built.
#[must_use]
pub fn new_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::STANDARD {
            cards.push(Card::new(suit, rank).with_id(cards.len() as u32));
        }
    }
    cards
}

/// The two jokers (red and black) a shoe may be built with.
#[must_use]
pub const fn jokers() -> [Card; 2] {
    [
        Card::new(Suit::Hearts, Rank::Joker),
        Card::new(Suit::Spades, Rank::Joker),
    ]
}
