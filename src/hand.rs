//! Hand evaluation and the player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::{Card, Face, Rank};

/// Total of a hand and whether an ace is still counted as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandValue {
    /// Best total.
    pub total: u8,
    /// Whether at least one ace is counted as 11.
    pub soft: bool,
}

impl HandValue {
    /// Returns whether the total is over 21.
    #[must_use]
    pub const fn is_bust(self) -> bool {
        self.total > 21
    }
}

/// Evaluates a sequence of cards.
///
/// Every ace starts at 11; while the total is over 21 and an ace is still
/// counted high, one ace drops to 1.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut high_aces: u8 = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            high_aces += 1;
        }
        total = total.saturating_add(card.rank.points());
    }

    while total > 21 && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }

    HandValue {
        total,
        soft: high_aces > 0,
    }
}

/// Returns whether `cards` form a natural: two cards totalling 21 that did
/// not come from a split.
#[must_use]
pub fn is_natural(cards: &[Card], from_split: bool) -> bool {
    !from_split && cards.len() == 2 && evaluate(cards).total == 21
}

/// Identifier of a player hand within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandId(pub u32);

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood.
    Stood,
    /// Hand has busted (over 21).
    Busted,
    /// Hand is a natural blackjack.
    Blackjack,
    /// Hand doubled down and stands on its third card.
    Doubled,
    /// Player has surrendered.
    Surrendered,
    /// Hand was split and replaced by two new hands.
    SplitOrigin,
}

impl HandStatus {
    /// Returns whether the hand takes no further actions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hand {
    id: HandId,
    cards: Vec<Card>,
    status: HandStatus,
    bet: usize,
    from_split: bool,
    splits_so_far: u8,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(id: HandId, bet: usize) -> Self {
        Self {
            id,
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            from_split: false,
            splits_so_far: 0,
        }
    }

    /// Creates one half of a split, holding a single card.
    #[must_use]
    pub fn from_split(id: HandId, card: Card, bet: usize, splits_so_far: u8) -> Self {
        Self {
            id,
            cards: alloc::vec![card],
            status: HandStatus::Active,
            bet,
            from_split: true,
            splits_so_far,
        }
    }

    /// Adds a card to the hand and updates its status.
    ///
    /// A bust marks the hand busted, a natural marks it blackjack and any
    /// other 21 stands it.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        let value = self.value();
        if value.is_bust() {
            self.status = HandStatus::Busted;
        } else if is_natural(&self.cards, self.from_split) {
            self.status = HandStatus::Blackjack;
        } else if value.total == 21 && self.status == HandStatus::Active {
            self.status = HandStatus::Stood;
        }
    }

    /// Returns the hand id.
    #[must_use]
    pub const fn id(&self) -> HandId {
        self.id
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the amount at risk on this hand, including any double.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet amount.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns how many splits led to this hand.
    #[must_use]
    pub const fn splits_so_far(&self) -> u8 {
        self.splits_so_far
    }

    /// Evaluates the hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Returns whether the hand is soft.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.value().soft
    }

    /// Returns whether the hand is a natural blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_natural(&self.cards, self.from_split)
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value().is_bust()
    }

    /// Returns whether the hand is a two-card pair.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.rank == b.rank)
    }

    /// Returns whether the hand is a pair of aces.
    #[must_use]
    pub fn is_ace_pair(&self) -> bool {
        self.is_pair() && self.cards[0].rank == Rank::Ace
    }

    /// Returns whether the hand started as one half of a split pair of aces.
    #[must_use]
    pub fn is_split_ace(&self) -> bool {
        self.from_split && self.cards.first().is_some_and(|c| c.rank == Rank::Ace)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the first two cards dealt to the hand.
    #[must_use]
    pub fn first_two(&self) -> Option<[Card; 2]> {
        match self.cards.as_slice() {
            [a, b, ..] => Some([*a, *b]),
            _ => None,
        }
    }

    /// Splits a pair into its two cards, marking this hand as the split origin.
    pub fn take_pair(&mut self) -> Option<[Card; 2]> {
        if !self.is_pair() {
            return None;
        }
        let pair = self.first_two()?;
        self.status = HandStatus::SplitOrigin;
        Some(pair)
    }
}

/// The dealer's hand.
///
/// The hole card is dealt face down and turned over by [`DealerHand::reveal_hole`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DealerHand {
    cards: Vec<Card>,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns whether every card is face up.
    #[must_use]
    pub fn is_hole_revealed(&self) -> bool {
        self.cards.iter().all(Card::is_face_up)
    }

    /// Turns every face-down card face up.
    pub fn reveal_hole(&mut self) {
        for card in &mut self.cards {
            if card.face == Face::Down {
                *card = card.flipped();
            }
        }
    }

    /// Evaluates only the face-up cards.
    #[must_use]
    pub fn visible_value(&self) -> HandValue {
        let visible: Vec<Card> = self.cards.iter().copied().filter(Card::is_face_up).collect();
        evaluate(&visible)
    }

    /// Evaluates the full hand, hole card included.
    #[must_use]
    pub fn value(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_natural(&self.cards, false)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value().is_bust()
    }

    /// Returns whether the hand is soft.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.value().soft
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
