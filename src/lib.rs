//! A blackjack round engine with optional `no_std` support.
//!
//! The crate builds multi-deck shoes, shuffles them with a seeded generator
//! and runs a single player's rounds through [`Game`]: betting, the initial
//! deal, player actions, insurance, dealer play, settlement and cleanup.
//! Every operation either succeeds or leaves the game untouched.
//!
//! # Example
//!
//! ```
//! use bjengine::{Action, Bet, Game, Phase, TableConfig};
//!
//! let mut game = Game::new(TableConfig::default(), 42).unwrap().with_balance(1_000);
//! let snapshot = game.place_bet(Bet::new(100)).unwrap();
//!
//! if let Some(hand) = snapshot.current_hand {
//!     game.submit_action(hand, Action::Stand).unwrap();
//! }
//! assert_eq!(game.phase(), Phase::Completed);
//! assert!(game.last_result().is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod payout;
pub mod policy;
pub mod result;
pub mod rules;
pub mod shoe;
pub mod shuffle;

pub use card::{Card, DECK_SIZE, Face, Rank, Suit};
pub use error::{ConfigError, IllegalAction, RoundError, ShoeError};
pub use game::{Action, Bet, Game, Phase, PhaseEvent, ROUND_RESERVE, RoundSnapshot};
pub use hand::{DealerHand, Hand, HandId, HandStatus, HandValue, evaluate};
pub use payout::{Odds, SideBetKind, settle_insurance, settle_main_bet, settle_side_bet};
pub use policy::{DealerAction, next_action};
pub use result::{HandOutcome, HandResult, InsuranceResult, RoundResult, SideBetResult};
pub use rules::{DoubleOption, GameRules, RoundingMode, TableConfig, TableLimits};
pub use shoe::{Shoe, ShoeConfig, ShoeManager, ShoeSummary};
pub use shuffle::ShuffleMethod;
