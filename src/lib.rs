//! A Crazy Eights game engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that owns the deck, the discard pile,
//! every hand and the turn order. Participants implement [`Player`] and are
//! prompted when it is their turn; they answer by calling back into the
//! engine, either immediately (as [`RandomPlayer`] does) or later from an
//! external input source (as [`ExternalPlayer`] allows). Observers subscribe
//! with [`Game::add_listener`] to hear about hand sizes, the top card, and
//! the end of the game.
//!
//! Special ranks:
//!
//! | Rank  | Effect                                         |
//! |-------|------------------------------------------------|
//! | Ace   | Reverses the turn order                        |
//! | 2     | The next player draws two cards                |
//! | 8     | Wild; the player declares the next suit        |
//! | Queen | The next player is skipped                     |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use crazy_eights::{Game, GameOptions, GameState, RandomPlayer};
//!
//! let game = Game::new(GameOptions::default(), 42);
//! game.add_player(Arc::new(RandomPlayer::new(1))).unwrap();
//! game.add_player(Arc::new(RandomPlayer::new(2))).unwrap();
//! game.start().unwrap();
//!
//! // Automated players play the whole game out inside `start`.
//! assert_eq!(game.state(), GameState::Inactive);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, FACE_DOWN_KEY, RankEffect, Suit};
pub use deck::{Deck, DiscardPile};
pub use error::{ActionError, RegistrationError, StartError, SuitError};
pub use event::{GameEvent, GameListener, ListenerId};
pub use game::{Game, GameState};
pub use hand::Hand;
pub use options::{GameOptions, INITIAL_HAND_SIZE};
pub use player::{ExternalPlayer, Player, Prompt, RandomPlayer};
