//! Player capability and the two stock participants.
//!
//! The engine prompts players through [`Player`]; a player answers by
//! calling back into [`Game::play_card`], [`Game::draw_card`] or
//! [`Game::select_suit`], either before returning from the prompt or later
//! from outside the engine.

use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, Suit};
use crate::game::Game;
use crate::sync::Mutex;

/// A participant in a game.
pub trait Player: Send + Sync {
    /// It is `player_id`'s turn. `hand` is a copy of their cards.
    ///
    /// The player must eventually issue exactly one play or draw.
    fn take_turn(&self, player_id: u8, hand: Vec<Card>, game: &Game);

    /// `player_id` discarded a wild card and must declare a suit.
    fn choose_suit(&self, player_id: u8, game: &Game);
}

/// Automated player that plays a random legal card, or draws.
pub struct RandomPlayer {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomPlayer {
    /// Creates a player with its own seeded random source.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Player for RandomPlayer {
    fn take_turn(&self, player_id: u8, mut hand: Vec<Card>, game: &Game) {
        hand.shuffle(&mut *self.rng.lock());
        let choice = hand.into_iter().find(|&card| game.is_playable(card));

        match game.play_card(player_id, choice) {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("player {player_id}: card was refused, drawing instead");
                if let Err(err) = game.draw_card(player_id) {
                    log::warn!("player {player_id}: draw failed: {err}");
                }
            }
            Err(err) => log::warn!("player {player_id}: turn failed: {err}"),
        }
    }

    fn choose_suit(&self, player_id: u8, game: &Game) {
        let index = self.rng.lock().random_range(0..Suit::ALL.len());
        if let Err(err) = game.select_suit(player_id, Suit::ALL[index]) {
            log::warn!("player {player_id}: suit selection failed: {err}");
        }
    }
}

/// What the engine is currently asking an [`ExternalPlayer`] to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Play a card or draw; `hand` is the copy handed over with the prompt.
    Turn {
        /// The player's cards at the time of the prompt.
        hand: Vec<Card>,
    },
    /// Declare a suit for the wild card just played.
    ChooseSuit,
}

/// Player driven from outside the engine, e.g. by UI input.
///
/// Prompts are recorded and the call returns immediately, leaving the
/// engine parked until the host answers through the [`Game`] entry points.
///
/// ```
/// use std::sync::Arc;
/// use crazy_eights::{ExternalPlayer, Game, GameOptions, Prompt, RandomPlayer};
///
/// let game = Game::new(GameOptions::default(), 7);
/// let human = Arc::new(ExternalPlayer::new());
/// let me = game.add_player(human.clone()).unwrap();
/// game.add_player(Arc::new(RandomPlayer::new(1))).unwrap();
/// game.start().unwrap();
///
/// if let Some(Prompt::Turn { .. }) = human.take_prompt() {
///     game.draw_card(me).unwrap();
/// }
/// ```
#[derive(Default)]
pub struct ExternalPlayer {
    pending: Mutex<Option<Prompt>>,
}

impl ExternalPlayer {
    /// Creates a player with no pending prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent unanswered prompt without clearing it.
    pub fn pending(&self) -> Option<Prompt> {
        self.pending.lock().clone()
    }

    /// Returns and clears the most recent prompt.
    pub fn take_prompt(&self) -> Option<Prompt> {
        self.pending.lock().take()
    }
}

impl Player for ExternalPlayer {
    fn take_turn(&self, player_id: u8, hand: Vec<Card>, _game: &Game) {
        log::trace!("player {player_id}: waiting for external turn input");
        *self.pending.lock() = Some(Prompt::Turn { hand });
    }

    fn choose_suit(&self, player_id: u8, _game: &Game) {
        log::trace!("player {player_id}: waiting for external suit input");
        *self.pending.lock() = Some(Prompt::ChooseSuit);
    }
}
