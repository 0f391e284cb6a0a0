//! Change notifications published by the engine.

use crate::card::Card;
use crate::game::Game;

/// Something observable changed in the game.
///
/// Each event carries only the field that changed; anything else can be
/// queried from the [`Game`] passed alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// A player's hand grew or shrank.
    HandSizeChanged {
        /// The player whose hand changed.
        player_id: u8,
        /// The new number of cards in that hand.
        size: usize,
    },
    /// The visible top of the discard pile changed, including the virtual
    /// card created by a suit declaration.
    TopCardChanged(Card),
    /// A player emptied their hand and the game is over.
    ///
    /// Observers decide their own outcome by checking whether their hand
    /// is empty, or by comparing against `winner`.
    GameComplete {
        /// The player who ran out of cards.
        winner: u8,
    },
}

/// Handle returned by [`Game::add_listener`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) usize);

/// Receives [`GameEvent`]s.
///
/// Listeners run synchronously on whichever thread triggered the change,
/// in registration order. No engine lock is held during the call, so a
/// listener may query the game.
pub trait GameListener: Send + Sync {
    /// Called once per published event.
    fn on_event(&self, game: &Game, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: Fn(&Game, &GameEvent) + Send + Sync,
{
    fn on_event(&self, game: &Game, event: &GameEvent) {
        self(game, event);
    }
}
