//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur while adding or removing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Players cannot join or leave while a game is active.
    #[error("cannot change players while a game is in progress")]
    GameInProgress,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Every player ID has been handed out.
    #[error("no player IDs left to assign")]
    TooManyPlayers,
}

/// Errors that can occur when starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// Fewer players are registered than the options require.
    #[error("not enough players to start a game")]
    NotEnoughPlayers,
    /// The deck cannot deal every hand plus the first discard, or the
    /// options deal empty hands.
    #[error("not enough cards to deal every player")]
    NotEnoughCards,
}

/// Errors that can occur when playing or drawing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game is not waiting for a card.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
}

/// Errors that can occur when declaring a suit after a wild card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuitError {
    /// The game is not waiting for a suit.
    #[error("player is not allowed to select a suit at this time")]
    InvalidState,
    /// Another player was asked to choose the suit.
    #[error("not this player's turn")]
    NotYourTurn,
}
