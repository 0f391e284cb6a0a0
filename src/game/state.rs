//! Game state types.

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// No game in progress; players may join or leave.
    Inactive,
    /// The engine is resolving a play, a draw or a card effect.
    Playing,
    /// The current player has been asked to play or draw.
    WaitingForPlayerCard,
    /// The current player has been asked to declare a suit after a wild card.
    WaitingForPlayerSuit,
}

/// How far a discarded card's effect got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// The turn has moved on; the engine can check for a winner.
    Complete,
    /// A suit prompt is outstanding; resolution continues in `select_suit`.
    AwaitingSuit,
}
