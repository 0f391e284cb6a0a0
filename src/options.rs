//! Game configuration options.

/// Number of cards dealt to each player at the start of a game.
pub const INITIAL_HAND_SIZE: usize = 5;

/// Configuration options for a Crazy Eights game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use crazy_eights::GameOptions;
///
/// let options = GameOptions::default()
///     .with_initial_hand_size(7)
///     .with_min_players(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOptions {
    /// Cards dealt to each player when a game starts.
    pub initial_hand_size: usize,
    /// Minimum number of registered players needed to start.
    /// A game never starts with zero players, whatever this is set to.
    pub min_players: usize,
    /// Whether a panicking listener is caught and logged instead of
    /// unwinding into the engine. Only honoured with the `std` feature.
    pub isolate_listeners: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            initial_hand_size: INITIAL_HAND_SIZE,
            min_players: 2,
            isolate_listeners: false,
        }
    }
}

impl GameOptions {
    /// Sets the initial hand size.
    ///
    /// # Example
    ///
    /// ```
    /// use crazy_eights::GameOptions;
    ///
    /// let options = GameOptions::default().with_initial_hand_size(7);
    /// assert_eq!(options.initial_hand_size, 7);
    /// ```
    #[must_use]
    pub const fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Sets the minimum number of players.
    ///
    /// # Example
    ///
    /// ```
    /// use crazy_eights::GameOptions;
    ///
    /// let options = GameOptions::default().with_min_players(1);
    /// assert_eq!(options.min_players, 1);
    /// ```
    #[must_use]
    pub const fn with_min_players(mut self, min_players: usize) -> Self {
        self.min_players = min_players;
        self
    }

    /// Sets whether listener panics are contained.
    ///
    /// # Example
    ///
    /// ```
    /// use crazy_eights::GameOptions;
    ///
    /// let options = GameOptions::default().with_isolate_listeners(true);
    /// assert!(options.isolate_listeners);
    /// ```
    #[must_use]
    pub const fn with_isolate_listeners(mut self, isolate: bool) -> Self {
        self.isolate_listeners = isolate;
        self
    }
}
