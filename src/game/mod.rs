//! Game engine and state management.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use alloc::sync::Arc;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::sync::Mutex;

use crate::card::{Card, DECK_SIZE};
use crate::deck::{Deck, DiscardPile};
use crate::error::{RegistrationError, StartError};
use crate::event::{GameListener, ListenerId};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::player::Player;

mod actions;
mod effects;
mod round;
pub mod state;

#[cfg(all(test, feature = "std"))]
mod tests;

pub use state::GameState;

/// A Crazy Eights engine that manages players, cards, and turn order.
///
/// Every method takes `&self`: players and listeners receive a reference to
/// the game and call back into it while the engine is still on the stack,
/// and a host may share the game behind an [`Arc`] to answer prompts later.
/// Lock order is `state`, `current`, `turn_order`, `players`, `hands`,
/// `deck`, `discard`, `rng`, `listeners`; no lock is held while a player or
/// listener runs.
pub struct Game {
    /// Game options.
    options: GameOptions,
    /// Current game state.
    state: Mutex<GameState>,
    /// Next player ID to assign.
    next_id: AtomicU8,
    /// Player IDs in turn order. Reversed in place by an Ace.
    turn_order: Mutex<Vec<u8>>,
    /// Registered players (`player_id` -> capability).
    players: Mutex<HashMap<u8, Arc<dyn Player>>>,
    /// Player hands (`player_id` -> hand).
    hands: Mutex<HashMap<u8, Hand>>,
    /// Draw pile.
    deck: Mutex<Deck>,
    /// Discard pile.
    discard: Mutex<DiscardPile>,
    /// Player whose turn it is.
    current: Mutex<Option<u8>>,
    /// Subscribed listeners, in registration order.
    listeners: Mutex<Vec<(ListenerId, Arc<dyn GameListener>)>>,
    /// Next listener ID to assign.
    next_listener: AtomicUsize,
    /// A prompt has been scheduled but not yet issued.
    round_pending: AtomicBool,
    /// Some caller up the stack is issuing scheduled prompts.
    driving: AtomicBool,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
}

impl Game {
    /// Creates a new game with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use crazy_eights::{Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!(game.state(), GameState::Inactive);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self {
            options,
            state: Mutex::new(GameState::Inactive),
            next_id: AtomicU8::new(0),
            turn_order: Mutex::new(Vec::new()),
            players: Mutex::new(HashMap::new()),
            hands: Mutex::new(HashMap::new()),
            deck: Mutex::new(Deck::new()),
            discard: Mutex::new(DiscardPile::new()),
            current: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicUsize::new(0),
            round_pending: AtomicBool::new(false),
            driving: AtomicBool::new(false),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Returns the options the game was created with.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Registers a player at the end of the turn order.
    ///
    /// Returns the assigned player ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a game is in progress or every ID has been used.
    /// IDs are never reused, so a game accepts at most 255 registrations.
    pub fn add_player(&self, player: Arc<dyn Player>) -> Result<u8, RegistrationError> {
        let state = self.state.lock();
        if *state != GameState::Inactive {
            return Err(RegistrationError::GameInProgress);
        }

        let id = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map_err(|_| RegistrationError::TooManyPlayers)?;
        self.turn_order.lock().push(id);
        self.players.lock().insert(id, player);
        self.hands.lock().insert(id, Hand::new());
        drop(state);

        log::debug!("player {id} joined");
        Ok(id)
    }

    /// Removes a player and their hand.
    ///
    /// # Errors
    ///
    /// Returns an error if a game is in progress or the player is unknown.
    pub fn remove_player(&self, player_id: u8) -> Result<(), RegistrationError> {
        let state = self.state.lock();
        if *state != GameState::Inactive {
            return Err(RegistrationError::GameInProgress);
        }

        let mut order = self.turn_order.lock();
        let Some(index) = order.iter().position(|&id| id == player_id) else {
            return Err(RegistrationError::PlayerNotFound);
        };
        order.remove(index);
        drop(order);

        self.players.lock().remove(&player_id);
        self.hands.lock().remove(&player_id);
        let mut current = self.current.lock();
        if *current == Some(player_id) {
            *current = None;
        }
        drop(current);
        drop(state);

        log::debug!("player {player_id} left");
        Ok(())
    }

    /// Returns the number of registered players.
    pub fn player_count(&self) -> usize {
        self.turn_order.lock().len()
    }

    /// Starts a new game.
    ///
    /// Builds and shuffles a fresh 52-card deck, clears every hand and the
    /// discard pile, deals each player their initial hand in turn order,
    /// turns over the first discard and prompts the first registered player.
    /// The turn order is reset to registration order. Calling this while a
    /// game is running abandons that game.
    ///
    /// When every player resolves their prompts synchronously, the whole
    /// game is played out before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer players are registered than
    /// [`GameOptions::min_players`] (and never fewer than one), if the
    /// initial hand size is zero, or if the deck cannot deal every hand plus
    /// the first discard.
    pub fn start(&self) -> Result<(), StartError> {
        // IDs are handed out in increasing order, so sorting undoes any
        // reversal left over from the previous game.
        let order = {
            let mut order = self.turn_order.lock();
            order.sort_unstable();
            order.clone()
        };
        if order.len() < self.options.min_players.max(1) {
            return Err(StartError::NotEnoughPlayers);
        }
        let hand_size = self.options.initial_hand_size;
        if hand_size == 0
            || order
                .len()
                .checked_mul(hand_size)
                .is_none_or(|dealt| dealt >= DECK_SIZE)
        {
            return Err(StartError::NotEnoughCards);
        }

        {
            let mut state = self.state.lock();
            *state = GameState::Playing;
            *self.current.lock() = order.first().copied();

            let mut hands = self.hands.lock();
            for id in &order {
                hands.entry(*id).or_default().clear();
            }
            drop(hands);

            let mut deck = self.deck.lock();
            let mut discard = self.discard.lock();
            *deck = Deck::standard();
            deck.shuffle(&mut *self.rng.lock());
            discard.clear();
        }
        log::debug!("starting game with {} players", order.len());

        for &id in &order {
            for _ in 0..self.options.initial_hand_size {
                self.draw_into(id);
            }
        }

        let first = self.deck.lock().draw();
        if let Some(card) = first {
            self.place_on_discard(card);
        }

        self.schedule_round();
        Ok(())
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        *self.state.lock()
    }

    /// Returns whether a game is in progress.
    pub fn is_active(&self) -> bool {
        self.state() != GameState::Inactive
    }

    /// Returns the player ID whose turn it is.
    ///
    /// Returns `None` before the first game has started.
    pub fn current_player(&self) -> Option<u8> {
        *self.current.lock()
    }

    /// Returns a snapshot of the turn order.
    pub fn turn_order(&self) -> Vec<u8> {
        self.turn_order.lock().clone()
    }

    /// Returns a copy of the player's hand.
    ///
    /// Returns `None` if the player ID is not found.
    pub fn hand(&self, player_id: u8) -> Option<Vec<Card>> {
        self.hands.lock().get(&player_id).map(Hand::to_vec)
    }

    /// Returns the hand sizes of all players in turn order, starting with
    /// `reference`.
    ///
    /// Returns `None` if `reference` is not registered.
    pub fn hand_sizes(&self, reference: u8) -> Option<Vec<usize>> {
        let order = self.turn_order.lock();
        let start = order.iter().position(|&id| id == reference)?;
        let hands = self.hands.lock();

        Some(
            order
                .iter()
                .cycle()
                .skip(start)
                .take(order.len())
                .map(|id| hands.get(id).map_or(0, Hand::len))
                .collect(),
        )
    }

    /// Returns the card plays are currently matched against.
    ///
    /// After a wild card this is the virtual card carrying the declared
    /// suit. Returns `None` before the first game has started.
    pub fn top_card(&self) -> Option<Card> {
        self.discard.lock().top()
    }

    /// Returns whether `card` may currently be played on the discard pile.
    pub fn is_playable(&self, card: Card) -> bool {
        self.top_card().is_none_or(|top| card.is_playable_on(top))
    }

    /// Returns the number of cards remaining in the deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.lock().len()
    }

    /// Returns the number of physical cards in the discard pile.
    pub fn discard_pile_len(&self) -> usize {
        self.discard.lock().len()
    }

    /// Subscribes a listener to change notifications.
    ///
    /// # Example
    ///
    /// ```
    /// use crazy_eights::{Game, GameEvent, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// let id = game.add_listener(|_game: &Game, event: &GameEvent| {
    ///     println!("{event:?}");
    /// });
    /// assert!(game.remove_listener(id));
    /// ```
    pub fn add_listener<L: GameListener + 'static>(&self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        let listener: Arc<dyn GameListener> = Arc::new(listener);
        self.listeners.lock().push((id, listener));
        id
    }

    /// Unsubscribes a listener.
    ///
    /// Returns `false` if the listener was not subscribed.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }
}
