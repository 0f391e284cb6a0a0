use crate::card::{Card, Suit};
use crate::error::{ActionError, SuitError};
use crate::event::GameEvent;

use super::state::Resolution;
use super::{Game, GameState};

impl Game {
    /// Player action: play `card`, or draw when `card` is `None`.
    ///
    /// The state, the acting player and the card are all checked before
    /// anything changes, so a rejected call leaves hands, deck and discard
    /// pile untouched. On success the card's effect is applied and, unless
    /// a suit must be declared first, the next player is prompted.
    ///
    /// Returns `Ok(false)` when the player does not hold `card` or it cannot
    /// be played on the current top; the game keeps waiting for the same
    /// player, who may try again.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not waiting for a card, it is not the
    /// player's turn, or the player has no hand.
    pub fn play_card(&self, player_id: u8, card: Option<Card>) -> Result<bool, ActionError> {
        let Some(card) = card else {
            return self.draw_card(player_id);
        };

        let size = {
            let mut state = self.state.lock();
            if *state != GameState::WaitingForPlayerCard {
                return Err(ActionError::InvalidState);
            }
            if *self.current.lock() != Some(player_id) {
                return Err(ActionError::NotYourTurn);
            }

            let mut hands = self.hands.lock();
            let hand = hands
                .get_mut(&player_id)
                .ok_or(ActionError::PlayerNotFound)?;
            let on_top = self.discard.lock().top();
            if !hand.contains(card) || !on_top.is_none_or(|top| card.is_playable_on(top)) {
                log::trace!("player {player_id} cannot play {card}");
                return Ok(false);
            }

            hand.remove(card);
            *state = GameState::Playing;
            hand.len()
        };
        log::trace!("player {player_id} plays {card}");

        self.place_on_discard(card);
        self.publish(GameEvent::HandSizeChanged { player_id, size });

        if self.apply_effect(card) == Resolution::Complete {
            self.finish_resolution();
        }
        Ok(true)
    }

    /// Player action: draw a card instead of playing one.
    ///
    /// Draws one card into the player's hand and passes the turn. Card
    /// effects never trigger on a draw. When neither the deck nor the
    /// discard pile has a card to give, the draw is skipped but the turn
    /// still passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not waiting for a card, it is not the
    /// player's turn, or the player has no hand.
    pub fn draw_card(&self, player_id: u8) -> Result<bool, ActionError> {
        {
            let mut state = self.state.lock();
            if *state != GameState::WaitingForPlayerCard {
                return Err(ActionError::InvalidState);
            }
            if *self.current.lock() != Some(player_id) {
                return Err(ActionError::NotYourTurn);
            }
            if !self.hands.lock().contains_key(&player_id) {
                return Err(ActionError::PlayerNotFound);
            }
            *state = GameState::Playing;
        }
        log::trace!("player {player_id} draws");

        self.draw_into(player_id);
        self.move_to_next_player();
        self.finish_resolution();
        Ok(true)
    }

    /// Player action: declare the suit after playing a wild card.
    ///
    /// The top of the discard pile becomes a virtual card of `suit` with the
    /// wild card's rank, and the turn passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not waiting for a suit, or a
    /// different player was asked to choose it.
    pub fn select_suit(&self, player_id: u8, suit: Suit) -> Result<(), SuitError> {
        let declared = {
            let mut state = self.state.lock();
            if *state != GameState::WaitingForPlayerSuit {
                return Err(SuitError::InvalidState);
            }
            if *self.current.lock() != Some(player_id) {
                return Err(SuitError::NotYourTurn);
            }
            *state = GameState::Playing;
            self.discard.lock().declare_suit(suit)
        };
        log::debug!("player {player_id} declares {suit:?}");

        if let Some(card) = declared {
            self.publish(GameEvent::TopCardChanged(card));
        }
        self.move_to_next_player();
        self.finish_resolution();
        Ok(())
    }
}
