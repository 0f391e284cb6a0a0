use crate::card::{Card, RankEffect};
use crate::event::GameEvent;

use super::state::Resolution;
use super::{Game, GameState};

/// Cards the next player draws after a 2.
const DRAW_TWO_PENALTY: usize = 2;

impl Game {
    fn is_playing(&self) -> bool {
        *self.state.lock() == GameState::Playing
    }

    /// Applies the effect of a card that has just been discarded.
    pub(super) fn apply_effect(&self, card: Card) -> Resolution {
        if !self.is_playing() {
            return Resolution::Complete;
        }

        match card.effect() {
            RankEffect::Reverse => {
                self.turn_order.lock().reverse();
                self.move_to_next_player();
            }
            RankEffect::DrawTwo => {
                self.move_to_next_player();
                self.draw_cards(DRAW_TWO_PENALTY);
            }
            RankEffect::ChooseSuit => return self.prompt_suit(),
            RankEffect::Skip => {
                self.move_to_next_player();
                self.move_to_next_player();
            }
            RankEffect::Pass => self.move_to_next_player(),
        }

        Resolution::Complete
    }

    /// Passes the turn to whoever follows the current player in the
    /// current turn order.
    pub(super) fn move_to_next_player(&self) {
        if !self.is_playing() {
            return;
        }

        let mut current = self.current.lock();
        let order = self.turn_order.lock();
        if order.is_empty() {
            return;
        }

        let next = current
            .and_then(|id| order.iter().position(|&other| other == id))
            .map_or(0, |index| (index + 1) % order.len());
        *current = Some(order[next]);
    }

    /// Makes the current player draw `n` cards.
    pub(super) fn draw_cards(&self, n: usize) {
        if !self.is_playing() {
            return;
        }

        let Some(player_id) = *self.current.lock() else {
            return;
        };
        for _ in 0..n {
            self.draw_into(player_id);
        }
    }

    /// Moves the front card of the deck into a player's hand.
    ///
    /// When the deck is down to its last card, everything under the top of
    /// the discard pile is shuffled back into it first. Returns `None` when
    /// there is nothing left to draw.
    pub(super) fn draw_into(&self, player_id: u8) -> Option<Card> {
        if !self.is_playing() {
            return None;
        }

        let drawn = {
            let mut deck = self.deck.lock();
            if deck.len() <= 1 {
                let recycled = self.discard.lock().take_all_but_top();
                if !recycled.is_empty() {
                    log::debug!("reshuffling {} discarded cards into the deck", recycled.len());
                    deck.extend(recycled);
                    deck.shuffle(&mut *self.rng.lock());
                }
            }
            deck.draw()
        };
        let Some(card) = drawn else {
            log::debug!("player {player_id} has nothing left to draw");
            return None;
        };

        let size = {
            let mut hands = self.hands.lock();
            let hand = hands.entry(player_id).or_default();
            hand.add(card);
            hand.len()
        };
        self.publish(GameEvent::HandSizeChanged { player_id, size });

        Some(card)
    }

    /// Puts a card on the discard pile and announces the new top.
    pub(super) fn place_on_discard(&self, card: Card) {
        if !self.is_playing() {
            return;
        }

        self.discard.lock().place(card);
        self.publish(GameEvent::TopCardChanged(card));
    }

    /// Asks the current player to declare a suit for the wild card they
    /// just played.
    fn prompt_suit(&self) -> Resolution {
        let (player_id, player) = {
            let mut state = self.state.lock();
            if *state != GameState::Playing {
                return Resolution::Complete;
            }
            let Some(player_id) = *self.current.lock() else {
                return Resolution::Complete;
            };
            let Some(player) = self.players.lock().get(&player_id).cloned() else {
                return Resolution::Complete;
            };
            *state = GameState::WaitingForPlayerSuit;
            (player_id, player)
        };

        log::trace!("prompting player {player_id} for a suit");
        player.choose_suit(player_id, self);
        Resolution::AwaitingSuit
    }
}
