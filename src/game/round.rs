use core::sync::atomic::{AtomicBool, Ordering};

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::event::{GameEvent, GameListener};
use crate::hand::Hand;

use super::{Game, GameState};

/// Releases the driver role even if a player panics mid-prompt.
struct DriverGuard<'a>(&'a AtomicBool);

impl Drop for DriverGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Game {
    /// Ends the game if anyone ran out of cards, otherwise schedules the
    /// next prompt.
    pub(super) fn finish_resolution(&self) {
        if !self.check_end_game() {
            self.schedule_round();
        }
    }

    /// Scans hands in turn order; the first empty one wins.
    fn check_end_game(&self) -> bool {
        let winner = {
            let order = self.turn_order.lock();
            let hands = self.hands.lock();
            order
                .iter()
                .copied()
                .find(|id| hands.get(id).is_some_and(Hand::is_empty))
        };
        let Some(winner) = winner else {
            return false;
        };

        *self.state.lock() = GameState::Inactive;
        log::info!("player {winner} has no cards left, game over");
        self.publish(GameEvent::GameComplete { winner });
        true
    }

    /// Queues a prompt for the current player.
    ///
    /// Prompts are issued by whichever caller is outermost: a player who
    /// answers from inside `take_turn` returns to the loop below instead of
    /// nesting another round on the stack.
    pub(super) fn schedule_round(&self) {
        self.round_pending.store(true, Ordering::Release);

        loop {
            if self.driving.swap(true, Ordering::AcqRel) {
                return;
            }
            {
                let _driver = DriverGuard(&self.driving);
                while self.round_pending.swap(false, Ordering::AcqRel) {
                    self.play_round();
                }
            }
            // A prompt queued from another thread between the last swap and
            // releasing the guard would otherwise be lost.
            if !self.round_pending.load(Ordering::Acquire) {
                return;
            }
        }
    }

    /// Hands the current player a copy of their cards and waits for a play.
    fn play_round(&self) {
        let (player_id, player, hand) = {
            let mut state = self.state.lock();
            if *state != GameState::Playing {
                return;
            }
            let Some(player_id) = *self.current.lock() else {
                return;
            };
            let Some(player) = self.players.lock().get(&player_id).cloned() else {
                return;
            };
            let hand = self
                .hands
                .lock()
                .get(&player_id)
                .map(Hand::to_vec)
                .unwrap_or_default();
            *state = GameState::WaitingForPlayerCard;
            (player_id, player, hand)
        };

        log::trace!("prompting player {player_id} with {} cards", hand.len());
        player.take_turn(player_id, hand, self);
    }

    /// Delivers an event to every listener, in registration order.
    pub(super) fn publish(&self, event: GameEvent) {
        let listeners: Vec<Arc<dyn GameListener>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            self.deliver(listener.as_ref(), &event);
        }
    }

    #[cfg(feature = "std")]
    fn deliver(&self, listener: &dyn GameListener, event: &GameEvent) {
        if !self.options.isolate_listeners {
            listener.on_event(self, event);
            return;
        }

        let outcome = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| {
            listener.on_event(self, event);
        }));
        if outcome.is_err() {
            log::warn!("listener panicked while handling {event:?}");
        }
    }

    #[cfg(not(feature = "std"))]
    fn deliver(&self, listener: &dyn GameListener, event: &GameEvent) {
        listener.on_event(self, event);
    }
}
