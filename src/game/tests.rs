//! Rank effects and pile handling on rigged hands.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use std::sync::Mutex as StdMutex;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::deck::{Deck, DiscardPile};
use crate::error::{ActionError, SuitError};
use crate::event::{GameEvent, GameListener};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::player::{ExternalPlayer, Prompt, RandomPlayer};

use super::{Game, GameState};

struct PanickingListener;

impl GameListener for PanickingListener {
    fn on_event(&self, _game: &Game, _event: &GameEvent) {
        panic!("listener failure");
    }
}

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// Every physical card the game holds, sorted.
fn physical_cards(game: &Game) -> Vec<Card> {
    let mut cards: Vec<Card> = game
        .hands
        .lock()
        .values()
        .flat_map(|hand| hand.cards().iter().copied())
        .collect();
    cards.extend(game.deck.lock().iter().copied());
    cards.extend(game.discard.lock().cards().iter().copied());
    cards.sort_by_key(|card| (card.suit as u8, card.rank));
    cards
}

#[derive(Default)]
struct Census {
    events: usize,
    bad_counts: Vec<usize>,
    reshuffles: usize,
    declarations: usize,
    last_discard_len: usize,
}

struct Table {
    game: Game,
    seats: Vec<Arc<ExternalPlayer>>,
    ids: Vec<u8>,
}

impl Table {
    /// Starts a game of external players and waits on the first seat.
    fn new(players: usize) -> Self {
        let game = Game::new(GameOptions::default(), 11);
        let mut seats = Vec::new();
        let mut ids = Vec::new();
        for _ in 0..players {
            let seat = Arc::new(ExternalPlayer::new());
            ids.push(game.add_player(seat.clone()).unwrap());
            seats.push(seat);
        }
        game.start().unwrap();
        assert_eq!(game.state(), GameState::WaitingForPlayerCard);
        assert_eq!(game.current_player(), Some(ids[0]));
        Self { game, seats, ids }
    }

    fn set_hand(&self, seat: usize, cards: &[Card]) {
        self.game
            .hands
            .lock()
            .insert(self.ids[seat], cards.iter().copied().collect::<Hand>());
    }

    fn set_discard(&self, cards: &[Card]) {
        *self.game.discard.lock() = cards.iter().copied().collect::<DiscardPile>();
    }

    fn set_deck(&self, cards: &[Card]) {
        *self.game.deck.lock() = cards.iter().copied().collect::<Deck>();
    }

    fn hand_len(&self, seat: usize) -> usize {
        self.game.hand(self.ids[seat]).unwrap().len()
    }

    fn record_events(&self) -> Arc<StdMutex<Vec<GameEvent>>> {
        let events = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        self.game.add_listener(move |_game: &Game, event: &GameEvent| {
            sink.lock().unwrap().push(*event);
        });
        events
    }
}

#[test]
fn ace_reverses_order_and_passes_to_new_neighbour() {
    let table = Table::new(3);
    let [a, b, c] = [table.ids[0], table.ids[1], table.ids[2]];
    table.set_hand(0, &[card(Suit::Hearts, 1), card(Suit::Clubs, 9)]);
    table.set_discard(&[card(Suit::Hearts, 5)]);

    assert_eq!(table.game.play_card(a, Some(card(Suit::Hearts, 1))), Ok(true));

    assert_eq!(table.game.turn_order(), vec![c, b, a]);
    assert_eq!(table.game.current_player(), Some(c));
    assert!(matches!(table.seats[2].pending(), Some(Prompt::Turn { .. })));

    // The reversed order sticks for later turns.
    table.game.draw_card(c).unwrap();
    assert_eq!(table.game.current_player(), Some(b));

    // A new game seats players in registration order again.
    table.game.start().unwrap();
    assert_eq!(table.game.turn_order(), vec![a, b, c]);
    assert_eq!(table.game.current_player(), Some(a));
}

#[test]
fn ace_with_two_players_passes_to_the_other_player() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Spades, 1), card(Suit::Clubs, 9)]);
    table.set_discard(&[card(Suit::Spades, 4)]);

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Spades, 1)))
        .unwrap();

    assert_eq!(table.game.current_player(), Some(table.ids[1]));
}

#[test]
fn two_makes_the_next_player_draw_two() {
    let table = Table::new(3);
    table.set_hand(0, &[card(Suit::Clubs, 2), card(Suit::Hearts, 9)]);
    table.set_discard(&[card(Suit::Clubs, 7)]);
    let before = table.hand_len(1);

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Clubs, 2)))
        .unwrap();

    assert_eq!(table.game.current_player(), Some(table.ids[1]));
    assert_eq!(table.hand_len(1), before + 2);
    match table.seats[1].pending() {
        Some(Prompt::Turn { hand }) => assert_eq!(hand.len(), before + 2),
        other => panic!("expected a turn prompt, got {other:?}"),
    }
}

#[test]
fn queen_skips_one_player() {
    let table = Table::new(3);
    table.set_hand(0, &[card(Suit::Diamonds, 12), card(Suit::Hearts, 9)]);
    table.set_discard(&[card(Suit::Diamonds, 3)]);

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Diamonds, 12)))
        .unwrap();

    assert_eq!(table.game.current_player(), Some(table.ids[2]));
    assert_eq!(table.seats[1].pending(), None);
}

#[test]
fn queen_with_two_players_returns_the_turn() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Diamonds, 12), card(Suit::Hearts, 9)]);
    table.set_discard(&[card(Suit::Diamonds, 3)]);
    table.seats[0].take_prompt();

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Diamonds, 12)))
        .unwrap();

    assert_eq!(table.game.current_player(), Some(table.ids[0]));
    assert!(matches!(table.seats[0].pending(), Some(Prompt::Turn { .. })));
}

#[test]
fn eight_waits_for_suit_then_passes() {
    let table = Table::new(3);
    let [a, b, _] = [table.ids[0], table.ids[1], table.ids[2]];
    table.set_hand(0, &[card(Suit::Hearts, 8), card(Suit::Hearts, 9)]);
    table.set_discard(&[card(Suit::Clubs, 3)]);

    assert_eq!(table.game.play_card(a, Some(card(Suit::Hearts, 8))), Ok(true));
    assert_eq!(table.game.state(), GameState::WaitingForPlayerSuit);
    assert_eq!(table.game.current_player(), Some(a));
    assert_eq!(table.seats[0].pending(), Some(Prompt::ChooseSuit));

    assert_eq!(
        table.game.select_suit(b, Suit::Spades),
        Err(SuitError::NotYourTurn)
    );
    assert_eq!(table.game.draw_card(a), Err(ActionError::InvalidState));

    table.game.select_suit(a, Suit::Spades).unwrap();

    assert_eq!(table.game.top_card(), Some(card(Suit::Spades, 8)));
    assert_eq!(table.game.current_player(), Some(b));
    assert_eq!(table.game.state(), GameState::WaitingForPlayerCard);
    assert!(table.game.is_playable(card(Suit::Spades, 2)));
    assert!(!table.game.is_playable(card(Suit::Hearts, 2)));
}

#[test]
fn declared_suit_publishes_virtual_top_card() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Hearts, 8), card(Suit::Hearts, 9)]);
    table.set_discard(&[card(Suit::Clubs, 3)]);
    let events = table.record_events();

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Hearts, 8)))
        .unwrap();
    table.game.select_suit(table.ids[0], Suit::Diamonds).unwrap();

    let tops: Vec<Card> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|event| match event {
            GameEvent::TopCardChanged(top) => Some(*top),
            _ => None,
        })
        .collect();
    assert_eq!(tops, vec![card(Suit::Hearts, 8), card(Suit::Diamonds, 8)]);
}

#[test]
fn eight_as_last_card_ends_game_after_suit() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Hearts, 8)]);
    table.set_discard(&[card(Suit::Clubs, 3)]);
    let events = table.record_events();

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Hearts, 8)))
        .unwrap();
    assert_eq!(table.game.state(), GameState::WaitingForPlayerSuit);

    table.game.select_suit(table.ids[0], Suit::Clubs).unwrap();

    assert_eq!(table.game.state(), GameState::Inactive);
    let completions = events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, GameEvent::GameComplete { .. }))
        .count();
    assert_eq!(completions, 1);
}

#[test]
fn emptying_a_hand_ends_the_game_once() {
    let table = Table::new(3);
    table.set_hand(0, &[card(Suit::Hearts, 5)]);
    table.set_discard(&[card(Suit::Hearts, 9)]);
    let events = table.record_events();

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Hearts, 5)))
        .unwrap();

    assert_eq!(table.game.state(), GameState::Inactive);
    assert!(!table.game.is_active());
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&GameEvent::GameComplete {
            winner: table.ids[0]
        })
    );
    let completions = events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, GameEvent::GameComplete { .. }))
        .count();
    assert_eq!(completions, 1);
    assert_eq!(table.seats[1].pending(), None);
    assert_eq!(
        table.game.draw_card(table.ids[1]),
        Err(ActionError::InvalidState)
    );
}

#[test]
fn unplayable_card_is_refused_and_retry_allowed() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Clubs, 4), card(Suit::Hearts, 6)]);
    table.set_discard(&[card(Suit::Hearts, 9)]);
    table.set_deck(&[card(Suit::Spades, 2), card(Suit::Spades, 3)]);

    assert_eq!(
        table.game.play_card(table.ids[0], Some(card(Suit::Clubs, 4))),
        Ok(false)
    );
    assert_eq!(table.game.state(), GameState::WaitingForPlayerCard);
    assert_eq!(table.hand_len(0), 2);
    assert_eq!(table.game.top_card(), Some(card(Suit::Hearts, 9)));
    assert_eq!(table.game.cards_remaining(), 2);

    assert_eq!(
        table.game.play_card(table.ids[0], Some(card(Suit::Hearts, 6))),
        Ok(true)
    );
    assert_eq!(table.game.hand(table.ids[0]), Some(vec![card(Suit::Clubs, 4)]));
}

#[test]
fn same_rank_is_playable_across_suits() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Spades, 9), card(Suit::Hearts, 6)]);
    table.set_discard(&[card(Suit::Hearts, 9)]);

    assert_eq!(
        table.game.play_card(table.ids[0], Some(card(Suit::Spades, 9))),
        Ok(true)
    );
    assert_eq!(table.game.top_card(), Some(card(Suit::Spades, 9)));
}

#[test]
fn low_deck_reshuffles_discards_under_the_top() {
    let table = Table::new(2);
    let top = card(Suit::Diamonds, 13);
    table.set_deck(&[card(Suit::Clubs, 10)]);
    table.set_discard(&[
        card(Suit::Spades, 4),
        card(Suit::Spades, 5),
        card(Suit::Spades, 6),
        top,
    ]);
    let before = table.hand_len(0);

    assert_eq!(table.game.draw_card(table.ids[0]), Ok(true));

    assert_eq!(table.hand_len(0), before + 1);
    assert_eq!(table.game.top_card(), Some(top));
    assert_eq!(table.game.discard_pile_len(), 1);
    // One deck card plus three recycled, minus the one drawn.
    assert_eq!(table.game.cards_remaining(), 3);
    assert_eq!(table.game.current_player(), Some(table.ids[1]));
}

#[test]
fn reshuffle_keeps_declared_suit() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Hearts, 8), card(Suit::Hearts, 9)]);
    table.set_discard(&[card(Suit::Spades, 4), card(Suit::Clubs, 3)]);
    table.set_deck(&[card(Suit::Clubs, 10)]);

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Hearts, 8)))
        .unwrap();
    table.game.select_suit(table.ids[0], Suit::Spades).unwrap();
    table.game.draw_card(table.ids[1]).unwrap();

    assert_eq!(table.game.top_card(), Some(card(Suit::Spades, 8)));
    assert_eq!(table.game.discard_pile_len(), 1);
}

#[test]
fn draw_with_nothing_left_still_passes_the_turn() {
    let table = Table::new(2);
    table.set_deck(&[]);
    table.set_discard(&[card(Suit::Hearts, 9)]);
    let before = table.hand_len(0);

    assert_eq!(table.game.draw_card(table.ids[0]), Ok(true));

    assert_eq!(table.hand_len(0), before);
    assert_eq!(table.game.current_player(), Some(table.ids[1]));
    assert_eq!(table.game.state(), GameState::WaitingForPlayerCard);
}

#[test]
fn two_draws_through_a_reshuffle() {
    let table = Table::new(2);
    table.set_hand(0, &[card(Suit::Clubs, 2), card(Suit::Hearts, 9)]);
    table.set_deck(&[card(Suit::Diamonds, 10)]);
    table.set_discard(&[card(Suit::Spades, 4), card(Suit::Clubs, 7)]);
    let before = table.hand_len(1);

    table
        .game
        .play_card(table.ids[0], Some(card(Suit::Clubs, 2)))
        .unwrap();

    assert_eq!(table.hand_len(1), before + 2);
    assert_eq!(table.game.top_card(), Some(card(Suit::Clubs, 2)));
    assert_eq!(table.game.discard_pile_len(), 1);
}

#[test]
fn panicking_listener_is_contained_when_isolated() {
    let game = Game::new(GameOptions::default().with_isolate_listeners(true), 3);
    let seat = Arc::new(ExternalPlayer::new());
    game.add_player(seat.clone()).unwrap();
    game.add_player(Arc::new(ExternalPlayer::new())).unwrap();

    game.add_listener(PanickingListener);
    let seen = Arc::new(StdMutex::new(0_usize));
    let counter = Arc::clone(&seen);
    game.add_listener(move |_game: &Game, _event: &GameEvent| {
        *counter.lock().unwrap() += 1;
    });

    game.start().unwrap();

    // Ten hand-size changes and the first discard.
    assert_eq!(*seen.lock().unwrap(), 11);
    assert!(matches!(seat.pending(), Some(Prompt::Turn { .. })));
}

#[test]
fn every_card_stays_unique_through_automated_games() {
    let mut reshuffles = 0;
    let mut declarations = 0;

    for seed in 0..30 {
        let game = Game::new(GameOptions::default(), seed);
        for offset in 0..6 {
            game.add_player(Arc::new(RandomPlayer::new(seed * 10 + offset)))
                .unwrap();
        }

        let census = Arc::new(StdMutex::new(Census::default()));
        let sink = Arc::clone(&census);
        game.add_listener(move |game: &Game, event: &GameEvent| {
            let mut cards = physical_cards(game);
            let held = cards.len();
            cards.dedup();
            let discard_top = game.discard.lock().cards().last().copied();
            let discard_len = game.discard_pile_len();

            let mut census = sink.lock().unwrap();
            census.events += 1;
            if held != DECK_SIZE || cards.len() != DECK_SIZE {
                census.bad_counts.push(cards.len());
            }
            if discard_len < census.last_discard_len {
                census.reshuffles += 1;
            }
            census.last_discard_len = discard_len;
            if let GameEvent::TopCardChanged(top) = event {
                if discard_top != Some(*top) {
                    census.declarations += 1;
                }
            }
        });

        game.start().unwrap();
        assert_eq!(game.state(), GameState::Inactive);

        let census = census.lock().unwrap();
        assert!(census.events > 0);
        assert!(
            census.bad_counts.is_empty(),
            "seed {seed}: distinct counts {:?}",
            census.bad_counts
        );
        reshuffles += census.reshuffles;
        declarations += census.declarations;
    }

    assert!(reshuffles > 0, "no game recycled the discard pile");
    assert!(declarations > 0, "no game declared a suit");
}
