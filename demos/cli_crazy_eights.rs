//! CLI Crazy Eights example: one human seat against two automated players.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crazy_eights::{
    Card, ExternalPlayer, Game, GameEvent, GameOptions, Prompt, RandomPlayer, Suit,
};

fn main() {
    println!("Crazy Eights CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let game = Game::new(GameOptions::default(), seed);

    let seat = Arc::new(ExternalPlayer::new());
    let Ok(player_id) = game.add_player(seat.clone()) else {
        return;
    };
    for offset in 1..=2 {
        if let Err(err) = game.add_player(Arc::new(RandomPlayer::new(seed + offset))) {
            println!("Join error: {err:?}");
            return;
        }
    }

    game.add_listener(move |game: &Game, event: &GameEvent| match event {
        GameEvent::TopCardChanged(card) => println!("  Discard pile: {}", format_card(card)),
        GameEvent::HandSizeChanged { .. } => {}
        GameEvent::GameComplete { winner } => {
            if game.hand(player_id).is_some_and(|hand| hand.is_empty()) {
                println!("You win!");
            } else {
                println!("Player {winner} wins.");
            }
        }
    });

    loop {
        if let Err(err) = game.start() {
            println!("Start error: {err:?}");
            return;
        }

        while game.is_active() {
            match seat.take_prompt() {
                Some(Prompt::Turn { hand }) => {
                    if !take_turn(&game, player_id, &hand) {
                        return;
                    }
                }
                Some(Prompt::ChooseSuit) => {
                    let Some(suit) = prompt_suit() else {
                        return;
                    };
                    if let Err(err) = game.select_suit(player_id, suit) {
                        println!("Suit error: {err:?}");
                    }
                }
                None => {
                    println!("Engine is not waiting for you.");
                    return;
                }
            }
        }

        if !matches!(prompt_line("Play again? (y/n): ").as_str(), "y" | "yes") {
            println!("Goodbye.");
            return;
        }
    }
}

/// Returns `false` when the user quits.
fn take_turn(game: &Game, player_id: u8, hand: &[Card]) -> bool {
    loop {
        print_table(game, player_id, hand);
        let input = prompt_line("Card number, [d]raw or [q]uit: ");

        let card = match input.as_str() {
            "q" | "quit" => return false,
            "d" | "draw" => None,
            other => match other.parse::<usize>().ok().and_then(|i| hand.get(i)) {
                Some(card) => Some(*card),
                None => {
                    println!("Unknown action.");
                    continue;
                }
            },
        };

        match game.play_card(player_id, card) {
            Ok(true) => return true,
            Ok(false) => println!("That card cannot be played now."),
            Err(err) => {
                println!("Action error: {err:?}");
                return true;
            }
        }
    }
}

fn prompt_suit() -> Option<Suit> {
    loop {
        match prompt_line("Choose a suit ([c]lubs, [d]iamonds, [h]earts, [s]pades): ").as_str() {
            "c" | "clubs" => return Some(Suit::Clubs),
            "d" | "diamonds" => return Some(Suit::Diamonds),
            "h" | "hearts" => return Some(Suit::Hearts),
            "s" | "spades" => return Some(Suit::Spades),
            "q" | "quit" => return None,
            _ => println!("Please pick a suit."),
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).unwrap_or(0) == 0 {
        return "q".to_string();
    }
    input.trim().to_lowercase()
}

fn print_table(game: &Game, player_id: u8, hand: &[Card]) {
    let sizes = game.hand_sizes(player_id).unwrap_or_default();
    let others: Vec<String> = sizes.iter().skip(1).map(ToString::to_string).collect();
    println!(
        "\nDeck: {} cards | opponents hold: {}",
        game.cards_remaining(),
        others.join(", ")
    );

    if let Some(top) = game.top_card() {
        println!("Top card: {}", format_card(&top));
    }

    let cards: Vec<String> = hand
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let label = format!("{index}:{}", format_card(card));
            if game.is_playable(*card) {
                label
            } else {
                colorize(&label, "90")
            }
        })
        .collect();
    println!("Your hand: {}\n", cards.join(" "));
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
