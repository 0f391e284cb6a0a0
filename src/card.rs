//! Card types and the per-rank behaviour table.

use core::fmt;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits, in deck-building order.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    /// Single-letter key used by card images (`C`, `D`, `H`, `S`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Clubs => 'C',
            Self::Diamonds => 'D',
            Self::Hearts => 'H',
            Self::Spades => 'S',
        }
    }
}

/// Ace rank.
pub const ACE: u8 = 1;
/// Rank that forces the next player to draw.
pub const TWO: u8 = 2;
/// Wild rank.
pub const EIGHT: u8 = 8;
/// Jack rank.
pub const JACK: u8 = 11;
/// Queen rank.
pub const QUEEN: u8 = 12;
/// King rank.
pub const KING: u8 = 13;

/// Number of cards in a Crazy Eights deck.
pub const DECK_SIZE: usize = 52;

/// Image key for a face-down or unknown card.
pub const FACE_DOWN_KEY: &str = "00";

/// What happens after a card of a given rank has been discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankEffect {
    /// Reverse the turn order, then pass the turn.
    Reverse,
    /// Pass the turn; the new current player draws two cards.
    DrawTwo,
    /// Wild: the player who discarded it declares the next suit.
    ChooseSuit,
    /// Pass the turn twice, skipping one player.
    Skip,
    /// Pass the turn.
    Pass,
}

impl RankEffect {
    /// Looks up the effect for a rank.
    ///
    /// Ranks outside `1..=13` behave like ordinary cards.
    #[must_use]
    pub const fn for_rank(rank: u8) -> Self {
        match rank {
            ACE => Self::Reverse,
            TWO => Self::DrawTwo,
            EIGHT => Self::ChooseSuit,
            QUEEN => Self::Skip,
            _ => Self::Pass,
        }
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted and behave like ordinary, non-special cards.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    /// Returns the effect this card has once discarded.
    #[must_use]
    pub const fn effect(&self) -> RankEffect {
        RankEffect::for_rank(self.rank)
    }

    /// Returns whether the card can be played on any top card.
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        matches!(self.effect(), RankEffect::ChooseSuit)
    }

    /// Returns whether this card may be discarded onto `top`.
    ///
    /// Wild cards always match; anything else needs the same suit or rank.
    #[must_use]
    pub fn is_playable_on(&self, top: Self) -> bool {
        self.is_wild() || self.suit == top.suit || self.rank == top.rank
    }
}

impl fmt::Display for Card {
    /// Formats the card as its image key, e.g. `HA`, `S10`, `DQ`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.suit.letter();
        match self.rank {
            ACE => write!(f, "{letter}A"),
            JACK => write!(f, "{letter}J"),
            QUEEN => write!(f, "{letter}Q"),
            KING => write!(f, "{letter}K"),
            rank => write!(f, "{letter}{rank}"),
        }
    }
}
