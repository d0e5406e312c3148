//! The A–Z guessing alphabet.
//!
//! Guesses and word contents are tracked per letter rather than by raw `char`
//! offsets, so the "only A–Z" domain constraint is enforced at the type level.

use std::fmt;

pub const ALPHABET_SIZE: usize = 26;

/// One uppercase ASCII letter, `A` through `Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    /// Normalizes `c` to uppercase; anything outside A–Z yields `None`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(upper as u8 - b'A'))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'A' + self.0)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Every letter in alphabetical order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A set of letters stored as a 26-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterSet(u32);

impl LetterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the A–Z letters of `word`, skipping anything else.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        word.chars().filter_map(Letter::from_char).collect()
    }

    #[must_use]
    pub fn contains(self, letter: Letter) -> bool {
        self.0 & (1 << letter.0) != 0
    }

    /// Returns `true` if the letter was not already present.
    pub fn insert(&mut self, letter: Letter) -> bool {
        let fresh = !self.contains(letter);
        self.0 |= 1 << letter.0;
        fresh
    }

    #[must_use]
    pub fn is_superset(self, other: LetterSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Letter> {
        Letter::all().filter(move |l| self.contains(*l))
    }
}

impl FromIterator<Letter> for LetterSet {
    fn from_iter<I: IntoIterator<Item = Letter>>(iter: I) -> Self {
        let mut set = Self::new();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}
