use clap::ValueEnum;
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_WORDS_EN: &str = include_str!("resources/words_en.txt");
pub const EMBEDDED_WORDS_RO: &str = include_str!("resources/words_ro.txt");

/// Languages with a word list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "ro")]
    Romanian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Romanian];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::English => "words_en.txt",
            Self::Romanian => "words_ro.txt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::Romanian => write!(f, "Romanian"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("word list {file} not found (searched: {searched})")]
    FileNotFound { file: String, searched: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("word list for {0} has no usable words")]
    Empty(Language),
}

/// Where raw word-list text comes from.
pub trait WordSource {
    /// Returns the newline-delimited word list for `language`.
    fn read_language(&self, language: Language) -> Result<String, LoadError>;
}

/// Reads `words_<code>.txt` from the first directory that has it.
#[derive(Debug, Clone)]
pub struct DirectoryWordSource {
    dirs: Vec<PathBuf>,
}

impl DirectoryWordSource {
    #[must_use]
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// `primary` first, then `<data_dir>/hangman` when the platform has one.
    #[must_use]
    pub fn with_default_fallback<P: AsRef<Path>>(primary: P) -> Self {
        let mut dirs = vec![primary.as_ref().to_path_buf()];
        if let Some(data) = get_data_dir() {
            dirs.push(data);
        }
        Self::new(dirs)
    }
}

impl WordSource for DirectoryWordSource {
    fn read_language(&self, language: Language) -> Result<String, LoadError> {
        let file = language.file_name();
        for dir in &self.dirs {
            let path = dir.join(file);
            match fs::read_to_string(&path) {
                Ok(text) => {
                    info!("Loaded word list {}", path.display());
                    return Ok(text);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("No word list at {}", path.display());
                }
                Err(source) => return Err(LoadError::Io { path, source }),
            }
        }
        let searched = self
            .dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(LoadError::FileNotFound {
            file: file.to_string(),
            searched,
        })
    }
}

/// Word lists compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWordSource;

impl WordSource for EmbeddedWordSource {
    fn read_language(&self, language: Language) -> Result<String, LoadError> {
        let text = match language {
            Language::English => EMBEDDED_WORDS_EN,
            Language::Romanian => EMBEDDED_WORDS_RO,
        };
        Ok(text.to_string())
    }
}

/// `<data_dir>/hangman`, the per-user location for word lists.
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("hangman"))
}

/// An immutable, non-empty list of uppercase A–Z words for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    language: Language,
    words: Vec<String>,
}

impl WordBank {
    pub fn load(source: &dyn WordSource, language: Language) -> Result<Self, LoadError> {
        let text = source.read_language(language)?;
        Self::parse(language, &text)
    }

    /// Parses newline-delimited words, uppercasing them and dropping blank or
    /// non-alphabetic lines.
    pub fn parse(language: Language, data: &str) -> Result<Self, LoadError> {
        Self::from_words(language, data.lines())
    }

    pub fn from_words<I, S>(language: Language, words: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique = BTreeSet::new();
        for raw in words {
            let word = raw.as_ref().trim().to_ascii_uppercase();
            if word.is_empty() {
                continue;
            }
            if word.chars().all(|c| c.is_ascii_uppercase()) {
                unique.insert(word);
            } else {
                debug!("Skipping word list entry {word:?}: not A-Z only");
            }
        }
        if unique.is_empty() {
            return Err(LoadError::Empty(language));
        }
        info!("{} word bank ready with {} words", language, unique.len());
        Ok(Self {
            language,
            words: unique.into_iter().collect(),
        })
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Uniform pick across every word.
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.random_range(0..self.words.len())]
    }

    /// Uniform pick among words of length `n`.
    ///
    /// When no word has that length this falls back to [`random_word`] and
    /// logs a warning, so callers must tolerate a different length.
    ///
    /// [`random_word`]: WordBank::random_word
    pub fn random_word_of_length<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> &str {
        let candidates: Vec<&str> = self
            .words
            .iter()
            .filter(|w| w.len() == n)
            .map(String::as_str)
            .collect();
        match candidates.choose(rng) {
            Some(&word) => word,
            None => {
                warn!(
                    "No {} words of length {n}; falling back to a word of any length",
                    self.language
                );
                self.random_word(rng)
            }
        }
    }
}
