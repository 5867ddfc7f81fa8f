//! Word interning.
//!
//! [`WordStore`] owns the canonical text of every distinct word ever indexed
//! and hands out [`WordId`] handles. The inverted index and queries refer to
//! words through these handles instead of holding their own copies of the
//! text. Entries are never removed: a word stays interned even after every
//! posting that referenced it is gone.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

/// Handle to a word interned in a [`WordStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(u32);

impl WordId {
    /// Position of the word in its store.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only arena of word text.
#[derive(Default)]
pub struct WordStore {
    /// Word text by id. Shared with `ids` so every word is allocated once.
    words: Vec<Arc<str>>,
    ids: AHashMap<Arc<str>, WordId>,
}

impl WordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `word`, returning its existing handle if already present.
    pub fn intern(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = WordId(self.words.len() as u32);
        let text: Arc<str> = Arc::from(word);
        self.words.push(Arc::clone(&text));
        self.ids.insert(text, id);
        id
    }

    /// Look up the handle of an already interned word.
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// Text of an interned word.
    ///
    /// Handles are only produced by this store, so every handle resolves.
    pub fn resolve(&self, id: WordId) -> &str {
        &self.words[id.index()]
    }

    /// Number of distinct words ever interned.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Debug for WordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordStore")
            .field("len", &self.words.len())
            .finish()
    }
}
