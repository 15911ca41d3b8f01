//! LZW dictionary (code table) management.
//!
//! Both sides store the table as a trie of codes: a learned entry is its
//! prefix code plus one appended symbol. Extending a match is a single hash
//! lookup on the encode side, and reconstructing a sequence on the decode
//! side walks the prefix chain.
//!
//! Capacity follows a two-state machine. A dictionary starts
//! [`Growing`](DictionaryState::Growing) and becomes
//! [`Frozen`](DictionaryState::Frozen) once it holds [`MAX_ENTRIES`]
//! entries; a frozen dictionary silently refuses new entries and keeps
//! serving the existing ones.

use crate::config::{MAX_ENTRIES, SINGLETON_COUNT};
use std::collections::HashMap;
use tracing::trace;

/// Capacity state of a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryState {
    /// New sequences are still being learned.
    Growing,
    /// The table is full; no further insertion.
    Frozen,
}

/// Encode-side dictionary: sequence -> code.
///
/// Singletons are implicit (the code of `[s]` is `s`); only learned
/// sequences are stored, keyed by `(prefix code, appended symbol)`.
#[derive(Debug)]
pub struct EncodeDictionary {
    children: HashMap<(u16, u16), u16>,
    state: DictionaryState,
}

impl EncodeDictionary {
    /// Create a dictionary holding only the 512 singletons.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            state: DictionaryState::Growing,
        }
    }

    /// Drop every learned sequence.
    pub fn reset(&mut self) {
        self.children.clear();
        self.state = DictionaryState::Growing;
    }

    /// Code of the sequence `prefix + [symbol]`, if known.
    #[inline]
    pub fn find(&self, prefix: u16, symbol: u16) -> Option<u16> {
        self.children.get(&(prefix, symbol)).copied()
    }

    /// Learn `prefix + [symbol]` under the next sequential code.
    ///
    /// Returns the assigned code, or `None` when the dictionary is frozen.
    pub fn insert(&mut self, prefix: u16, symbol: u16) -> Option<u16> {
        if self.state == DictionaryState::Frozen {
            return None;
        }

        let code = self.next_code();
        self.children.insert((prefix, symbol), code);

        if self.len() >= MAX_ENTRIES {
            trace!(entries = self.len(), "encode dictionary frozen");
            self.state = DictionaryState::Frozen;
        }

        Some(code)
    }

    /// Number of live entries, singletons included.
    pub fn len(&self) -> usize {
        usize::from(SINGLETON_COUNT) + self.children.len()
    }

    /// Always false: the singletons are never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Code the next insertion will receive.
    pub fn next_code(&self) -> u16 {
        // len() <= MAX_ENTRIES < u16::MAX
        self.len() as u16
    }

    /// Current capacity state.
    pub fn state(&self) -> DictionaryState {
        self.state
    }
}

impl Default for EncodeDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: Option<u16>,
    last: u16,
    first: u16,
    len: u32,
}

/// Decode-side dictionary: code -> sequence.
#[derive(Debug)]
pub struct DecodeDictionary {
    entries: Vec<Entry>,
    state: DictionaryState,
}

impl DecodeDictionary {
    /// Create a dictionary holding only the 512 singletons.
    pub fn new() -> Self {
        let mut dict = Self {
            entries: Vec::with_capacity(MAX_ENTRIES),
            state: DictionaryState::Growing,
        };
        dict.reset();
        dict
    }

    /// Drop every learned sequence.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.extend((0..SINGLETON_COUNT).map(|s| Entry {
            prefix: None,
            last: s,
            first: s,
            len: 1,
        }));
        self.state = DictionaryState::Growing;
    }

    /// Whether `code` is currently defined.
    #[inline]
    pub fn contains(&self, code: u16) -> bool {
        usize::from(code) < self.entries.len()
    }

    /// First symbol of the sequence for `code`.
    #[inline]
    pub fn first_symbol(&self, code: u16) -> Option<u16> {
        self.entries.get(usize::from(code)).map(|e| e.first)
    }

    /// Length of the sequence for `code`.
    pub fn sequence_len(&self, code: u16) -> Option<usize> {
        self.entries.get(usize::from(code)).map(|e| e.len as usize)
    }

    /// Define the next code as `sequence(prefix) + [symbol]`.
    ///
    /// Returns the assigned code, or `None` when frozen or `prefix` is
    /// undefined.
    pub fn push(&mut self, prefix: u16, symbol: u16) -> Option<u16> {
        if self.state == DictionaryState::Frozen {
            return None;
        }
        let parent = *self.entries.get(usize::from(prefix))?;

        let code = self.next_code();
        self.entries.push(Entry {
            prefix: Some(prefix),
            last: symbol,
            first: parent.first,
            len: parent.len + 1,
        });

        if self.entries.len() >= MAX_ENTRIES {
            trace!(entries = self.entries.len(), "decode dictionary frozen");
            self.state = DictionaryState::Frozen;
        }

        Some(code)
    }

    /// Append the sequence for `code` to `out`.
    ///
    /// Returns `false` (leaving `out` untouched) if `code` is undefined.
    pub fn write_sequence(&self, code: u16, out: &mut Vec<u16>) -> bool {
        let Some(entry) = self.entries.get(usize::from(code)) else {
            return false;
        };

        let start = out.len();
        out.resize(start + entry.len as usize, 0);

        let mut cursor = *entry;
        for slot in out[start..].iter_mut().rev() {
            *slot = cursor.last;
            if let Some(prefix) = cursor.prefix {
                cursor = self.entries[usize::from(prefix)];
            }
        }
        true
    }

    /// Number of live entries, singletons included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the singletons are never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Code the next [`push`](Self::push) will define.
    pub fn next_code(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Current capacity state.
    pub fn state(&self) -> DictionaryState {
        self.state
    }
}

impl Default for DecodeDictionary {
    fn default() -> Self {
        Self::new()
    }
}
