//! # Input
//!
//! The host owns the real key state and exposes it through
//! [`InputSource`]. The game polls it read-only exactly once per tick
//! into an [`InputSnapshot`], so every system in the tick sees the same
//! keys regardless of when the host mutates its set.

use std::collections::HashSet;

/// Host-side key state, polled read-only at tick start.
pub trait InputSource {
    /// Whether the named key is currently held.
    fn has_key(&self, name: &str) -> bool;
}

/// The keys the game cares about, captured once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Move left ("a").
    pub left: bool,
    /// Move right ("d").
    pub right: bool,
    /// Jump (space).
    pub jump: bool,
}

impl InputSnapshot {
    /// Polls an input source into a snapshot.
    #[must_use]
    pub fn capture(source: &dyn InputSource) -> Self {
        Self {
            left: source.has_key("a"),
            right: source.has_key("d"),
            jump: source.has_key(" "),
        }
    }
}

/// A plain held-key set, the [`InputSource`] used by tests and the
/// headless binary.
#[derive(Clone, Debug, Default)]
pub struct KeySet {
    held: HashSet<String>,
}

impl KeySet {
    /// Creates an empty key set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as held.
    pub fn press(&mut self, name: &str) {
        self.held.insert(name.to_owned());
    }

    /// Marks a key as released.
    pub fn release(&mut self, name: &str) {
        self.held.remove(name);
    }
}

impl InputSource for KeySet {
    fn has_key(&self, name: &str) -> bool {
        self.held.contains(name)
    }
}
