//! The character store contract.
//!
//! The engine never owns persistence. Hosts implement [`CharacterStore`]
//! over whatever medium they use; [`MemoryStore`] backs tests and
//! short-lived sessions.

use std::collections::HashMap;

use crate::error::{MechError, MechResult};
use crate::sheet::Character;

/// Keyed storage for one character per user.
pub trait CharacterStore {
    /// Load the user's character, or `None` if they have none.
    fn load(&self, user: &str) -> MechResult<Option<Character>>;

    /// Store a full character record, replacing any previous one.
    fn save(&mut self, user: &str, character: &Character) -> MechResult<()>;

    /// Remove the user's character. Returns true if one existed.
    fn delete(&mut self, user: &str) -> MechResult<bool>;
}

/// An in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    characters: HashMap<String, Character>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl CharacterStore for MemoryStore {
    fn load(&self, user: &str) -> MechResult<Option<Character>> {
        Ok(self.characters.get(user).cloned())
    }

    fn save(&mut self, user: &str, character: &Character) -> MechResult<()> {
        self.characters.insert(user.to_string(), character.clone());
        Ok(())
    }

    fn delete(&mut self, user: &str) -> MechResult<bool> {
        Ok(self.characters.remove(user).is_some())
    }
}

/// Load a user's character or fail with [`MechError::NotFound`].
pub fn require(store: &impl CharacterStore, user: &str) -> MechResult<Character> {
    store
        .load(user)?
        .ok_or_else(|| MechError::NotFound(format!("no character for '{user}'")))
}

/// Run an operation against a user's character and save it on success.
///
/// The operation works on a copy; if it fails the stored record is left as
/// it was.
pub fn with_character<S, T, F>(store: &mut S, user: &str, op: F) -> MechResult<T>
where
    S: CharacterStore + ?Sized,
    F: FnOnce(&mut Character) -> MechResult<T>,
{
    let mut character = store
        .load(user)?
        .ok_or_else(|| MechError::NotFound(format!("no character for '{user}'")))?;
    let out = op(&mut character)?;
    store.save(user, &character)?;
    Ok(out)
}
