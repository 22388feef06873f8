//=========================================================================
// Key State
//=========================================================================
//
// Logical key state with one tick of history for edge detection.
//
// Tick lifecycle: press()/release() during poll → query → end_tick()
//
// `end_tick()` copies the current state into the previous-tick snapshot,
// so "just pushed" means down now and up at the end of the last tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::GameKey;

//=== KeyState ============================================================

/// Current and previous-tick state of every logical key.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: HashSet<GameKey>,
    last: HashSet<GameKey>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Mutation ---------------------------------------------------------

    pub(super) fn press(&mut self, key: GameKey) {
        self.down.insert(key);
    }

    pub(super) fn release(&mut self, key: GameKey) {
        self.down.remove(&key);
    }

    /// Snapshots the current state as the previous tick's.
    pub fn end_tick(&mut self) {
        self.last.clone_from(&self.down);
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while the key is held.
    pub fn is_down(&self, key: GameKey) -> bool {
        self.down.contains(&key)
    }

    /// Returns `true` if the key is down now but was up last tick.
    pub fn just_pushed(&self, key: GameKey) -> bool {
        self.down.contains(&key) && !self.last.contains(&key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_pushed_only_on_first_tick() {
        let mut keys = KeyState::new();

        keys.press(GameKey::Jump);
        assert!(keys.just_pushed(GameKey::Jump));
        keys.end_tick();

        // Held through the next tick.
        assert!(!keys.just_pushed(GameKey::Jump));
        assert!(keys.is_down(GameKey::Jump));
    }

    #[test]
    fn release_and_repress_counts_again() {
        let mut keys = KeyState::new();

        keys.press(GameKey::Fire);
        keys.end_tick();
        keys.release(GameKey::Fire);
        keys.end_tick();
        keys.press(GameKey::Fire);

        assert!(keys.just_pushed(GameKey::Fire));
    }

    #[test]
    fn tap_within_one_tick_is_missed() {
        let mut keys = KeyState::new();

        keys.press(GameKey::Escape);
        keys.release(GameKey::Escape);

        assert!(!keys.just_pushed(GameKey::Escape));
    }

    #[test]
    fn release_clears_held_state() {
        let mut keys = KeyState::new();
        keys.press(GameKey::Left);
        keys.end_tick();
        keys.release(GameKey::Left);

        assert!(!keys.is_down(GameKey::Left));
        assert!(!keys.just_pushed(GameKey::Left));
    }
}
