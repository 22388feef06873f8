//=========================================================================
// Channel Input
//=========================================================================
//
// Input collaborator fed by the platform layer over a crossbeam channel.
//
// Architecture:
//   Sender<PlatformEvent> → poll() → bindings → KeyState → queries
//
// Bounded draining per poll prevents a flooded channel from stalling a
// tick. A closed window or a dropped sender reports `TickControl::Exit`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::event::{GameKey, KeyCode, PlatformEvent};
use super::key_state::KeyState;
use crate::core::error::SubsystemError;
use crate::core::subsystems::{Input, Subsystem, TickControl};

//=== ChannelInput ========================================================

/// Keyboard input read from a platform event channel.
pub struct ChannelInput {
    receiver: Receiver<PlatformEvent>,
    bindings: HashMap<KeyCode, GameKey>,
    keys: KeyState,
}

impl ChannelInput {
    //--- Construction -----------------------------------------------------

    /// Creates an input reading from `receiver`, with default bindings.
    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        let bindings = GameKey::ALL
            .iter()
            .map(|&key| (key.default_binding(), key))
            .collect();

        Self {
            receiver,
            bindings,
            keys: KeyState::new(),
        }
    }

    /// Creates an input together with the sender the platform layer uses.
    pub fn channel() -> (Sender<PlatformEvent>, Self) {
        let (tx, rx) = unbounded();
        (tx, Self::new(rx))
    }

    //--- Queries ----------------------------------------------------------

    /// Physical key currently bound to `key`, if any.
    pub fn binding(&self, key: GameKey) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find_map(|(&code, &bound)| (bound == key).then_some(code))
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    //--- Internal Helpers -------------------------------------------------

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::KeyDown(code) => {
                if let Some(&key) = self.bindings.get(&code) {
                    self.keys.press(key);
                }
            }
            PlatformEvent::KeyUp(code) => {
                if let Some(&key) = self.bindings.get(&code) {
                    self.keys.release(key);
                }
            }
            PlatformEvent::WindowClosed => {
                info!(target: "input", "Window closed, requesting quit");
                return TickControl::Exit;
            }
        }
        TickControl::Continue
    }
}

impl Subsystem for ChannelInput {
    fn init(&mut self) -> Result<(), SubsystemError> {
        info!(target: "input", "Channel input ready ({} bindings)", self.bindings.len());
        Ok(())
    }

    fn close(&mut self) {
        // Discard anything still queued.
        while self.receiver.try_recv().is_ok() {}
        info!(target: "input", "Channel input closed");
    }
}

impl Input for ChannelInput {
    fn poll(&mut self) -> TickControl {
        const MAX_EVENTS_PER_POLL: usize = 100;

        let mut drained = 0;
        while drained < MAX_EVENTS_PER_POLL {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "input", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_POLL {
            warn!(target: "input", "Input backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    fn just_pushed(&self, key: GameKey) -> bool {
        self.keys.just_pushed(key)
    }

    fn end_tick(&mut self) {
        self.keys.end_tick();
    }

    fn remap(&mut self, key: GameKey, code: KeyCode) {
        self.bindings.retain(|_, bound| *bound != key);
        if let Some(previous) = self.bindings.insert(code, key) {
            debug!(target: "input", "{:?} unbound from {:?}", previous, code);
        }
        debug!(target: "input", "{:?} bound to {:?}", key, code);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_continues() {
        let (_tx, mut input) = ChannelInput::channel();
        assert_eq!(input.poll(), TickControl::Continue);
    }

    #[test]
    fn bound_key_press_is_just_pushed() {
        let (tx, mut input) = ChannelInput::channel();
        tx.send(PlatformEvent::KeyDown(KeyCode::Escape)).unwrap();

        input.poll();
        assert!(input.just_pushed(GameKey::Escape));
        input.end_tick();

        input.poll();
        assert!(!input.just_pushed(GameKey::Escape));
        assert!(input.keys().is_down(GameKey::Escape));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let (tx, mut input) = ChannelInput::channel();
        tx.send(PlatformEvent::KeyDown(KeyCode::Digit7)).unwrap();

        input.poll();
        assert!(GameKey::ALL.iter().all(|&k| !input.keys().is_down(k)));
    }

    #[test]
    fn window_closed_exits() {
        let (tx, mut input) = ChannelInput::channel();
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(input.poll(), TickControl::Exit);
    }

    #[test]
    fn disconnected_sender_exits() {
        let (tx, mut input) = ChannelInput::channel();
        drop(tx);
        assert_eq!(input.poll(), TickControl::Exit);
    }

    #[test]
    fn remap_moves_binding() {
        let (tx, mut input) = ChannelInput::channel();
        input.remap(GameKey::Jump, KeyCode::Space);

        assert_eq!(input.binding(GameKey::Jump), Some(KeyCode::Space));

        tx.send(PlatformEvent::KeyDown(KeyCode::KeyZ)).unwrap();
        tx.send(PlatformEvent::KeyDown(KeyCode::Space)).unwrap();
        input.poll();

        assert!(input.keys().is_down(GameKey::Jump));
        input.end_tick();
        tx.send(PlatformEvent::KeyUp(KeyCode::Space)).unwrap();
        input.poll();
        assert!(!input.keys().is_down(GameKey::Jump), "Old binding must no longer drive Jump");
    }

    #[test]
    fn remap_onto_taken_key_steals_it() {
        let (_tx, mut input) = ChannelInput::channel();
        input.remap(GameKey::Fire, KeyCode::KeyZ);

        assert_eq!(input.binding(GameKey::Fire), Some(KeyCode::KeyZ));
        assert_eq!(input.binding(GameKey::Jump), None);
    }

    #[test]
    fn poll_is_bounded() {
        let (tx, mut input) = ChannelInput::channel();
        for _ in 0..150 {
            tx.send(PlatformEvent::KeyDown(KeyCode::KeyZ)).unwrap();
        }
        tx.send(PlatformEvent::WindowClosed).unwrap();

        // First poll stops at the bound before reaching WindowClosed.
        assert_eq!(input.poll(), TickControl::Continue);
        assert_eq!(input.poll(), TickControl::Exit);
    }
}
