//=========================================================================
// Input Event Types
//
// Defines the engine-side representation of keyboard input and the
// messages the platform layer sends across the input channel.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    PlatformEvent (this module)
//         ↓  crossbeam channel
//    ChannelInput (bindings: KeyCode → GameKey)
//         ↓
//    KeyState (current / previous tick)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the input layer does not map.
    Unidentified,
}

//=== GameKey =============================================================

/// Logical game input, bound to a physical [`KeyCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Fire,
    PrevWeapon,
    NextWeapon,
    Inventory,
    Map,

    /// Pause, or quit outright when instant-quit is enabled.
    Escape,

    /// Opens the options menu.
    Options,
}

impl GameKey {
    /// Every logical key, in declaration order.
    pub const ALL: [GameKey; 12] = [
        GameKey::Left,
        GameKey::Right,
        GameKey::Up,
        GameKey::Down,
        GameKey::Jump,
        GameKey::Fire,
        GameKey::PrevWeapon,
        GameKey::NextWeapon,
        GameKey::Inventory,
        GameKey::Map,
        GameKey::Escape,
        GameKey::Options,
    ];

    /// Physical key this logical key is bound to out of the box.
    pub fn default_binding(self) -> KeyCode {
        match self {
            GameKey::Left => KeyCode::ArrowLeft,
            GameKey::Right => KeyCode::ArrowRight,
            GameKey::Up => KeyCode::ArrowUp,
            GameKey::Down => KeyCode::ArrowDown,
            GameKey::Jump => KeyCode::KeyZ,
            GameKey::Fire => KeyCode::KeyX,
            GameKey::PrevWeapon => KeyCode::KeyA,
            GameKey::NextWeapon => KeyCode::KeyS,
            GameKey::Inventory => KeyCode::KeyQ,
            GameKey::Map => KeyCode::KeyW,
            GameKey::Escape => KeyCode::Escape,
            GameKey::Options => KeyCode::F3,
        }
    }
}

//=== PlatformEvent =======================================================

/// Message sent from the platform layer to the session's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),

    /// Window close requested by the user or the OS.
    WindowClosed,
}

//=========================================================================
// Unit Tests
//=========================================================================
