//=========================================================================
// Input
//=========================================================================
//
// Engine-side keyboard input.
//
// Architecture:
//   PlatformEvent (event.rs)
//     → ChannelInput (channel_input.rs): bindings KeyCode → GameKey
//       → KeyState (key_state.rs): current + previous tick
//
// The session only sees the `Input` trait; `ChannelInput` is the
// implementation used when the platform layer runs on its own thread.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod channel_input;
mod key_state;

//=== Public API ==========================================================

pub use channel_input::ChannelInput;
pub use event::{GameKey, KeyCode, PlatformEvent};
pub use key_state::KeyState;
