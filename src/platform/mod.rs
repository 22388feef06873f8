//=========================================================================
// Platform Layer
//
// Bridges Winit keyboard events to the session's input channel.
//
// Architecture:
// ```text
//  Platform Thread:                 Session Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Session         │
//  │   ↓                      │    │   ↓              │
//  │  translate_key()         │    │  ChannelInput    │
//  │   ↓                      │    │   ↓              │
//  │  Sender<PlatformEvent> ──┼────┼→ KeyState        │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// A window close is sent as `PlatformEvent::WindowClosed`; dropping the
// sender has the same effect.
//
//=========================================================================

//=== Module Declarations =================================================

mod keymap;

//=== Public API ==========================================================

pub use keymap::translate_key;
