//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_session::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Session
pub use crate::session::{Session, SessionBuilder};
pub use crate::core::{ExitStatus, SessionConfig, Settings, Subsystems};

// Collaborator contracts
pub use crate::core::{
    Audio, Graphics, Input, Persistence, Replay, Scripting, SettingsSource, Subsystem, TextBox,
    TickControl, World,
};

// Stage requests and state
pub use crate::core::{GameMode, PauseMode, SessionState, StageAction, StageId, StageSwitchRequest};

// Input
pub use crate::core::input::{ChannelInput, GameKey, KeyCode, PlatformEvent};
