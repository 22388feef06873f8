//=========================================================================
// Core Systems
//=========================================================================
//
// Building blocks of the session controller.
//
// Layout:
//   clock, scheduler      fixed-timestep pacing
//   lifecycle             ordered startup, single teardown
//   stage                 requests, new game, transition state machine
//   state                 SessionState, player, flags
//   subsystems            collaborator contracts
//   input, settings       keyboard input and user settings
//   headless              no-op collaborators
//   config, error         tunables and failure taxonomy
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod config;
pub mod error;
pub mod headless;
pub mod input;
pub mod lifecycle;
pub mod scheduler;
pub mod settings;
pub mod stage;
pub mod state;
pub mod subsystems;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use clock::{Clock, SystemClock};
pub use config::{NewGameConfig, ReplayStart, SessionConfig};
pub use error::{ConfigError, ExitStatus, InGameError, InitError, SessionError, SubsystemError};
pub use lifecycle::{Sequencer, SubsystemId};
pub use scheduler::{FramePoll, FrameScheduler};
pub use settings::{JsonSettings, Resolution, Settings};
pub use stage::{ReplayId, StageAction, StageId, StageSwitchRequest};
pub use state::{GameMode, PauseMode, Player, SessionState};
pub use subsystems::{
    Audio, Graphics, Input, Persistence, Replay, Scripting, SettingsSource, Subsystem, Subsystems,
    TextBox, TickControl, World,
};
