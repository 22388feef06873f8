//=========================================================================
// Stage System
//=========================================================================
//
// Stage-entry requests and the transition logic that consumes them.
//
// Architecture:
//   menu / scripts / death handling
//        │ submit_stage_switch()
//        ▼
//   StageRequestSlot (one live request)
//        │ taken at the top of the outer loop
//        ▼
//   StageEntry::enter() ── LoadGame / StartReplay / NewGame / Enter
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use serde::{Deserialize, Serialize};

//=== Module Declarations =================================================

mod request_slot;
pub(crate) mod new_game;
pub(crate) mod transition;

//=== Public API ==========================================================

pub use new_game::init_new_game;
pub use request_slot::StageRequestSlot;

//=== StageId =============================================================

/// Identifier of an ordinary stage (map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(pub u32);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//=== ReplayId ============================================================

/// Identifier of a recorded replay; the replay subsystem resolves it to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayId(pub u32);

//=== StageAction =========================================================

/// What the next stage entry should do.
///
/// Exactly one variant is handled per outer-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    /// Ordinary switch into a stage.
    Enter(StageId),

    /// Load the active save slot.
    LoadGame { from_menu: bool },

    /// Reset the playthrough and head for the start stage.
    NewGame { from_menu: bool },

    /// Begin playback of a recorded replay.
    StartReplay(ReplayId),
}

impl StageAction {
    /// Whether this action counts as a special map for `threshold`.
    ///
    /// Every non-stage action is special; ordinary stages are special
    /// only when their id reaches the threshold.
    pub fn is_special(&self, threshold: u32) -> bool {
        match self {
            Self::Enter(stage) => stage.0 >= threshold,
            Self::LoadGame { .. } | Self::NewGame { .. } | Self::StartReplay(_) => true,
        }
    }
}

//=== StageSwitchRequest ==================================================

/// A pending stage-entry request with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSwitchRequest {
    pub action: StageAction,

    /// Player spawn position in tiles.
    pub player_x: i32,
    pub player_y: i32,

    /// Script entry point run when the stage starts.
    pub event_on_entry: u32,
}

impl StageSwitchRequest {
    /// Request with no spawn position or entry event.
    pub fn new(action: StageAction) -> Self {
        Self {
            action,
            player_x: 0,
            player_y: 0,
            event_on_entry: 0,
        }
    }

    /// Ordinary stage switch placing the player at a tile position.
    pub fn enter(stage: StageId, player_x: i32, player_y: i32, event_on_entry: u32) -> Self {
        Self {
            action: StageAction::Enter(stage),
            player_x,
            player_y,
            event_on_entry,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
