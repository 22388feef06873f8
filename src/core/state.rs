//=========================================================================
// Session State
//=========================================================================
//
// Process-lifetime mutable record owned by the session controller.
//
// Contains:
// - running / paused flags
// - screen timers (quake, mega-quake, map-name display)
// - per-playthrough flags and skip-flags
// - the player entity
// - the single live stage-switch request
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::stage::{StageRequestSlot, StageSwitchRequest};

//=== Constants ===========================================================

/// Number of persistent game flags.
pub const NUM_GAME_FLAGS: usize = 8000;

/// Number of skip flags (cutscenes the player may skip on replays).
pub const NUM_SKIP_FLAGS: usize = 64;

//=== PauseMode ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseMode {
    /// Ordinary pause screen.
    Paused,

    /// Options menu.
    Options,
}

//=== GameMode ============================================================

/// Top-level mode the world runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Normal,
    Intro,
}

//=== FlagSet =============================================================

/// Fixed-size array of boolean flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    bits: Vec<bool>,
}

impl FlagSet {
    pub fn new(len: usize) -> Self {
        Self { bits: vec![false; len] }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Out-of-range indices read as unset.
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn any(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }
}

//=== Player ==============================================================

/// The player entity, as far as the session controller cares.
///
/// Positions are in subpixel fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
}

//=== SessionState ========================================================

/// Mutable session record shared with the world during ticks.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Clearing this ends the session at the next loop boundary.
    pub running: bool,
    pub paused: Option<PauseMode>,

    pub quake_time: u32,
    pub mega_quake_time: u32,
    pub show_map_name_time: u32,

    pub flags: FlagSet,
    pub skip_flags: FlagSet,

    pub player: Option<Player>,

    stage_switch: StageRequestSlot,
}

impl SessionState {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            running: false,
            paused: None,
            quake_time: 0,
            mega_quake_time: 0,
            show_map_name_time: 0,
            flags: FlagSet::new(NUM_GAME_FLAGS),
            skip_flags: FlagSet::new(NUM_SKIP_FLAGS),
            player: None,
            stage_switch: StageRequestSlot::new(),
        }
    }

    //--- Pause ------------------------------------------------------------

    pub fn pause(&mut self, mode: PauseMode) {
        debug!("Pausing session ({:?})", mode);
        self.paused = Some(mode);
    }

    pub fn unpause(&mut self) {
        self.paused = None;
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    //--- Player -----------------------------------------------------------

    /// Replaces the player with a fresh entity and returns it.
    pub fn create_player(&mut self) -> &mut Player {
        self.player.insert(Player::default())
    }

    //--- Stage Switch Requests --------------------------------------------

    /// Requests a stage transition. Replaces any request still pending.
    pub fn submit_stage_switch(&mut self, request: StageSwitchRequest) {
        self.stage_switch.submit(request);
    }

    pub fn pending_stage_switch(&self) -> Option<&StageSwitchRequest> {
        self.stage_switch.pending()
    }

    pub fn has_pending_stage_switch(&self) -> bool {
        self.stage_switch.is_pending()
    }

    pub(crate) fn take_stage_switch(&mut self) -> Option<StageSwitchRequest> {
        self.stage_switch.take()
    }

    pub(crate) fn clear_stage_switch(&mut self) {
        self.stage_switch.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
