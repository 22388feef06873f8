//=========================================================================
// Headless Collaborators
//=========================================================================
//
// No-op implementations of every subsystem contract.
//
// Used by `Subsystems::headless()` for tools and the demo binary, and as
// a base when only one or two collaborators matter.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::SubsystemError;
use crate::core::input::{GameKey, KeyCode};
use crate::core::settings::{Resolution, Settings};
use crate::core::stage::{ReplayId, StageId};
use crate::core::state::{GameMode, Player, SessionState};
use crate::core::subsystems::{
    Audio, Graphics, Input, Persistence, Replay, Scripting, SettingsSource, Subsystem, TextBox,
    TickControl, World,
};

//=== Headless ============================================================

/// Collaborator that accepts every call and does nothing.
///
/// Persistence reports no existing slots and fails every load.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Subsystem for Headless {
    fn init(&mut self) -> Result<(), SubsystemError> {
        Ok(())
    }

    fn close(&mut self) {}
}

impl Input for Headless {
    fn poll(&mut self) -> TickControl {
        TickControl::Continue
    }

    fn just_pushed(&self, _key: GameKey) -> bool {
        false
    }

    fn end_tick(&mut self) {}

    fn remap(&mut self, _key: GameKey, _code: KeyCode) {}
}

impl Graphics for Headless {
    fn init(&mut self, resolution: Resolution) -> Result<(), SubsystemError> {
        debug!(
            target: "graphics",
            "Headless graphics at {}x{}",
            resolution.width, resolution.height
        );
        Ok(())
    }

    fn close(&mut self) {}

    fn flip(&mut self) {}
}

impl Audio for Headless {
    fn stop_loop_sounds(&mut self) {}

    fn run_bgm(&mut self) {}
}

impl Scripting for Headless {
    fn stop_scripts(&mut self) {}
}

impl TextBox for Headless {
    fn clear_stage_select_slots(&mut self) {}
}

impl SettingsSource for Headless {
    fn load(&mut self) -> Settings {
        Settings::default()
    }
}

impl Persistence for Headless {
    fn load(&mut self, slot: u32, _state: &mut SessionState) -> Result<(), SubsystemError> {
        Err(SubsystemError::new(format!("no storage for slot {}", slot)))
    }

    fn slot_exists(&self, _slot: u32) -> bool {
        false
    }
}

impl Replay for Headless {
    fn close(&mut self) {}

    fn begin_playback(&mut self, name: &str) -> Result<(), SubsystemError> {
        Err(SubsystemError::new(format!("no replay storage for '{}'", name)))
    }

    fn on_game_starting(&mut self) {}

    fn draw_status(&mut self) {}

    fn resolve_name(&self, id: ReplayId) -> String {
        format!("replay/rep{}.rep", id.0)
    }

    fn set_fast_forward(&mut self, _frame: u32) {}
}

//=== HeadlessWorld =======================================================

/// World with no content: every stage loads empty and ticks do nothing.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    mode: Option<GameMode>,
    stage: Option<StageId>,
    ticks: u64,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn stage(&self) -> Option<StageId> {
        self.stage
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Subsystem for HeadlessWorld {
    fn init(&mut self) -> Result<(), SubsystemError> {
        Ok(())
    }

    fn close(&mut self) {
        debug!(target: "world", "Headless world closed after {} ticks", self.ticks);
    }
}

impl World for HeadlessWorld {
    fn set_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
    }

    fn tick(&mut self, _state: &mut SessionState) {
        self.ticks += 1;
        trace!(target: "world", "tick {}", self.ticks);
    }

    fn load_stage(&mut self, stage: StageId) -> Result<(), SubsystemError> {
        self.stage = Some(stage);
        Ok(())
    }

    fn init_level(&mut self, state: &mut SessionState) -> Result<(), SubsystemError> {
        if state.player.is_none() {
            state.player = Some(Player::default());
        }
        Ok(())
    }

    fn on_map_exit(&mut self) {}

    fn destroy_all_objects(&mut self) {}

    fn weapon_intro_slide(&mut self) {}

    fn start_fade_in(&mut self) {}

    fn preset_fade_out(&mut self) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
