//=========================================================================
// Stage Transition State Machine
//=========================================================================
//
// Executes one stage-entry request. Exactly one branch runs per request:
//
//   special-map guard   (every request at/above the threshold)
//        │
//        ├─ LoadGame      → persistence load → replay notify → fade-in
//        ├─ StartReplay   → stop scripts → begin playback
//        └─ NewGame/Enter → [new game] → arrival check → load stage
//                           → place player
//
// Failures surface as `InGameError`; the caller routes them to teardown.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::new_game::init_new_game;
use super::{ReplayId, StageAction, StageId, StageSwitchRequest};
use crate::core::config::SessionConfig;
use crate::core::error::InGameError;
use crate::core::settings::Settings;
use crate::core::state::SessionState;
use crate::core::subsystems::Subsystems;

//=== EntryFlags ==========================================================

/// Flags that live across stage entries in the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryFlags {
    /// Play the weapon-bar intro slide when the stage starts.
    pub freshstart: bool,

    /// Skip the fade-in of the next load, once.
    pub inhibit_load_fade: bool,
}

//=== StageEntry ==========================================================

/// Everything one stage entry touches.
pub(crate) struct StageEntry<'a> {
    pub state: &'a mut SessionState,
    pub systems: &'a mut Subsystems,
    pub settings: &'a Settings,
    pub config: &'a SessionConfig,
    pub flags: &'a mut EntryFlags,
}

impl StageEntry<'_> {
    /// Runs the branch selected by `request`.
    pub fn enter(&mut self, request: StageSwitchRequest) -> Result<(), InGameError> {
        // Looping ambience must never survive into a special map.
        if request.action.is_special(self.config.special_maps_threshold) {
            debug!("Special map transition, stopping loop sounds");
            self.systems.audio.stop_loop_sounds();
        }

        match request.action {
            StageAction::LoadGame { from_menu } => self.load_game(from_menu),
            StageAction::StartReplay(id) => self.start_replay(id),
            StageAction::NewGame { from_menu } => {
                if from_menu {
                    self.flags.freshstart = true;
                }
                let new_game = self.config.new_game;
                let entry = init_new_game(
                    self.state,
                    self.systems.world.as_mut(),
                    self.systems.textbox.as_mut(),
                    &new_game,
                    from_menu,
                );
                self.enter_map(new_game.start_stage, &entry)
            }
            StageAction::Enter(stage) => self.enter_map(stage, &request),
        }
    }

    //--- Branches ---------------------------------------------------------

    fn load_game(&mut self, from_menu: bool) -> Result<(), InGameError> {
        if from_menu {
            self.flags.freshstart = true;
        }

        info!("= Loading game =");
        let slot = self.settings.last_save_slot;
        self.systems
            .persistence
            .load(slot, self.state)
            .map_err(|source| InGameError::LoadGame { slot, source })?;

        self.systems.replay.on_game_starting();

        if self.flags.inhibit_load_fade {
            self.flags.inhibit_load_fade = false;
        } else {
            self.systems.world.start_fade_in();
        }
        Ok(())
    }

    fn start_replay(&mut self, id: ReplayId) -> Result<(), InGameError> {
        let name = self.systems.replay.resolve_name(id);
        info!(">> beginning replay '{}'", name);

        self.systems.scripting.stop_scripts();
        self.systems
            .replay
            .begin_playback(&name)
            .map_err(|source| InGameError::ReplayOpen { name, source })
    }

    fn enter_map(
        &mut self,
        stage: StageId,
        request: &StageSwitchRequest,
    ) -> Result<(), InGameError> {
        let new_game = &self.config.new_game;

        // First arrival at the start point slides the weapon bar in.
        if stage == new_game.start_stage && request.event_on_entry == new_game.arrival_event {
            self.flags.freshstart = true;
        }

        let (x, y) = self
            .config
            .tile_to_subpixel(request.player_x, request.player_y)
            .ok_or(InGameError::SpawnOutOfRange {
                stage,
                x: request.player_x,
                y: request.player_y,
            })?;

        self.systems
            .world
            .load_stage(stage)
            .map_err(|source| InGameError::StageLoad { stage, source })?;

        match self.state.player.as_mut() {
            Some(player) => {
                player.x = x;
                player.y = y;
            }
            None => warn!("Entered stage {} with no player entity", stage),
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
