//=========================================================================
// New-Game Initializer
//=========================================================================
//
// Resets the playthrough: flags, timers, entities and the player, then
// points the pending stage request at the start stage.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::StageSwitchRequest;
use crate::core::config::NewGameConfig;
use crate::core::state::SessionState;
use crate::core::subsystems::{TextBox, World};

//=== init_new_game =======================================================

/// Starts a fresh playthrough.
///
/// Clears flags and skip-flags, the stage-select slots and the screen
/// timers; marks the session running and unpaused; rebuilds the player
/// at full health; submits a request for the start stage whose entry
/// event plays the intro when `show_intro` is set; and presets the fade
/// to dark so the first frame fades in.
///
/// Returns the request it submitted.
pub fn init_new_game(
    state: &mut SessionState,
    world: &mut dyn World,
    textbox: &mut dyn TextBox,
    config: &NewGameConfig,
    show_intro: bool,
) -> StageSwitchRequest {
    info!("= Beginning new game =");

    state.flags.clear();
    state.skip_flags.clear();
    textbox.clear_stage_select_slots();

    state.quake_time = 0;
    state.mega_quake_time = 0;
    state.show_map_name_time = 0;
    state.running = true;
    state.unpause();

    world.destroy_all_objects();
    let player = state.create_player();
    player.max_hp = config.max_hp;
    player.hp = player.max_hp;

    let request = config.entry_request(show_intro);
    state.submit_stage_switch(request);

    world.preset_fade_out();

    request
}

//=========================================================================
// Unit Tests
//=========================================================================
