//=========================================================================
// Subsystem Contracts
//=========================================================================
//
// Narrow interfaces the session controller uses on its collaborators.
//
// Everything behind these traits (rendering, mixing, scripting, physics,
// save-file layout) lives outside this crate. The session only drives
// lifecycles and calls the handful of operations listed here.
//
// Architecture:
//   Subsystems
//     ├─ platform, fonts, trig, carets   (lifecycle only)
//     ├─ input, audio, scripting, textbox, world
//     ├─ graphics                        (init takes a resolution)
//     ├─ settings, persistence, replay   (no init step of their own)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::SubsystemError;
use crate::core::input::GameKey;
use crate::core::input::KeyCode;
use crate::core::settings::{Resolution, Settings};
use crate::core::stage::{ReplayId, StageId};
use crate::core::state::{GameMode, SessionState};

//=== TickControl =========================================================

/// Result of an input poll: keep going, or the platform asked to quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== Subsystem ===========================================================

/// Lifecycle shared by every subsystem that has an init step.
pub trait Subsystem {
    fn init(&mut self) -> Result<(), SubsystemError>;
    fn close(&mut self);
}

//=== Input ===============================================================

/// Keyboard input with one tick of history.
pub trait Input: Subsystem {
    /// Pumps platform events. Called exactly once per tick, first.
    fn poll(&mut self) -> TickControl;

    /// Down this tick, up at the end of the previous one.
    fn just_pushed(&self, key: GameKey) -> bool;

    /// Snapshots this tick's state for next tick's edge detection.
    fn end_tick(&mut self);

    /// Rebinds a logical key. Settings load may call this.
    fn remap(&mut self, key: GameKey, code: KeyCode);
}

//=== Graphics ============================================================

pub trait Graphics {
    fn init(&mut self, resolution: Resolution) -> Result<(), SubsystemError>;
    fn close(&mut self);

    /// Presents the frame drawn this tick.
    fn flip(&mut self);
}

//=== Audio ===============================================================

pub trait Audio: Subsystem {
    /// Stops every ambient looping sound effect.
    fn stop_loop_sounds(&mut self);

    /// Per-tick background-music processing step.
    fn run_bgm(&mut self);
}

//=== Scripting ===========================================================

pub trait Scripting: Subsystem {
    fn stop_scripts(&mut self);
}

//=== TextBox =============================================================

pub trait TextBox: Subsystem {
    /// Forgets the stage-select menu's saved slots.
    fn clear_stage_select_slots(&mut self);
}

//=== World ===============================================================

/// The game session object: stages, entities, fades and per-tick logic.
pub trait World: Subsystem {
    fn set_mode(&mut self, mode: GameMode);

    /// Runs one tick of game logic and drawing. May submit stage switches
    /// or clear `running` through `state`.
    fn tick(&mut self, state: &mut SessionState);

    fn load_stage(&mut self, stage: StageId) -> Result<(), SubsystemError>;

    /// Per-level initialization after a stage has been entered.
    fn init_level(&mut self, state: &mut SessionState) -> Result<(), SubsystemError>;

    /// The active stage's boss hook: the map is being left.
    fn on_map_exit(&mut self);

    /// Destroys every simulated entity.
    fn destroy_all_objects(&mut self);

    /// Slides the weapon bar in from the screen edge.
    fn weapon_intro_slide(&mut self);

    /// Starts a centered fade-in.
    fn start_fade_in(&mut self);

    /// Sets the fade to fully dark so a stage is never drawn before fading in.
    fn preset_fade_out(&mut self);
}

//=== SettingsSource ======================================================

pub trait SettingsSource {
    /// Loads settings, falling back to defaults. Never fails.
    fn load(&mut self) -> Settings;
}

//=== Persistence =========================================================

pub trait Persistence {
    /// Loads a save slot into the session.
    fn load(&mut self, slot: u32, state: &mut SessionState) -> Result<(), SubsystemError>;

    /// Whether the slot's backing profile exists.
    fn slot_exists(&self, slot: u32) -> bool;
}

//=== Replay ==============================================================

/// Replay recording and playback. Initialized implicitly.
pub trait Replay {
    fn close(&mut self);

    fn begin_playback(&mut self, name: &str) -> Result<(), SubsystemError>;

    /// A fresh game session is starting (after a load).
    fn on_game_starting(&mut self);

    /// Draws the per-tick playback/record status.
    fn draw_status(&mut self);

    fn resolve_name(&self, id: ReplayId) -> String;

    /// Runs playback unthrottled until `frame`.
    fn set_fast_forward(&mut self, frame: u32);
}

//=== Subsystems ==========================================================

/// Every collaborator handle the session drives.
pub struct Subsystems {
    /// Video/audio platform layer.
    pub platform: Box<dyn Subsystem>,
    pub input: Box<dyn Input>,
    pub settings: Box<dyn SettingsSource>,
    pub graphics: Box<dyn Graphics>,
    pub fonts: Box<dyn Subsystem>,
    pub audio: Box<dyn Audio>,

    /// Math/trigonometry tables.
    pub trig: Box<dyn Subsystem>,
    pub scripting: Box<dyn Scripting>,
    pub textbox: Box<dyn TextBox>,
    pub carets: Box<dyn Subsystem>,
    pub world: Box<dyn World>,
    pub persistence: Box<dyn Persistence>,
    pub replay: Box<dyn Replay>,
}

impl Subsystems {
    /// All slots filled with no-op collaborators.
    pub fn headless() -> Self {
        use crate::core::headless::{Headless, HeadlessWorld};

        Self {
            platform: Box::new(Headless),
            input: Box::new(Headless),
            settings: Box::new(Headless),
            graphics: Box::new(Headless),
            fonts: Box::new(Headless),
            audio: Box::new(Headless),
            trig: Box::new(Headless),
            scripting: Box::new(Headless),
            textbox: Box::new(Headless),
            carets: Box::new(Headless),
            world: Box::new(HeadlessWorld::new()),
            persistence: Box::new(Headless),
            replay: Box::new(Headless),
        }
    }
}
