//=========================================================================
// Test Rig
//=========================================================================
//
// Recording mock collaborators for unit tests.
//
// Every mock shares one `Rig`, which keeps:
// - an ordered call log ("audio.stop_loop_sounds", "world.load_stage(13)")
// - a set of operations scripted to fail
// - per-tick world actions and key presses
//
//=========================================================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::core::error::SubsystemError;
use crate::core::input::{GameKey, KeyCode};
use crate::core::settings::{Resolution, Settings};
use crate::core::stage::{ReplayId, StageId, StageSwitchRequest};
use crate::core::state::{GameMode, PauseMode, Player, SessionState};
use crate::core::subsystems::{
    Audio, Graphics, Input, Persistence, Replay, Scripting, SettingsSource, Subsystem, Subsystems,
    TextBox, TickControl, World,
};

/// Safety valve so a broken test cannot spin forever.
const MAX_TEST_TICKS: u32 = 10_000;

//=== Log Capture =========================================================
//
// Process-wide logger that keeps every record along with the thread that
// emitted it. Tests run on separate threads, so each test only sees its
// own records.

static CAPTURED: Mutex<Vec<(ThreadId, Level, String)>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let entry = (thread::current().id(), record.level(), record.args().to_string());
        CAPTURED.lock().unwrap_or_else(|e| e.into_inner()).push(entry);
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Installs the capturing logger and forgets this thread's earlier records.
pub(crate) fn capture_logs() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    let me = thread::current().id();
    CAPTURED.lock().unwrap_or_else(|e| e.into_inner()).retain(|(id, _, _)| *id != me);
}

/// Messages logged at `level` by the current thread since `capture_logs`.
pub(crate) fn captured(level: Level) -> Vec<String> {
    let me = thread::current().id();
    CAPTURED
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .filter(|(id, lvl, _)| *id == me && *lvl == level)
        .map(|(_, _, msg)| msg.clone())
        .collect()
}

//=== TickAction ==========================================================

/// Something the mock world does during a given tick.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TickAction {
    Submit(StageSwitchRequest),
    Quit,
    Pause(PauseMode),
}

//=== Rig =================================================================

#[derive(Default)]
struct RigState {
    calls: Vec<String>,
    failing: HashSet<String>,
    settings: Settings,
    slot_exists: bool,
    ticks: u32,
    tick_actions: HashMap<u32, Vec<TickAction>>,
    key_presses: HashMap<u32, Vec<GameKey>>,
    window_close_at: Option<u32>,
    current_keys: Vec<GameKey>,
    last_resolution: Option<Resolution>,
    players_at_level_init: Vec<Option<Player>>,
}

#[derive(Clone, Default)]
pub(crate) struct Rig {
    inner: Rc<RefCell<RigState>>,
}

impl Rig {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Setup ------------------------------------------------------------

    /// Makes `op` (e.g. "world.load_stage") fail from now on.
    pub(crate) fn fail(&self, op: &str) {
        self.inner.borrow_mut().failing.insert(op.to_string());
    }

    pub(crate) fn settings_mut(&self, f: impl FnOnce(&mut Settings)) {
        f(&mut self.inner.borrow_mut().settings);
    }

    pub(crate) fn set_slot_exists(&self, exists: bool) {
        self.inner.borrow_mut().slot_exists = exists;
    }

    /// Schedules a world action for tick `tick` (1-based).
    pub(crate) fn on_tick(&self, tick: u32, action: TickAction) {
        self.inner.borrow_mut().tick_actions.entry(tick).or_default().push(action);
    }

    /// Holds `key` down during tick `tick` only.
    pub(crate) fn press_at(&self, tick: u32, key: GameKey) {
        self.inner.borrow_mut().key_presses.entry(tick).or_default().push(key);
    }

    /// Makes the input poll of tick `tick` report a closed window.
    pub(crate) fn close_window_at(&self, tick: u32) {
        self.inner.borrow_mut().window_close_at = Some(tick);
    }

    //--- Inspection -------------------------------------------------------

    pub(crate) fn calls(&self) -> Vec<String> {
        self.inner.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Index of the first call equal to `call`.
    pub(crate) fn position(&self, call: &str) -> Option<usize> {
        self.inner.borrow().calls.iter().position(|c| c == call)
    }

    pub(crate) fn count(&self, call: &str) -> usize {
        self.inner.borrow().calls.iter().filter(|c| *c == call).count()
    }

    pub(crate) fn ticks(&self) -> u32 {
        self.inner.borrow().ticks
    }

    pub(crate) fn last_resolution(&self) -> Option<Resolution> {
        self.inner.borrow().last_resolution
    }

    pub(crate) fn players_at_level_init(&self) -> Vec<Option<Player>> {
        self.inner.borrow().players_at_level_init.clone()
    }

    //--- Construction -----------------------------------------------------

    pub(crate) fn mock(&self, name: &'static str) -> Box<Mock> {
        Box::new(Mock { name, rig: self.clone() })
    }

    pub(crate) fn subsystems(&self) -> Subsystems {
        Subsystems {
            platform: self.mock("platform"),
            input: self.mock("input"),
            settings: self.mock("settings"),
            graphics: self.mock("graphics"),
            fonts: self.mock("fonts"),
            audio: self.mock("audio"),
            trig: self.mock("trig"),
            scripting: self.mock("scripting"),
            textbox: self.mock("textbox"),
            carets: self.mock("carets"),
            world: self.mock("world"),
            persistence: self.mock("persistence"),
            replay: self.mock("replay"),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn record(&self, call: String) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn outcome(&self, op: &str) -> Result<(), SubsystemError> {
        if self.inner.borrow().failing.contains(op) {
            Err(SubsystemError::new(format!("{} scripted to fail", op)))
        } else {
            Ok(())
        }
    }
}

//=== Mock ================================================================

pub(crate) struct Mock {
    name: &'static str,
    rig: Rig,
}

impl Mock {
    fn call(&self, op: &str) -> Result<(), SubsystemError> {
        let full = format!("{}.{}", self.name, op);
        self.rig.record(full.clone());
        self.rig.outcome(&full)
    }

    fn call_with(&self, op: &str, arg: impl std::fmt::Display) -> Result<(), SubsystemError> {
        let op_name = format!("{}.{}", self.name, op);
        self.rig.record(format!("{}({})", op_name, arg));
        self.rig.outcome(&op_name)
    }
}

impl Subsystem for Mock {
    fn init(&mut self) -> Result<(), SubsystemError> {
        self.call("init")
    }

    fn close(&mut self) {
        let _ = self.call("close");
    }
}

impl Input for Mock {
    fn poll(&mut self) -> TickControl {
        let _ = self.call("poll");
        let mut rig = self.rig.inner.borrow_mut();
        let upcoming = rig.ticks + 1;
        let keys = rig.key_presses.get(&upcoming).cloned().unwrap_or_default();
        rig.current_keys = keys;
        if rig.window_close_at == Some(upcoming) {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    fn just_pushed(&self, key: GameKey) -> bool {
        self.rig.inner.borrow().current_keys.contains(&key)
    }

    fn end_tick(&mut self) {
        let _ = self.call("end_tick");
    }

    fn remap(&mut self, _key: GameKey, _code: KeyCode) {
        let _ = self.call("remap");
    }
}

impl Graphics for Mock {
    fn init(&mut self, resolution: Resolution) -> Result<(), SubsystemError> {
        self.rig.inner.borrow_mut().last_resolution = Some(resolution);
        self.call("init")
    }

    fn close(&mut self) {
        let _ = self.call("close");
    }

    fn flip(&mut self) {
        let _ = self.call("flip");
    }
}

impl Audio for Mock {
    fn stop_loop_sounds(&mut self) {
        let _ = self.call("stop_loop_sounds");
    }

    fn run_bgm(&mut self) {
        let _ = self.call("run_bgm");
    }
}

impl Scripting for Mock {
    fn stop_scripts(&mut self) {
        let _ = self.call("stop_scripts");
    }
}

impl TextBox for Mock {
    fn clear_stage_select_slots(&mut self) {
        let _ = self.call("clear_stage_select_slots");
    }
}

impl World for Mock {
    fn set_mode(&mut self, mode: GameMode) {
        let _ = self.call_with("set_mode", format!("{:?}", mode));
    }

    fn tick(&mut self, state: &mut SessionState) {
        let _ = self.call("tick");
        let actions = {
            let mut rig = self.rig.inner.borrow_mut();
            rig.ticks += 1;
            let tick = rig.ticks;
            if tick >= MAX_TEST_TICKS {
                state.running = false;
            }
            rig.tick_actions.remove(&tick).unwrap_or_default()
        };

        for action in actions {
            match action {
                TickAction::Submit(request) => state.submit_stage_switch(request),
                TickAction::Quit => state.running = false,
                TickAction::Pause(mode) => state.pause(mode),
            }
        }
    }

    fn load_stage(&mut self, stage: StageId) -> Result<(), SubsystemError> {
        self.call_with("load_stage", stage)
    }

    fn init_level(&mut self, state: &mut SessionState) -> Result<(), SubsystemError> {
        self.rig.inner.borrow_mut().players_at_level_init.push(state.player);
        self.call("init_level")
    }

    fn on_map_exit(&mut self) {
        let _ = self.call("on_map_exit");
    }

    fn destroy_all_objects(&mut self) {
        let _ = self.call("destroy_all_objects");
    }

    fn weapon_intro_slide(&mut self) {
        let _ = self.call("weapon_intro_slide");
    }

    fn start_fade_in(&mut self) {
        let _ = self.call("start_fade_in");
    }

    fn preset_fade_out(&mut self) {
        let _ = self.call("preset_fade_out");
    }
}

impl SettingsSource for Mock {
    fn load(&mut self) -> Settings {
        let _ = self.call("load");
        self.rig.inner.borrow().settings.clone()
    }
}

impl Persistence for Mock {
    fn load(&mut self, slot: u32, _state: &mut SessionState) -> Result<(), SubsystemError> {
        self.call_with("load", slot)
    }

    fn slot_exists(&self, _slot: u32) -> bool {
        self.rig.inner.borrow().slot_exists
    }
}

impl Replay for Mock {
    fn close(&mut self) {
        let _ = self.call("close");
    }

    fn begin_playback(&mut self, name: &str) -> Result<(), SubsystemError> {
        self.call_with("begin_playback", name)
    }

    fn on_game_starting(&mut self) {
        let _ = self.call("on_game_starting");
    }

    fn draw_status(&mut self) {
        let _ = self.call("draw_status");
    }

    fn resolve_name(&self, id: ReplayId) -> String {
        format!("replay-{}", id.0)
    }

    fn set_fast_forward(&mut self, frame: u32) {
        let _ = self.call_with("set_fast_forward", frame);
    }
}
