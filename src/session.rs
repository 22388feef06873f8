//=========================================================================
// Session Controller
//
// Owns the outer game loop: brings subsystems up, enters stages through
// the transition state machine, drives the frame scheduler, and funnels
// every exit path into one teardown.
//
// Architecture:
// ```text
//     SessionBuilder  ──build()──>  Session  ──run()──>  ExitStatus
//         │                           │
//         ├─ with_config()            ├─ Sequencer::initialize_all()
//         ├─ with_tps()               ├─ loop while running:
//         └─ with_clock()             │    take request → enter stage
//                                     │    → init level → frames
//                                     └─ Sequencer::shutdown_all()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::SessionConfig;
use crate::core::error::{ExitStatus, InGameError, InitError, SessionError};
use crate::core::input::GameKey;
use crate::core::lifecycle::Sequencer;
use crate::core::scheduler::{FramePoll, FrameScheduler};
use crate::core::settings::Settings;
use crate::core::stage::transition::{EntryFlags, StageEntry};
use crate::core::stage::{StageAction, StageId, StageSwitchRequest};
use crate::core::state::{GameMode, PauseMode, SessionState};
use crate::core::subsystems::{Subsystems, TickControl};

//=== SessionBuilder ======================================================

/// Builder for configuring and constructing a [`Session`].
///
/// # Default Values
///
/// - **Config**: [`SessionConfig::default()`] (50 TPS, catch-up limit 3)
/// - **Clock**: [`SystemClock`]
///
/// # Examples
///
/// ```no_run
/// use aetheric_session::core::Subsystems;
/// use aetheric_session::SessionBuilder;
///
/// let status = SessionBuilder::new(Subsystems::headless())
///     .with_tps(60)
///     .build()
///     .run();
/// std::process::exit(status.code());
/// ```
pub struct SessionBuilder {
    systems: Subsystems,
    config: SessionConfig,
    clock: Option<Box<dyn Clock>>,
}

impl SessionBuilder {
    /// Creates a builder around the given collaborators.
    pub fn new(systems: Subsystems) -> Self {
        Self {
            systems,
            config: SessionConfig::default(),
            clock: None,
        }
    }

    /// Replaces the whole configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not validate.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("Session config rejected: {}", e);
        }
        self.config = config;
        self
    }

    /// Sets the simulation tick rate.
    ///
    /// # Panics
    ///
    /// Panics if `tps` is zero or above 1000.
    pub fn with_tps(mut self, tps: u32) -> Self {
        assert!(tps > 0 && tps <= 1000, "TPS must be in 1..=1000, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Replaces the wall-clock source (tests use a manual clock).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Builds the session. Nothing is initialized until [`Session::run`].
    pub fn build(self) -> Session {
        info!(
            "Building session (TPS: {}, catch-up limit: {})",
            self.config.tps, self.config.catch_up_limit
        );

        Session {
            scheduler: FrameScheduler::new(self.config.tps, self.config.catch_up_limit),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock::new())),
            systems: self.systems,
            config: self.config,
            state: SessionState::new(),
            settings: Settings::default(),
            sequencer: Sequencer::new(),
            flags: EntryFlags::default(),
        }
    }
}

//=== Session =============================================================

/// The session controller.
///
/// Single-threaded: every collaborator is called from the thread that
/// calls [`Session::run`]. A dropped session still tears down whatever
/// it started.
pub struct Session {
    systems: Subsystems,
    state: SessionState,
    settings: Settings,
    config: SessionConfig,
    scheduler: FrameScheduler,
    clock: Box<dyn Clock>,
    sequencer: Sequencer,
    flags: EntryFlags,
}

impl Session {
    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Settings as loaded during startup (defaults before that).
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    //--- Execution --------------------------------------------------------

    /// Runs the session to completion.
    ///
    /// # Lifecycle
    ///
    /// 1. Initializes every subsystem in dependency order
    /// 2. Picks the first stage request (intro, load, or replay)
    /// 3. Enters stages and runs frames until `running` is cleared
    /// 4. Tears everything down exactly once, whatever happened
    pub fn run(mut self) -> ExitStatus {
        info!("Starting session (TPS: {})", self.config.tps);

        let status = match self.run_stages() {
            Ok(()) => ExitStatus::Success,
            Err(SessionError::Init(e)) => {
                error!("Fatal: {}", e);
                ExitStatus::Failure
            }
            Err(SessionError::InGame(e)) => {
                report_in_game_error(&e);
                ExitStatus::Failure
            }
        };

        self.sequencer.shutdown_all(&mut self.systems);
        info!("Session ended with status {}", status.code());
        status
    }

    //--- Outer Loop -------------------------------------------------------

    fn run_stages(&mut self) -> Result<(), SessionError> {
        self.settings = self.sequencer.initialize_all(&mut self.systems)?;
        self.state.create_player();

        self.submit_initial_request();
        self.state.running = true;
        self.flags.freshstart = true;

        while self.state.running {
            let Some(request) = self.state.take_stage_switch() else {
                warn!("No stage request pending, ending session");
                break;
            };

            self.enter_stage(request)?;

            self.systems
                .world
                .init_level(&mut self.state)
                .map_err(|source| InitError::LevelInit { source })?;

            if self.flags.freshstart {
                self.systems.world.weapon_intro_slide();
            }

            self.run_frames();

            self.systems.world.on_map_exit();
            self.flags.freshstart = false;
        }

        Ok(())
    }

    fn enter_stage(&mut self, request: StageSwitchRequest) -> Result<(), InGameError> {
        StageEntry {
            state: &mut self.state,
            systems: &mut self.systems,
            settings: &self.settings,
            config: &self.config,
            flags: &mut self.flags,
        }
        .enter(request)
    }

    /// Chooses what the first outer-loop iteration does.
    fn submit_initial_request(&mut self) {
        self.systems.world.set_mode(GameMode::Normal);

        // Null stage to idle in while the intro takes over.
        let mut request = StageSwitchRequest::new(StageAction::Enter(StageId(0)));

        if let Some(replay) = self.config.replay_on_start {
            request = StageSwitchRequest::new(StageAction::StartReplay(replay.id));
            if replay.fast_forward > 0 {
                self.systems.replay.set_fast_forward(replay.fast_forward);
            }
        } else if self.settings.skip_intro
            && self.systems.persistence.slot_exists(self.settings.last_save_slot)
        {
            request = StageSwitchRequest::new(StageAction::LoadGame { from_menu: false });
        } else {
            self.systems.world.set_mode(GameMode::Intro);
        }

        if self.state.is_paused() {
            request = StageSwitchRequest::new(StageAction::Enter(StageId(0)));
        }

        // The very first load appears without a fade.
        if matches!(request.action, StageAction::LoadGame { from_menu: false }) {
            self.flags.inhibit_load_fade = true;
        }

        self.state.submit_stage_switch(request);
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs ticks until a stage switch is requested or the session stops.
    fn run_frames(&mut self) {
        self.state.clear_stage_switch();
        self.scheduler.reset();

        let idle_cap = Duration::from_millis(self.config.idle_wait_ms);

        while self.state.running && !self.state.has_pending_stage_switch() {
            match self.scheduler.poll(self.clock.now()) {
                FramePoll::Tick => self.run_tick(),
                FramePoll::Wait(remaining) => {
                    if !idle_cap.is_zero() {
                        self.clock.idle(remaining.min(idle_cap));
                    }
                }
            }
        }
    }

    /// One simulation + render step.
    ///
    /// Order: input → global keys → world → replay status → flip →
    /// input snapshot → BGM.
    fn run_tick(&mut self) {
        if self.systems.input.poll() == TickControl::Exit {
            info!("Quit requested by platform");
            self.state.running = false;
        }

        let input = &self.systems.input;
        if input.just_pushed(GameKey::Escape) {
            if self.settings.instant_quit {
                self.state.running = false;
            } else if !self.state.is_paused() {
                self.state.pause(PauseMode::Paused);
            }
        } else if input.just_pushed(GameKey::Options) {
            self.state.pause(PauseMode::Options);
        }

        self.systems.world.tick(&mut self.state);
        self.systems.replay.draw_status();
        self.systems.graphics.flip();
        self.systems.input.end_tick();

        // Right after a tick is when the most time remains before the
        // next one is due.
        self.systems.audio.run_bgm();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.sequencer.shutdown_all(&mut self.systems);
    }
}

//=== Diagnostics =========================================================

fn report_in_game_error(err: &InGameError) {
    error!("{}", err);
    error!("");
    error!(" ************************************************");
    error!(" * An in-game error occurred. Game shutting down.");
    error!(" ************************************************");
}

//=========================================================================
// Unit Tests
//=========================================================================
