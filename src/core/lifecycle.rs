//=========================================================================
// Startup / Shutdown Sequencer
//=========================================================================
//
// Brings subsystems up in dependency order and tears them down through
// a single convergent routine.
//
// Init order:
//   platform → input → settings → graphics → fonts → audio → trig
//            → scripting → textbox → carets → world → (replay, implicit)
//
// - input before settings: settings may remap bindings
// - settings before graphics: they carry the resolution
//
// Teardown closes whatever actually started, in reverse order, exactly
// once. Later calls are no-ops.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::{InitError, SubsystemError};
use crate::core::settings::Settings;
use crate::core::subsystems::Subsystems;

//=== SubsystemId =========================================================

/// Names a subsystem slot for ordering and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsystemId {
    Platform,
    Input,
    Settings,
    Graphics,
    Fonts,
    Audio,
    Trig,
    Scripting,
    TextBox,
    Carets,
    World,
    Replay,
}

impl SubsystemId {
    /// Startup order.
    pub const INIT_ORDER: [SubsystemId; 12] = [
        SubsystemId::Platform,
        SubsystemId::Input,
        SubsystemId::Settings,
        SubsystemId::Graphics,
        SubsystemId::Fonts,
        SubsystemId::Audio,
        SubsystemId::Trig,
        SubsystemId::Scripting,
        SubsystemId::TextBox,
        SubsystemId::Carets,
        SubsystemId::World,
        SubsystemId::Replay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Input => "input",
            Self::Settings => "settings",
            Self::Graphics => "graphics",
            Self::Fonts => "fonts",
            Self::Audio => "audio",
            Self::Trig => "trig tables",
            Self::Scripting => "scripting",
            Self::TextBox => "textbox",
            Self::Carets => "carets",
            Self::World => "game session",
            Self::Replay => "replay",
        }
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== Sequencer ===========================================================

/// Tracks which subsystems are up and owns the single teardown path.
#[derive(Debug, Default)]
pub struct Sequencer {
    started: Vec<SubsystemId>,
    shut_down: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subsystems started so far, in init order.
    pub fn started(&self) -> &[SubsystemId] {
        &self.started
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    //--- Startup ----------------------------------------------------------

    /// Initializes every subsystem in dependency order.
    ///
    /// Stops at the first failure. Subsystems after the failing one are
    /// never touched, so teardown will not close them.
    pub fn initialize_all(&mut self, systems: &mut Subsystems) -> Result<Settings, InitError> {
        info!("Initializing subsystems");

        let mut settings = Settings::default();

        for id in SubsystemId::INIT_ORDER {
            let result = match id {
                SubsystemId::Platform => systems.platform.init(),
                SubsystemId::Input => systems.input.init(),
                SubsystemId::Settings => {
                    settings = systems.settings.load();
                    for (&key, &code) in &settings.bindings {
                        systems.input.remap(key, code);
                    }
                    Ok(())
                }
                SubsystemId::Graphics => systems.graphics.init(settings.resolution),
                SubsystemId::Fonts => systems.fonts.init(),
                SubsystemId::Audio => systems.audio.init(),
                SubsystemId::Trig => systems.trig.init(),
                SubsystemId::Scripting => systems.scripting.init(),
                SubsystemId::TextBox => systems.textbox.init(),
                SubsystemId::Carets => systems.carets.init(),
                SubsystemId::World => systems.world.init(),
                SubsystemId::Replay => Ok(()),
            };

            self.record(id, result)?;
        }

        info!("All subsystems initialized");
        Ok(settings)
    }

    /// Marks `id` as started, or wraps its failure. The caller reports it.
    fn record(
        &mut self,
        id: SubsystemId,
        result: Result<(), SubsystemError>,
    ) -> Result<(), InitError> {
        match result {
            Ok(()) => {
                debug!("{} up", id);
                self.started.push(id);
                Ok(())
            }
            Err(source) => Err(InitError::Subsystem { subsystem: id, source }),
        }
    }

    //--- Teardown ---------------------------------------------------------

    /// Closes every started subsystem in reverse init order.
    ///
    /// Idempotent: only the first call does anything.
    pub fn shutdown_all(&mut self, systems: &mut Subsystems) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        info!("Shutting down {} subsystems", self.started.len());

        while let Some(id) = self.started.pop() {
            match id {
                SubsystemId::Replay => systems.replay.close(),
                SubsystemId::World => systems.world.close(),
                SubsystemId::Carets => systems.carets.close(),
                SubsystemId::TextBox => systems.textbox.close(),
                SubsystemId::Scripting => systems.scripting.close(),
                SubsystemId::Trig => systems.trig.close(),
                SubsystemId::Audio => systems.audio.close(),
                SubsystemId::Fonts => systems.fonts.close(),
                SubsystemId::Graphics => systems.graphics.close(),
                SubsystemId::Settings => {}
                SubsystemId::Input => systems.input.close(),
                SubsystemId::Platform => systems.platform.close(),
            }
            debug!("{} closed", id);
        }

        info!("Shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
