//=========================================================================
// Session Errors
//=========================================================================
//
// Failure taxonomy for the session controller.
//
//   SubsystemError   opaque failure reported by a collaborator
//   InitError        fatal: startup or per-level init failed
//   InGameError      load / replay / stage failure once the loop runs
//   SessionError     either of the above, as seen by the outer loop
//
// A user quit is not an error; it simply clears `running`.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::lifecycle::SubsystemId;
use crate::core::stage::StageId;

//=== SubsystemError ======================================================

/// Failure reported by an external collaborator (graphics, persistence,
/// replay, stage loader...).
///
/// The session never inspects the cause; it only decides which path the
/// failure routes to.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SubsystemError {
    message: String,
}

impl SubsystemError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

//=== InitError ===========================================================

/// Unrecoverable failure before or between stages. Exit status 1.
#[derive(Debug, Error)]
pub enum InitError {
    /// A subsystem failed to come up during startup.
    #[error("failed to initialize {subsystem}: {source}")]
    Subsystem {
        subsystem: SubsystemId,
        #[source]
        source: SubsystemError,
    },

    /// The per-level initialization hook failed after a stage was entered.
    #[error("level initialization failed: {source}")]
    LevelInit {
        #[source]
        source: SubsystemError,
    },
}

//=== InGameError =========================================================

/// Failure of a stage-entry action once the game loop is running.
///
/// Never retried: the session tears down and exits with status 1.
#[derive(Debug, Error)]
pub enum InGameError {
    #[error("failed to load save slot {slot}: {source}")]
    LoadGame {
        slot: u32,
        #[source]
        source: SubsystemError,
    },

    #[error("failed to open replay '{name}': {source}")]
    ReplayOpen {
        name: String,
        #[source]
        source: SubsystemError,
    },

    #[error("failed to load stage {stage}: {source}")]
    StageLoad {
        stage: StageId,
        #[source]
        source: SubsystemError,
    },

    #[error("spawn tile ({x}, {y}) out of range for stage {stage}")]
    SpawnOutOfRange { stage: StageId, x: i32, y: i32 },
}

//=== SessionError ========================================================

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    InGame(#[from] InGameError),
}

//=== ConfigError =========================================================

/// Errors raised while loading a [`SessionConfig`](crate::core::config::SessionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== ExitStatus ==========================================================

/// Final outcome of a session run.
///
/// `Success` covers a user quit or natural end; `Failure` covers any
/// initialization failure or in-game error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    /// Process exit code (0 or 1).
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => std::process::ExitCode::SUCCESS,
            ExitStatus::Failure => std::process::ExitCode::FAILURE,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
    }

    #[test]
    fn init_error_names_the_subsystem() {
        let err = InitError::Subsystem {
            subsystem: SubsystemId::Graphics,
            source: SubsystemError::new("no video mode"),
        };
        assert_eq!(err.to_string(), "failed to initialize graphics: no video mode");
    }

    #[test]
    fn in_game_error_converts_into_session_error() {
        let err: SessionError = InGameError::StageLoad {
            stage: StageId(12),
            source: SubsystemError::new("missing pxm"),
        }
        .into();

        assert!(matches!(err, SessionError::InGame(InGameError::StageLoad { .. })));
        assert_eq!(err.to_string(), "failed to load stage 12: missing pxm");
    }
}
