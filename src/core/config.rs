//=========================================================================
// Session Configuration
//=========================================================================
//
// Tunables of the session controller: tick rate, catch-up policy, the
// special-map threshold, tile geometry and new-game parameters.
//
// Every field has a default, so a config file only lists what it changes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::ConfigError;
use crate::core::stage::{ReplayId, StageId, StageSwitchRequest};

//=== NewGameConfig =======================================================

/// Where and how a fresh playthrough begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewGameConfig {
    /// Stage a new game starts in.
    pub start_stage: StageId,

    /// Player spawn tile in the start stage.
    pub start_tile: (i32, i32),

    /// Entry event that plays the intro cinematic.
    pub intro_event: u32,

    /// Entry event for arriving at the start stage without the intro.
    /// Entering the start stage with this event slides in the weapon bar.
    pub arrival_event: u32,

    pub max_hp: i32,
}

impl NewGameConfig {
    /// Request that places a new game at the start stage.
    pub fn entry_request(&self, show_intro: bool) -> StageSwitchRequest {
        let event = if show_intro { self.intro_event } else { self.arrival_event };
        StageSwitchRequest::enter(self.start_stage, self.start_tile.0, self.start_tile.1, event)
    }
}

impl Default for NewGameConfig {
    fn default() -> Self {
        Self {
            start_stage: StageId(13),
            start_tile: (10, 8),
            intro_event: 200,
            arrival_event: 91,
            max_hp: 3,
        }
    }
}

//=== ReplayStart =========================================================

/// Replay to play as soon as the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStart {
    pub id: ReplayId,

    /// Frame to fast-forward to before playing at normal speed.
    #[serde(default)]
    pub fast_forward: u32,
}

//=== SessionConfig =======================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulation ticks per second.
    pub tps: u32,

    /// How many tick intervals behind the scheduler may fall before it
    /// drops the backlog instead of catching up.
    pub catch_up_limit: u32,

    /// Longest idle between scheduler polls, in milliseconds. 0 busy-polls.
    pub idle_wait_ms: u64,

    /// Stage ids at or above this stop looping sounds on entry.
    pub special_maps_threshold: u32,

    pub tile_width: i32,
    pub tile_height: i32,

    /// Fixed-point shift between pixels and subpixels.
    pub subpixel_shift: u32,

    pub new_game: NewGameConfig,

    pub replay_on_start: Option<ReplayStart>,
}

impl SessionConfig {
    //--- Loading ----------------------------------------------------------

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks values the scheduler cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tps == 0 || self.tps > 1000 {
            return Err(ConfigError::Invalid(format!("tps must be in 1..=1000, got {}", self.tps)));
        }
        if self.catch_up_limit == 0 {
            return Err(ConfigError::Invalid("catch_up_limit must be at least 1".into()));
        }
        if self.tile_width <= 0 || self.tile_height <= 0 {
            return Err(ConfigError::Invalid("tile dimensions must be positive".into()));
        }
        if self.subpixel_shift >= 16 {
            return Err(ConfigError::Invalid(format!(
                "subpixel_shift {} would overflow positions",
                self.subpixel_shift
            )));
        }
        Ok(())
    }

    //--- Derived Values ---------------------------------------------------

    /// Converts a tile position into subpixel coordinates.
    ///
    /// Returns `None` when either coordinate does not fit in an `i32`.
    pub fn tile_to_subpixel(&self, tile_x: i32, tile_y: i32) -> Option<(i32, i32)> {
        Some((
            self.scale(tile_x, self.tile_width)?,
            self.scale(tile_y, self.tile_height)?,
        ))
    }

    fn scale(&self, tile: i32, tile_size: i32) -> Option<i32> {
        let pixels = tile.checked_mul(tile_size)?;
        let subpixel = pixels.checked_shl(self.subpixel_shift)?;
        // checked_shl only rejects oversized shift amounts, not lost bits.
        (subpixel >> self.subpixel_shift == pixels).then_some(subpixel)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tps: 50,
            catch_up_limit: 3,
            idle_wait_ms: 1,
            special_maps_threshold: 1000,
            tile_width: 16,
            tile_height: 16,
            subpixel_shift: 9,
            new_game: NewGameConfig::default(),
            replay_on_start: None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stage::StageAction;

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = SessionConfig::from_json(
            r#"{ "tps": 60, "new_game": { "start_stage": 1 }, "replay_on_start": { "id": 4 } }"#,
        )
        .unwrap();

        assert_eq!(config.tps, 60);
        assert_eq!(config.new_game.start_stage, StageId(1));
        assert_eq!(config.new_game.intro_event, 200);
        assert_eq!(
            config.replay_on_start,
            Some(ReplayStart { id: ReplayId(4), fast_forward: 0 })
        );
    }

    #[test]
    fn zero_tps_is_rejected() {
        let err = SessionConfig::from_json(r#"{ "tps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_catch_up_limit_is_rejected() {
        let err = SessionConfig::from_json(r#"{ "catch_up_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SessionConfig::from_json("tps = 50").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{ "idle_wait_ms": 0 }"#).unwrap();

        assert_eq!(SessionConfig::load(&path).unwrap().idle_wait_ms, 0);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn tile_to_subpixel_scales_and_shifts() {
        let config = SessionConfig::default();
        assert_eq!(config.tile_to_subpixel(10, 8), Some(((10 * 16) << 9, (8 * 16) << 9)));
        assert_eq!(config.tile_to_subpixel(-3, 0), Some(((-3 * 16) << 9, 0)));
    }

    #[test]
    fn tile_to_subpixel_rejects_overflow() {
        let config = SessionConfig::default();

        // Largest tile that still fits: 2^18 - 1 at 16px and shift 9.
        let max = (1 << 18) - 1;
        assert_eq!(config.tile_to_subpixel(max, 0).map(|(x, _)| x), Some((max * 16) << 9));
        assert_eq!(config.tile_to_subpixel(-(1 << 18), 0).map(|(x, _)| x), Some(i32::MIN));

        assert_eq!(config.tile_to_subpixel(1 << 18, 0), None);
        assert_eq!(config.tile_to_subpixel(0, 200_000_000), None);
        assert_eq!(config.tile_to_subpixel(i32::MIN, 0), None);
    }

    #[test]
    fn entry_request_picks_event() {
        let new_game = NewGameConfig::default();

        let intro = new_game.entry_request(true);
        assert_eq!(intro.action, StageAction::Enter(StageId(13)));
        assert_eq!(intro.event_on_entry, 200);

        let arrival = new_game.entry_request(false);
        assert_eq!((arrival.player_x, arrival.player_y), (10, 8));
        assert_eq!(arrival.event_on_entry, 91);
    }
}
