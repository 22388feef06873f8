//=========================================================================
// Aetheric Session: Library Root
//
// Session controller for a 2D action game: fixed-timestep frame
// scheduling, ordered subsystem startup and teardown, new-game setup and
// the stage transition state machine.
//
// Typical usage:
// ```no_run
// use aetheric_session::core::Subsystems;
// use aetheric_session::SessionBuilder;
//
// fn main() -> std::process::ExitCode {
//     SessionBuilder::new(Subsystems::headless()).build().run().into()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scheduler, lifecycle, stage machinery and the
// collaborator contracts. `platform` turns Winit key events into
// messages for `ChannelInput`.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod session;

//--- Public Exports ------------------------------------------------------

pub use session::{Session, SessionBuilder};
