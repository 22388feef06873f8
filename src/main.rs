//=========================================================================
// Headless Session Demo
//
// Runs a session with no-op collaborators and channel-fed input. A
// feeder thread closes the "window" after N seconds (first argument,
// default 3), which ends the session through the normal teardown path.
//
// Usage:
//   RUST_LOG=debug cargo run -- 5
//
//=========================================================================

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use aetheric_session::core::input::{ChannelInput, PlatformEvent};
use aetheric_session::core::Subsystems;
use aetheric_session::SessionBuilder;

const DEFAULT_RUN_SECS: u64 = 3;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let run_secs = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid duration '{}', using {}s", arg, DEFAULT_RUN_SECS);
            DEFAULT_RUN_SECS
        }),
        None => DEFAULT_RUN_SECS,
    };

    let (sender, input) = ChannelInput::channel();

    let feeder = thread::spawn(move || {
        thread::sleep(Duration::from_secs(run_secs));
        info!("Closing window after {}s", run_secs);
        // The session may already be gone; nothing left to notify then.
        let _ = sender.send(PlatformEvent::WindowClosed);
    });

    let mut systems = Subsystems::headless();
    systems.input = Box::new(input);

    let status = SessionBuilder::new(systems).build().run();

    if feeder.join().is_err() {
        warn!("Input feeder thread panicked");
    }

    status.into()
}
