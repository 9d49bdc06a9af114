//! Stderr logging using env_logger
//!
//! `RUST_LOG` wins when set. Otherwise the level is `warn`, or `debug`
//! with `--verbose`. Stdout stays reserved for command output.

use env_logger::{Env, Target};

/// Initialize stderr logging. Safe to call once per process.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(default_level);

    let result = env_logger::Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init();

    if let Err(e) = result {
        eprintln!("warning: logger already initialized: {e}");
    }
}
