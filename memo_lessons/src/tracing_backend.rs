// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Configures a suitable default [`tracing`] implementation for replaying lessons.
//!
//! This uses a compact log format, printing the time without the date and skipping the target.
//! It also uses a default filter, which can be overwritten using `RUST_LOG`.
//! This will include all [`DEBUG`](tracing::Level::DEBUG) messages in debug mode,
//! and all [`INFO`](tracing::Level::INFO) level messages in release mode.
//! Every skip and recompute decision is logged at [`TRACE`](tracing::Level::TRACE).
//!
//! If a `tracing` backend is already configured, this will not overwrite that.

use std::error::Error;
use std::fmt;

use time::macros::format_description;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

/// Get the tracing subscriber we wish to set up with the given `default_level`.
///
/// Returns the subscriber, and the error in case of a (recoverable) error.
fn default_tracing_subscriber(
    default_level: LevelFilter,
) -> (impl Subscriber + Send + Sync, Option<Box<dyn Error>>) {
    // Use EnvFilter to allow the user to override the log level without recompiling.
    let env_filter_builder = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("RUST_LOG");
    let err = env_filter_builder
        .from_env()
        .err()
        .map(|err| format!("failed to parse RUST_LOG environment variable: {err:#}").into());
    let env_filter = env_filter_builder.from_env_lossy();

    // Lessons only run for a moment, so the date and sub-millisecond precision are noise.
    let timer = UtcTime::new(format_description!(
        // We append a `Z` here to indicate clearly that this is a UTC time
        "[hour repr:24]:[minute]:[second].[subsecond digits:3]Z"
    ));
    // If modifying, also update the module level docs
    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer)
        .with_target(false)
        .with_filter(env_filter);

    (tracing_subscriber::registry().with(console_layer), err)
}

/// An Error indicating that a tracing subscriber has been set before.
#[derive(Debug)]
pub struct TracingSubscriberHasBeenSetError;

impl fmt::Display for TracingSubscriberHasBeenSetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad("A tracing subscriber has been set before.")
    }
}

impl Error for TracingSubscriberHasBeenSetError {}

fn init_with_level(default_level: LevelFilter) -> Result<(), TracingSubscriberHasBeenSetError> {
    let (subscriber, err) = default_tracing_subscriber(default_level);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| TracingSubscriberHasBeenSetError)?;
    if let Some(err) = err {
        tracing::error!("Initialising logging encountered recoverable error: {err}");
    }
    Ok(())
}

/// Initialise tracing with a default subscriber for a unit test.
/// This ignores most messages to limit noise.
pub fn try_init_test_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    // For unit tests we want to suppress most messages.
    init_with_level(LevelFilter::WARN)
}

/// Initialise tracing with a default subscriber for the lessons binary.
pub fn try_init_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    // Default level is DEBUG in --dev, INFO in --release, unless a level is passed.
    // DEBUG prints every child render.
    // INFO only prints the summary of each lesson.
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    init_with_level(default_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_init_test_tracing_errors() {
        let _first_result = try_init_test_tracing();
        let second_result = try_init_test_tracing();
        assert!(second_result.is_err());
    }
}
