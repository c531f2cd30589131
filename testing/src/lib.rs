//! # Timeline Testing
//!
//! Testing utilities and helpers for the timeline store.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`init_test_tracing`]: Log capture for tests
//!
//! ## Example
//!
//! ```ignore
//! use timeline_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TimelineReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TimelineState::default())
//!     .when_action(TimelineAction::SetZoomLevel { level: 42 })
//!     .then_state(|state| assert_eq!(state.zoom_level, 10))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs the
/// subscriber. Honors `RUST_LOG`, defaulting to `debug`.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
