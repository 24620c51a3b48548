//! Test utilities for HTTP-level and use case testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - An in-memory `WaitlistRepo` for mocking persistence
//! - `TestAppStateBuilder` for constructing an `AppState` with test dependencies

mod app_state_builder;
mod factories;
mod waitlist_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use waitlist_mocks::*;
