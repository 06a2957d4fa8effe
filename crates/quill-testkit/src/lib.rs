//! # Quill Testkit
//!
//! Fixture generation and assertion helpers shared by the test suites.
//! Fixtures are randomized but schema-valid; the random source is explicit
//! so any scenario can be replayed under a fixed seed.

pub mod assertions;
pub mod fixtures;

pub use fixtures::{FixtureGenerator, seed};
