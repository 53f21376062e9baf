//! Factory methods for creating test entities.
//!
//! Each factory provides a builder pattern for creating entities with sensible
//! defaults that can be overridden for specific test scenarios.

pub mod confession;
pub mod confession_guild;
pub mod helpers;
