//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entity models into these domain models at the
//! data-layer boundary so the service layer never handles raw entities.

pub mod confession;
pub mod confession_guild;
