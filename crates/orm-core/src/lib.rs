//! # orm-core
//!
//! Failure taxonomy and policy options for the persistence engine.
//!
//! This crate provides the types every other layer agrees on:
//! - The [`errors::OrmError`] taxonomy with category enums and context fields
//! - Policy option enums with their text interpretation rules
//! - Property key constants
//! - Driver error classification by SQLSTATE and vendor code
//! - Translation to the coarser boundary error set

pub mod boundary;
pub mod errors;
pub mod options;
pub mod settings;
pub mod sql;
