//! Domain rules for the caseboard service.
//!
//! This crate has no database or HTTP dependencies. It holds the shared
//! types, enumerations, validation functions, and pure computations that the
//! repository and API layers build on.

#[macro_use]
mod macros;

pub mod activity;
pub mod case;
pub mod dashboard;
pub mod error;
pub mod evidence;
pub mod forensic_action;
pub mod hashing;
pub mod roles;
pub mod suspect;
pub mod text;
pub mod types;
pub mod victim;
