//! Authentication primitives.
//!
//! - [`jwt`] -- validation of access tokens issued by the identity platform.

pub mod jwt;
