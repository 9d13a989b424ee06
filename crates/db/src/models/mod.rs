//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Enumerated columns are stored as `TEXT` and surface as `String` on row
//! structs; DTOs use the typed enums from `caseboard_core` so bad values are
//! rejected at deserialization.

pub mod activity_log;
pub mod case;
pub mod case_suspect;
pub mod dashboard;
pub mod evidence;
pub mod forensic_action;
pub mod suspect;
pub mod victim;
