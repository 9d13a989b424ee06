//! Well-known role names.
//!
//! These must match the `app_role` values issued in access tokens by the
//! identity platform.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INVESTIGATOR: &str = "investigator";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_INVESTIGATOR, ROLE_VIEWER];

/// Staff role carried in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Investigator,
    Viewer,
}

impl Role {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_INVESTIGATOR => Ok(Self::Investigator),
            ROLE_VIEWER => Ok(Self::Viewer),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Investigator => ROLE_INVESTIGATOR,
            Self::Viewer => ROLE_VIEWER,
        }
    }

    /// Whether this role is expected to edit records (admin, investigator).
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Admin | Self::Investigator)
    }
}
