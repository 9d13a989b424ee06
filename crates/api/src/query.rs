//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /evidence/detect-type`.
#[derive(Debug, Deserialize)]
pub struct DetectTypeParams {
    #[serde(default)]
    pub file_name: String,
    pub mime: Option<String>,
}

/// Query parameters for the WebSocket upgrade. Browsers cannot set an
/// `Authorization` header on upgrade requests, so the token may come here.
#[derive(Debug, Deserialize)]
pub struct WsAuthParams {
    pub token: Option<String>,
}
