//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Common
// ============================================================================

/// `{"status":"ok"}`
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

// ============================================================================
// Request Link
// ============================================================================

/// Request link body. A missing field is treated like an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestLinkRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestLinkResponse {
    pub status: &'static str,
    /// Development only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic_link: Option<String>,
}

// ============================================================================
// Verify
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: String,
}

// ============================================================================
// Session Status
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
