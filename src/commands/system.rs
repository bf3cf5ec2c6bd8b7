//! System-related Tauri commands

use serde::{Deserialize, Serialize};

use crate::browser::{self, BrowserIdentity};

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
}

/// Get basic system information
#[tauri::command]
pub async fn get_system_info() -> Result<SystemInfo, String> {
    Ok(SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    })
}

/// Resolve the embedding browser identity from a user-agent string
#[tauri::command]
pub async fn detect_browser(user_agent: String) -> Result<BrowserIdentity, String> {
    Ok(browser::resolve(&user_agent))
}
