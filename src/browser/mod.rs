//! Browser identity resolution
//!
//! Resolves the user-agent string of the embedding webview into a coarse
//! browser identity used for stream constraint selection.

mod identity;

pub use identity::{resolve, BrowserIdentity};
