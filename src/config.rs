//! Configuration and session persistence for the TUI

use crate::state::Session;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "formdeck", "formdeck-tui")
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Forms sort field
    pub form_sort_field: Option<String>,
    /// Forms sort direction
    pub form_sort_direction: Option<String>,
    /// Show archived forms by default
    pub show_archived_forms: Option<bool>,
    /// Simulated backend latency in milliseconds
    pub backend_latency_ms: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

/// Persisted session, the counterpart of the demo's local-storage `user` key.
/// Present file means "stay logged in"; removed on logout.
pub struct SessionStore;

impl SessionStore {
    fn session_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("user.json"))
    }

    /// Load the persisted session, if any
    pub fn load() -> Option<Session> {
        let path = Self::session_path()?;
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persist the session
    pub fn save(session: &Session) -> Result<()> {
        if let Some(path) = Self::session_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(session)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Drop the persisted session
    pub fn clear() -> Result<()> {
        if let Some(path) = Self::session_path() {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
