//! Runtime settings loader.
//!
//! Loads an optional YAML file (caller-supplied path, or the path named by
//! `MUSTER_SETTINGS`). Every field is optional; defaults are applied when
//! resolving into the runtime config and the role catalog.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use muster_core::{CatalogError, DEFAULT_DAMAGE_POOL_CAPACITY, RoleCatalog};

use crate::runtime::{
    DEFAULT_IDLE_TIMEOUT_MS, DEFAULT_INBOUND_QUEUE_CAPACITY, SessionRuntimeConfig,
};

/// Environment variable naming the settings file path.
pub const SETTINGS_PATH_ENV: &str = "MUSTER_SETTINGS";

/// Top-level settings file shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    /// Session actor knobs.
    #[serde(default)]
    pub session: SessionSettings,
    /// Role catalog knobs.
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Session actor knobs; unset fields fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    /// Idle window in milliseconds before an unconfirmed session times out.
    pub idle_timeout_ms: Option<u64>,
    /// Bounded capacity of a session's inbound event queue.
    pub inbound_queue_capacity: Option<usize>,
}

/// Role catalog knobs; unset fields fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// Capacity of the shared damage pool.
    pub damage_pool_capacity: Option<usize>,
    /// Label used for synthesized placeholder occupants.
    pub placeholder_label: Option<String>,
}

/// Load settings from a YAML file; a missing file yields defaults.
pub fn load_runtime_settings(path: impl AsRef<Path>) -> Result<RuntimeSettings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(RuntimeSettings::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse settings file {}", path.display()))
}

/// Load settings from the path named by `MUSTER_SETTINGS`; defaults when the
/// variable is unset or empty.
pub fn load_runtime_settings_from_env() -> Result<RuntimeSettings> {
    match std::env::var(SETTINGS_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => load_runtime_settings(path.trim()),
        _ => Ok(RuntimeSettings::default()),
    }
}

impl RuntimeSettings {
    /// Resolve into the per-session runtime knobs.
    pub fn session_runtime_config(&self) -> SessionRuntimeConfig {
        SessionRuntimeConfig {
            idle_timeout: Duration::from_millis(
                self.session.idle_timeout_ms.unwrap_or(DEFAULT_IDLE_TIMEOUT_MS),
            ),
            inbound_queue_capacity: self
                .session
                .inbound_queue_capacity
                .unwrap_or(DEFAULT_INBOUND_QUEUE_CAPACITY),
        }
    }

    /// Build the stock keystone catalog with any configured overrides.
    pub fn role_catalog(&self) -> Result<RoleCatalog, CatalogError> {
        let capacity = self
            .catalog
            .damage_pool_capacity
            .unwrap_or(DEFAULT_DAMAGE_POOL_CAPACITY);
        match &self.catalog.placeholder_label {
            Some(label) => RoleCatalog::keystone_with_label(capacity, label),
            None => RoleCatalog::keystone(capacity),
        }
    }
}
