use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    settings::DeviceSettings,
    surface::Entity,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub name: String,
    pub friendly_name: String,
    pub mac_address: String,
    pub esphome_version: String,
    pub compilation_time: String,
    pub model: String,
    pub manufacturer: String,
    pub platform: String,
}

impl DeviceInfo {
    /// Friendly name if the device has one, its node name otherwise
    pub fn display_name(&self) -> &str {
        if self.friendly_name.is_empty() {
            &self.name
        } else {
            &self.friendly_name
        }
    }
}

/// Everything the entity source reports about a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub device: DeviceInfo,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// Delivers the device info and entity list of a device.
#[async_trait]
pub trait EntitySource {
    async fn fetch(&self) -> Result<DeviceSnapshot>;
}

/// Reads a snapshot previously dumped to a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &DeviceSettings) -> Result<Self> {
        let Some(snapshot) = settings.snapshot.as_deref() else {
            return Err(Error::Connection(format!(
                "no entity snapshot configured for {}:{}",
                settings.host, settings.port
            )));
        };
        if settings.encryption_key.is_some() || settings.password.is_some() {
            log::debug!("Credentials are not used when reading from a snapshot file");
        }
        Ok(Self::new(snapshot))
    }
}

#[async_trait]
impl EntitySource for SnapshotFileSource {
    async fn fetch(&self) -> Result<DeviceSnapshot> {
        log::debug!("Reading entity snapshot from '{}'", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Connection(format!("cannot read '{}': {}", self.path.display(), e))
        })?;

        let snapshot: DeviceSnapshot = serde_json::from_str(&content).map_err(|e| {
            Error::Connection(format!("invalid snapshot '{}': {}", self.path.display(), e))
        })?;
        log::info!(
            "Loaded {} entities of device '{}'",
            snapshot.entities.len(),
            snapshot.device.name
        );
        Ok(snapshot)
    }
}
