use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    args::EspRestMapArgs,
    constants::{CONFIG_FILE, DEFAULT_API_PORT},
    dashboard::Flavor,
};

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub device: DeviceSettings,
    pub probe: ProbeSettings,
    pub dashboard: DashboardSettings,
    /// Overrides the `http://<host>` base of the device's web server
    pub base_url: Option<String>,
    /// Only print summary lines and the execution time
    pub timed: bool,
}

impl Settings {
    /// Configuration layered with the given command line arguments on top
    pub fn new(args: &EspRestMapArgs) -> Result<Self, figment::Error> {
        args.apply(Self::figment(args.config.as_deref())).extract()
    }

    /// Defaults, then the config file, then the environment
    pub fn figment(config: Option<&str>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config.unwrap_or(CONFIG_FILE)))
            .merge(Env::raw().map(|k| {
                let key = k.as_str().to_lowercase();
                match ["device", "probe", "dashboard"]
                    .into_iter()
                    .find(|section| key.starts_with(&format!("{}_", section)))
                {
                    Some(section) => format!("{}.{}", section, &key[section.len() + 1..]).into(),
                    None => key.into(),
                }
            }))
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.device.host))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSettings {
    pub host: String,
    pub port: u16,
    pub encryption_key: Option<String>,
    pub password: Option<String>,
    /// JSON dump of the device's info and entities
    pub snapshot: Option<String>,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: DEFAULT_API_PORT,
            encryption_key: None,
            password: None,
            snapshot: None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeSettings {
    pub enabled: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSettings {
    pub flavor: Option<Flavor>,
    pub output_dir: Option<String>,
}

impl DashboardSettings {
    /// Flavor and output directory, if dashboard generation was requested
    pub fn target(&self) -> Option<(Flavor, &str)> {
        match (self.flavor, self.output_dir.as_deref()) {
            (Some(flavor), Some(dir)) => Some((flavor, dir)),
            (None, Some(dir)) => Some((Flavor::default(), dir)),
            _ => None,
        }
    }
}
