use argh::FromArgs;
use figment::{providers::Serialized, Figment};

use crate::dashboard::Flavor;

#[derive(Debug, FromArgs)]
/// Lists the entities of an ESPHome device and maps them to its REST API
pub struct EspRestMapArgs {
    /// IP address or hostname of the device
    #[argh(positional)]
    pub host: Option<String>,

    /// API encryption key of the device (noise_psk)
    #[argh(option)]
    pub encryption_key: Option<String>,

    /// API password of the device
    #[argh(option)]
    pub password: Option<String>,

    /// API port of the device (default: 6053)
    #[argh(option)]
    pub port: Option<u16>,

    /// JSON file holding the device info and entity list
    #[argh(option)]
    pub snapshot: Option<String>,

    /// test all GET endpoints
    #[argh(switch)]
    pub test: bool,

    /// time the execution and only print summaries
    #[argh(switch)]
    pub time: bool,

    /// generate a JavaScript dashboard into the given directory
    #[argh(option)]
    pub js: Option<String>,

    /// generate a TypeScript dashboard into the given directory
    #[argh(option)]
    pub ts: Option<String>,

    /// provide the path to the config file
    #[argh(option)]
    pub config: Option<String>,

    /// display the version of the app
    #[argh(switch, short = 'v')]
    pub version: bool,
}

impl EspRestMapArgs {
    pub fn from_env() -> Self {
        argh::from_env()
    }

    /// Layers the arguments that were given on top of the configuration
    pub fn apply(&self, mut figment: Figment) -> Figment {
        let options = [
            ("device.host", &self.host),
            ("device.encryption_key", &self.encryption_key),
            ("device.password", &self.password),
            ("device.snapshot", &self.snapshot),
        ];
        for (key, value) in options {
            if let Some(value) = value {
                figment = figment.merge(Serialized::default(key, value.clone()));
            }
        }

        if let Some(port) = self.port {
            figment = figment.merge(Serialized::default("device.port", port));
        }
        if self.test {
            figment = figment.merge(Serialized::default("probe.enabled", true));
        }
        if self.time {
            figment = figment.merge(Serialized::default("timed", true));
        }
        if let Some((flavor, dir)) = self.dashboard() {
            figment = figment
                .merge(Serialized::default("dashboard.flavor", flavor))
                .merge(Serialized::default("dashboard.output_dir", dir.to_owned()));
        }
        figment
    }

    /// `--ts` wins if both flavors are requested
    fn dashboard(&self) -> Option<(Flavor, &str)> {
        match (self.js.as_deref(), self.ts.as_deref()) {
            (_, Some(dir)) => Some((Flavor::TypeScript, dir)),
            (Some(dir), None) => Some((Flavor::JavaScript, dir)),
            (None, None) => None,
        }
    }
}
