use std::time::Duration;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_FILE: &str = "esphome-rest-map.toml";

pub const DEFAULT_API_PORT: u16 = 6053;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Period of the dashboard's auto refresh, in milliseconds
pub const AUTO_REFRESH_MS: u32 = 5000;

pub const RULE_WIDTH: usize = 60;

pub const METHOD_GET: &str = "GET";
pub const METHOD_POST: &str = "POST";
