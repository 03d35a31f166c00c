use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};

use crate::{
    args::EspRestMapArgs,
    constants::{APP_NAME, APP_VERSION},
    dashboard,
    probe::{ProbeReport, Prober},
    report,
    settings::Settings,
    source::{EntitySource, SnapshotFileSource},
    surface::{synthesize, RestSurface},
    writer::write_asset,
};

/// What a single run produced
#[derive(Debug)]
pub struct Survey {
    pub surface: RestSurface,
    pub probe: Option<ProbeReport>,
    pub written: Vec<PathBuf>,
}

pub struct EspRestMap {
    settings: Settings,
}

impl EspRestMap {
    pub fn new(args: &EspRestMapArgs) -> Result<Self> {
        let settings = Settings::new(args).context("Invalid configuration")?;
        Ok(Self::with_settings(settings))
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        log::info!("Starting {} {}", APP_NAME, APP_VERSION);
        let start = Instant::now();

        let result = match SnapshotFileSource::from_settings(&self.settings.device) {
            Ok(source) => self.survey(&source).await.map(|survey| {
                log::debug!(
                    "Mapped {} endpoints, skipped {} entities, wrote {} files",
                    survey.surface.endpoints.len(),
                    survey.surface.skipped.len(),
                    survey.written.len()
                );
                if let Some(probe) = survey.probe {
                    log::debug!("{} of {} probes failed", probe.failed, probe.tested());
                }
            }),
            Err(e) => Err(e.into()),
        };

        if self.settings.timed {
            print!("{}", report::execution_time(start.elapsed()));
        }
        result
    }

    /// Lists the entities from `source`, prints the REST surface and, if
    /// configured, generates the dashboard and probes the endpoints.
    pub async fn survey(&self, source: &impl EntitySource) -> Result<Survey> {
        let timed = self.settings.timed;
        let device = &self.settings.device;

        if !timed {
            println!("Connecting to {}:{}...", device.host, device.port);
        }
        let snapshot = source
            .fetch()
            .await
            .with_context(|| format!("Error connecting to device {}", device.host))?;
        if !timed {
            println!("Connected successfully!\n");
        }

        print!("{}", report::device_info(&snapshot.device, timed));
        print!("{}", report::entities(&snapshot.entities, timed));

        let base_url = self.settings.base_url();
        let surface = synthesize(&snapshot.entities);
        print!("{}", report::surface(&surface, &base_url, timed));

        let mut written = Vec::new();
        if let Some((flavor, dir)) = self.settings.dashboard.target() {
            let asset = dashboard::generate(
                &base_url,
                snapshot.device.display_name(),
                &surface.endpoints,
                flavor,
            )?;
            written = write_asset(Path::new(dir), &asset).await?;
            if !timed {
                println!("Dashboard written to '{}'", dir);
            }
        }

        let probe = if self.settings.probe.enabled {
            let report = Prober::new(base_url.as_str())?
                .probe(&surface.endpoints)
                .await;
            print!("{}", report::probe(&report, timed));
            Some(report)
        } else {
            None
        };

        Ok(Survey {
            surface,
            probe,
            written,
        })
    }
}
