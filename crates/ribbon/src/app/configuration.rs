use cap_std::fs_utf8::Dir;
use miette::{Context, IntoDiagnostic, Result};
use ribbon_core::serde_glam::Vec3;
use ribbon_trail_models::TrailConfiguration;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIGURATION_FILE_NAME: &str = "ribbon.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfiguration {
    pub simulation: SimulationParameters,
    pub trail: TrailConfiguration,
}

/// The blade swinging around its pivot, and how long it is simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub frame_rate: f32,
    /// seconds of swinging before the trail is frozen
    pub duration: f32,
    pub pivot: Vec3,
    /// distance between the pivot and the first anchor
    pub hilt_offset: f32,
    pub blade_length: f32,
    /// radians per second
    pub swing_speed: f32,
    /// log renderer statistics every this many frames
    pub report_every: u64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            duration: 2.0,
            pivot: Vec3(glam::vec3(0.0, 1.0, 0.0)),
            hilt_offset: 0.3,
            blade_length: 1.1,
            swing_speed: 5.0,
            report_every: 30,
        }
    }
}

impl RibbonConfiguration {
    /// Reads [`CONFIGURATION_FILE_NAME`] from `dir`, writing the defaults first when it is missing.
    pub fn load_or_create(dir: &Dir) -> Result<Self> {
        if !dir.exists(CONFIGURATION_FILE_NAME) {
            let configuration = Self::default();
            let serialized = toml::to_string(&configuration)
                .into_diagnostic()
                .wrap_err("failed to serialize default configuration")?;
            dir.write(CONFIGURATION_FILE_NAME, serialized)
                .into_diagnostic()
                .wrap_err("failed to write default configuration")?;
            info!("default configuration written to {CONFIGURATION_FILE_NAME}");
            return Ok(configuration);
        }
        let text = dir
            .read_to_string(CONFIGURATION_FILE_NAME)
            .into_diagnostic()
            .wrap_err("failed to read configuration")?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let configuration: Self = toml::from_str(text)
            .into_diagnostic()
            .wrap_err("failed to parse configuration")?;
        configuration.simulation.validate()?;
        let freeze_duration = configuration.trail.freeze_duration;
        if !freeze_duration.is_finite() || freeze_duration < 0.0 {
            return Err(miette::miette!(
                "freeze_duration must be a non negative number, got {freeze_duration}"
            ));
        }
        Ok(configuration)
    }
}

impl SimulationParameters {
    fn validate(&self) -> Result<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(miette::miette!(
                "frame_rate must be a positive number, got {}",
                self.frame_rate
            ));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(miette::miette!(
                "duration must be a non negative number, got {}",
                self.duration
            ));
        }
        if self.report_every == 0 {
            return Err(miette::miette!("report_every must be at least 1"));
        }
        Ok(())
    }

    /// frames simulated before the trail is frozen
    pub fn frame_count(&self) -> u64 {
        (self.duration * self.frame_rate).ceil() as u64
    }
}
