#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use thiserror::Error;

/// reasons a `MeterConfig` can be refused
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("band count must be at least 1")]
    NoBands,

    #[error("a single band leaves no room for the enhancement ramp, at least 2 bands are needed")]
    SingleBand,

    #[error("resolution must be greater than 0")]
    ZeroResolution,

    #[error("resolution must be a power of two, got {0}")]
    ResolutionNotPowerOfTwo(usize),

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    #[error("max enhance must be positive and finite, got {0}")]
    InvalidMaxEnhance(f32),

    #[error("update interval must be positive and finite, got {0} seconds")]
    InvalidUpdateInterval(f32),

    #[error("max frequency must be positive and finite, got {0}")]
    InvalidMaxFrequency(f32),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeterConfig {
    /// number of bands handed to the callback, 2 to 20 is a sensible range for a visualizer
    pub band_count: usize,

    /// number of magnitude bins in every spectrum frame
    ///
    /// higher values cost more but give a cleaner split, must be a power of two
    pub resolution: usize,

    /// spacing of the bins is `sample_rate / resolution`
    pub sample_rate: f32,

    /// weight of the highest band, lower bands get linearly less so that the
    /// usually quieter high frequencies are not drowned by the bass
    pub max_enhance: f32,

    /// seconds between two deliveries
    pub update_interval: f32,

    /// upper end of the range split into bands, `None` uses `sample_rate`
    pub max_frequency: Option<f32>,
}
impl Default for MeterConfig {
    fn default() -> Self {
        MeterConfig {
            band_count: 10,
            resolution: 256,
            sample_rate: 44_100.0,
            max_enhance: 100.0,
            update_interval: 0.05,
            max_frequency: None,
        }
    }
}

impl MeterConfig {
    /// default config with `band_count` bands
    pub fn new(band_count: usize) -> Self {
        MeterConfig {
            band_count,
            ..Default::default()
        }
    }

    /// frequency range that gets split into `band_count` equally wide bands
    pub fn band_span(&self) -> f32 {
        self.max_frequency.unwrap_or(self.sample_rate)
    }

    /// distance in hz between two neighbouring bins
    pub fn bin_width(&self) -> f32 {
        self.sample_rate / self.resolution as f32
    }

    /// checks everything the band table needs
    ///
    /// a single band is fine here, it only breaks the enhancement
    pub fn validate_table(&self) -> Result<(), ConfigError> {
        if self.band_count == 0 {
            return Err(ConfigError::NoBands);
        }
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if !self.resolution.is_power_of_two() {
            return Err(ConfigError::ResolutionNotPowerOfTwo(self.resolution));
        }
        if !is_positive(self.sample_rate) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if let Some(max_frequency) = self.max_frequency {
            if !is_positive(max_frequency) {
                return Err(ConfigError::InvalidMaxFrequency(max_frequency));
            }
        }
        Ok(())
    }

    /// checks the whole config, a `Sampler` is never built from a config failing this
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_table()?;
        if self.band_count == 1 {
            return Err(ConfigError::SingleBand);
        }
        if !is_positive(self.max_enhance) {
            return Err(ConfigError::InvalidMaxEnhance(self.max_enhance));
        }
        if !is_positive(self.update_interval) {
            return Err(ConfigError::InvalidUpdateInterval(self.update_interval));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
