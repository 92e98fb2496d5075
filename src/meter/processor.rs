//! turns one spectrum frame into band values
//!
//! `aggregate` is the straightforward reference form, `BandTable::aggregate` does the same
//! with the band of every bin looked up ahead of time and is what the `Sampler` uses.

use super::config::ConfigError;
use super::table::BandBoundary;

/// sums every magnitude of `spectrum` into the band strictly containing the frequency of its bin
///
/// bins exactly on a boundary or above the last band contribute nothing,
/// bands without any bin stay at `0.0`
pub fn aggregate(spectrum: &[f32], bins: &[f32], bands: &[BandBoundary]) -> Vec<f32> {
    let mut values: Vec<f32> = vec![0.0; bands.len()];
    for (freq, magnitude) in bins.iter().zip(spectrum.iter()) {
        for (i, band) in bands.iter().enumerate() {
            if band.contains(*freq) {
                values[i] += *magnitude;
                break;
            }
        }
    }
    values
}

/// multiplies raw band values with a linear ramp so higher bands get more weight
///
/// band `i` is scaled by `max_enhance / (band_count - 1) * (i + 1)`
#[derive(Debug, Clone, PartialEq)]
pub struct Enhancer {
    delta_enhance: f32,
    weights: Vec<f32>,
}

impl Enhancer {
    pub fn new(band_count: usize, max_enhance: f32) -> Result<Self, ConfigError> {
        match band_count {
            0 => return Err(ConfigError::NoBands),
            1 => return Err(ConfigError::SingleBand),
            _ => (),
        }
        if !(max_enhance.is_finite() && max_enhance > 0.0) {
            return Err(ConfigError::InvalidMaxEnhance(max_enhance));
        }

        let delta_enhance = max_enhance / (band_count - 1) as f32;
        let weights = (0..band_count)
            .map(|i| delta_enhance * (i + 1) as f32)
            .collect();

        Ok(Enhancer {
            delta_enhance,
            weights,
        })
    }

    /// weight step between two neighbouring bands
    pub fn delta_enhance(&self) -> f32 {
        self.delta_enhance
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn enhance(&self, raw: &[f32]) -> Vec<f32> {
        let mut values = raw.to_vec();
        self.enhance_in_place(&mut values);
        values
    }

    /// values past `band_count` are left untouched
    pub fn enhance_in_place(&self, values: &mut [f32]) {
        for (value, weight) in values.iter_mut().zip(self.weights.iter()) {
            *value *= *weight;
        }
    }
}

/// one-off form of `Enhancer::enhance`
pub fn enhance(
    raw: &[f32],
    band_count: usize,
    max_enhance: f32,
) -> Result<Vec<f32>, ConfigError> {
    Ok(Enhancer::new(band_count, max_enhance)?.enhance(raw))
}
