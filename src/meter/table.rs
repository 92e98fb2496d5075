#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::{ConfigError, MeterConfig};

/// frequency range of a single band in hz
///
/// both ends are exclusive, a bin sitting exactly on `from` or `to` belongs to no band
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BandBoundary {
    pub from: f32,
    pub to: f32,
}
impl BandBoundary {
    pub fn contains(&self, freq: f32) -> bool {
        self.from < freq && freq < self.to
    }

    pub fn width(&self) -> f32 {
        self.to - self.from
    }
}

/// everything that can be derived from a `MeterConfig` once and reused for every frame
///
/// ```text
///  bins   |  2  |  4  |  6  |  8  |        (sample_rate / resolution) * (i + 1)
///  bands  ( 0      4 )( 4      8 )         delta_hz = span / band_count
///  assign    0     -     1     -           bins on a boundary are dropped
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    delta_hz: f32,
    bins: Vec<f32>,
    bands: Vec<BandBoundary>,
    assignments: Vec<Option<usize>>,
}

impl BandTable {
    pub fn build(config: &MeterConfig) -> Result<Self, ConfigError> {
        config.validate_table()?;

        let bin_width = config.bin_width();
        let bins: Vec<f32> = (0..config.resolution)
            .map(|i| bin_width * (i + 1) as f32)
            .collect();

        let delta_hz = config.band_span() / config.band_count as f32;
        let bands: Vec<BandBoundary> = (0..config.band_count)
            .map(|i| BandBoundary {
                from: delta_hz * i as f32,
                to: delta_hz * (i + 1) as f32,
            })
            .collect();

        let assignments: Vec<Option<usize>> =
            bins.iter().map(|freq| locate(&bands, *freq)).collect();

        log::debug!(
            "built band table: {} bins of {} hz into {} bands of {} hz, {} bins unassigned",
            bins.len(),
            bin_width,
            bands.len(),
            delta_hz,
            assignments.iter().filter(|a| a.is_none()).count()
        );

        Ok(BandTable {
            delta_hz,
            bins,
            bands,
            assignments,
        })
    }

    /// width of every band in hz
    pub fn delta_hz(&self) -> f32 {
        self.delta_hz
    }

    /// center frequency of every bin, one per spectrum value
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    pub fn bands(&self) -> &[BandBoundary] {
        &self.bands
    }

    /// target band of every bin, `None` for bins on a boundary or above the last band
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn resolution(&self) -> usize {
        self.bins.len()
    }

    /// sums up `spectrum` per band using the precomputed assignments
    ///
    /// values past `resolution` are ignored, missing ones count as silence
    pub fn aggregate(&self, spectrum: &[f32]) -> Vec<f32> {
        let mut values: Vec<f32> = vec![0.0; self.bands.len()];
        for (assignment, magnitude) in self.assignments.iter().zip(spectrum.iter()) {
            if let Some(band) = assignment {
                values[*band] += *magnitude;
            }
        }
        values
    }
}

/// finds the only band strictly containing `freq`
///
/// bands are contiguous and sorted, so the first band ending above `freq` is the only candidate
fn locate(bands: &[BandBoundary], freq: f32) -> Option<usize> {
    let candidate = bands.partition_point(|band| band.to <= freq);
    match bands.get(candidate) {
        Some(band) if band.contains(freq) => Some(candidate),
        _ => None,
    }
}
