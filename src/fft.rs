use std::sync::Arc;

pub use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner, Length};

use crate::meter::{SpectrumSource, Transport};

/// magnitude spectrum of the newest `2 * resolution` samples
///
/// no window is applied, short input is padded with silence and every
/// magnitude is divided by the transform length
pub fn magnitudes(samples: &[f32], resolution: usize) -> Vec<f32> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(resolution * 2);

    let mut buffer: Vec<Complex<f32>> = Vec::with_capacity(resolution * 2);
    let mut spectrum: Vec<f32> = vec![0.0; resolution];
    transform(fft.as_ref(), samples, &mut buffer, &mut spectrum);

    spectrum
}

fn transform(
    fft: &dyn Fft<f32>,
    samples: &[f32],
    buffer: &mut Vec<Complex<f32>>,
    spectrum: &mut [f32],
) {
    let len = fft.len();
    let newest = &samples[samples.len().saturating_sub(len)..];

    buffer.clear();
    buffer.extend(newest.iter().map(|x| Complex { re: *x, im: 0.0 }));
    buffer.resize(len, Complex { re: 0.0, im: 0.0 });

    fft.process(&mut buffer[..]);

    // only the lower half, the rest mirrors it
    let scale = 1.0 / len as f32;
    for (value, bin) in spectrum.iter_mut().zip(buffer.iter().take(len / 2)) {
        *value = bin.norm() * scale;
    }
}

/// `SpectrumSource` over mono samples pushed in by the caller
///
/// keeps only as many samples as one transform needs
pub struct SampleSpectrum {
    fft: Arc<dyn Fft<f32>>,
    samples: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    playing: bool,
}

impl SampleSpectrum {
    /// `resolution` has to match the `MeterConfig` of the meter it is used with
    pub fn new(resolution: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(resolution * 2);
        Self {
            fft,
            samples: Vec::with_capacity(resolution * 2),
            buffer: Vec::with_capacity(resolution * 2),
            playing: false,
        }
    }

    pub fn push(&mut self, data: &[f32]) {
        self.samples.extend_from_slice(data);

        // drops samples that can no longer end up in a transform
        let len = self.fft.len();
        if self.samples.len() > len {
            let diff = self.samples.len() - len;
            self.samples.drain(..diff);
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl Transport for SampleSpectrum {
    fn play(&mut self) {
        if self.samples.is_empty() {
            log::warn!("playing a sample source without any audio loaded");
        }
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

impl SpectrumSource for SampleSpectrum {
    fn fill_spectrum(&mut self, spectrum: &mut [f32]) {
        transform(self.fft.as_ref(), &self.samples, &mut self.buffer, spectrum);
    }
}
