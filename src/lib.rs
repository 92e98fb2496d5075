//! Bandmeter collapses a linear magnitude spectrum into a handful of bands to drive an equalizer
//!
//! The frequency range is split into equally wide bands, every spectrum bin is summed into
//! the band containing its frequency and the sums are weighted with a linear ramp,
//! so that the usually quieter high frequencies stay visible next to the bass.
//!
//! Nothing runs in the background, the caller ticks the meter once per frame
//! and receives new bands every `update_interval` seconds.
//!
//!# Code Example with the fft source
//!```rs
//!use bandmeter::fft::SampleSpectrum;
//!use bandmeter::meter::{Meter, MeterConfig};
//!
//!fn main() {
//!    let config = MeterConfig::new(10);
//!    let mut source = SampleSpectrum::new(config.resolution);
//!    source.push(&[0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5]);
//!
//!    let mut meter = Meter::new(config, source).unwrap();
//!    meter.start(|bands| println!("{:?}", bands));
//!
//!    loop {
//!        // feed new samples with `meter.source_mut().push(..)`
//!        meter.advance(1.0 / 60.0);
//!    }
//!}
//!```

/// band table, aggregation, enhancement and the sampling cadence
pub mod meter;

/// magnitude spectra of raw samples using rustfft
#[cfg(feature = "fft")]
pub mod fft;
