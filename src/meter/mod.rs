/// `MeterConfig` and its validation
pub mod config;

/// bin frequencies, band boundaries and the bin to band mapping
pub mod table;

/// aggregation of spectrum frames into bands and the high frequency enhancement
pub mod processor;

/// cadence driven delivery of enhanced bands
pub mod sampler;

pub use config::{ConfigError, MeterConfig};
pub use processor::{aggregate, enhance, Enhancer};
pub use sampler::{Sampler, State, UpdateCallback};
pub use table::{BandBoundary, BandTable};

/// playback side of an audio source
pub trait Transport {
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// audio source that can hand out its current magnitude spectrum
pub trait SpectrumSource: Transport {
    /// writes one magnitude per bin into `spectrum`, which is zeroed beforehand
    fn fill_spectrum(&mut self, spectrum: &mut [f32]);
}

/// `Sampler` bundled with the source it samples from
///
/// ```text
///  start() ──> source.play()       stop() ──> source.stop()
///  advance(delta) ──> sampler.advance(delta, source.is_playing(), source.fill_spectrum)
/// ```
#[derive(Debug)]
pub struct Meter<S> {
    sampler: Sampler,
    source: S,
}

impl<S: SpectrumSource> Meter<S> {
    pub fn new(config: MeterConfig, source: S) -> Result<Self, ConfigError> {
        Ok(Self {
            sampler: Sampler::new(config)?,
            source,
        })
    }

    /// starts playback and delivers bands to `on_update` from now on
    pub fn start<F>(&mut self, on_update: F)
    where
        F: FnMut(&[f32]) + 'static,
    {
        self.sampler.start(on_update);
        self.source.play();
    }

    /// halts playback, the callback will not be called again
    pub fn stop(&mut self) {
        self.source.stop();
        self.sampler.stop();
    }

    /// returns whether bands were delivered during this tick
    pub fn advance(&mut self, delta: f32) -> bool {
        let is_playing = self.source.is_playing();
        let source = &mut self.source;
        self.sampler
            .advance(delta, is_playing, |spectrum| source.fill_spectrum(spectrum))
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Flat {
        playing: bool,
        level: f32,
        frames: usize,
    }
    impl Transport for Flat {
        fn play(&mut self) {
            self.playing = true;
        }
        fn stop(&mut self) {
            self.playing = false;
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
    }
    impl SpectrumSource for Flat {
        fn fill_spectrum(&mut self, spectrum: &mut [f32]) {
            self.frames += 1;
            spectrum.iter_mut().for_each(|v| *v = self.level);
        }
    }

    fn meter() -> Meter<Flat> {
        let config = MeterConfig {
            band_count: 2,
            resolution: 4,
            sample_rate: 8.0,
            max_enhance: 1.0,
            update_interval: 0.1,
            ..Default::default()
        };
        let source = Flat {
            level: 2.0,
            ..Default::default()
        };
        Meter::new(config, source).unwrap()
    }

    #[test]
    fn start_plays_source_and_delivers() {
        let mut meter = meter();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        meter.start(move |values| sink.borrow_mut().push(values.to_vec()));

        assert!(meter.source().is_playing());
        assert!(!meter.advance(0.06));
        assert!(meter.advance(0.06));
        assert_eq!(meter.source().frames, 1);
        assert_eq!(*received.borrow(), vec![vec![2.0, 4.0]]);
    }

    #[test]
    fn stop_halts_source() {
        let mut meter = meter();
        meter.start(|_| ());
        meter.stop();

        assert!(!meter.source().is_playing());
        assert_eq!(meter.sampler().state(), State::Idle);
        assert!(!meter.advance(1.0));
        assert_eq!(meter.source().frames, 0);
    }

    #[test]
    fn paused_source_is_sampled_once_resumed() {
        let mut meter = meter();
        meter.start(|_| ());
        meter.source_mut().playing = false;

        assert!(!meter.advance(1.0));
        assert_eq!(meter.source().frames, 0);

        meter.source_mut().playing = true;
        assert!(meter.advance(0.0));
        assert_eq!(meter.into_source().frames, 1);
    }
}
