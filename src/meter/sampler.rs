//! # How it works
//! ```text
//!     ┌──────────────────────────┐
//!     │  caller ticking once per │
//!     │  frame with delta time   │
//!     └──────────────────────────┘
//!           |
//!           | advance(delta, is_playing, provider)
//!           ↓
//! ┌───────────────────┐  due?  ┌─────────────┐
//! │      Sampler      │ -----> |  provider   |  fills `resolution` magnitudes
//! |  elapsed counter  │ <----- |             |
//! └───────────────────┘        └─────────────┘
//!           |
//!           | BandTable::aggregate -> Enhancer::enhance
//!           ↓
//!     ┌─────────────────────────┐
//!     │  on_update(&[f32])      │
//!     └─────────────────────────┘
//! ```

use std::fmt;

use super::config::{ConfigError, MeterConfig};
use super::processor::Enhancer;
use super::table::BandTable;

/// receives the enhanced band values, the slice is only valid for the duration of the call
pub type UpdateCallback = Box<dyn FnMut(&[f32])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// nothing is sampled, ticks are ignored
    Idle,
    /// ticks accumulate time and deliver bands whenever `update_interval` is exceeded
    Sampling,
}

/// samples spectrum frames on a fixed cadence and delivers enhanced bands
///
/// runs entirely on the thread calling `advance()`, there is no background work
pub struct Sampler {
    config: MeterConfig,
    table: BandTable,
    enhancer: Enhancer,
    state: State,
    elapsed: f32,
    spectrum: Vec<f32>,
    on_update: Option<UpdateCallback>,
}

impl Sampler {
    pub fn new(config: MeterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = BandTable::build(&config)?;
        let enhancer = Enhancer::new(config.band_count, config.max_enhance)?;
        let spectrum = vec![0.0; config.resolution];

        Ok(Self {
            config,
            table,
            enhancer,
            state: State::Idle,
            elapsed: 0.0,
            spectrum,
            on_update: None,
        })
    }

    /// registers `on_update` and begins sampling
    ///
    /// calling it again while sampling replaces the callback and keeps the elapsed time
    pub fn start<F>(&mut self, on_update: F)
    where
        F: FnMut(&[f32]) + 'static,
    {
        self.on_update = Some(Box::new(on_update));
        if self.state == State::Idle {
            log::debug!(
                "sampler started, delivering every {} s",
                self.config.update_interval
            );
            self.elapsed = 0.0;
            self.state = State::Sampling;
        }
    }

    /// stops sampling and drops the callback
    pub fn stop(&mut self) {
        if self.state == State::Sampling {
            log::debug!("sampler stopped");
        }
        self.state = State::Idle;
        self.elapsed = 0.0;
        self.on_update = None;
    }

    /// feeds `delta` seconds of elapsed time
    ///
    /// time also accumulates while `is_playing` is false, but only a playing tick delivers:
    /// once more than `update_interval` has passed the counter is reset, `provider` fills one
    /// spectrum frame and the enhanced bands are handed to the callback.
    /// At most one delivery happens per call, no matter how large `delta` is.
    ///
    /// returns whether the callback was invoked
    pub fn advance<P>(&mut self, delta: f32, is_playing: bool, provider: P) -> bool
    where
        P: FnOnce(&mut [f32]),
    {
        if self.state == State::Idle {
            return false;
        }
        if !(delta.is_finite() && delta >= 0.0) {
            log::warn!("ignoring invalid tick of {} s", delta);
            return false;
        }

        // time keeps running while paused, a resumed source is sampled on its first tick
        self.elapsed += delta;
        if !is_playing || self.elapsed <= self.config.update_interval {
            return false;
        }
        self.elapsed = 0.0;

        self.spectrum.fill(0.0);
        provider(self.spectrum.as_mut_slice());

        let values = self.process(&self.spectrum);
        log::trace!("delivering {} bands", values.len());

        match self.on_update.as_mut() {
            Some(on_update) => {
                on_update(&values);
                true
            }
            None => false,
        }
    }

    /// aggregates and enhances a single frame without touching the cadence
    pub fn process(&self, spectrum: &[f32]) -> Vec<f32> {
        let mut values = self.table.aggregate(spectrum);
        self.enhancer.enhance_in_place(&mut values);
        values
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// seconds accumulated since the last delivery
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn table(&self) -> &BandTable {
        &self.table
    }

    pub fn enhancer(&self) -> &Enhancer {
        &self.enhancer
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .field("has_callback", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<Vec<f32>>>>, impl FnMut(&[f32]) + 'static) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        (received, move |values: &[f32]| sink.borrow_mut().push(values.to_vec()))
    }

    fn small_sampler() -> Sampler {
        Sampler::new(MeterConfig {
            band_count: 2,
            resolution: 4,
            sample_rate: 8.0,
            max_enhance: 10.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_idle() {
        let sampler = small_sampler();
        assert_eq!(sampler.state(), State::Idle);
        assert_eq!(sampler.elapsed(), 0.0);
    }

    #[test]
    fn single_band_is_rejected() {
        assert_eq!(
            Sampler::new(MeterConfig::new(1)).unwrap_err(),
            ConfigError::SingleBand
        );
    }

    #[test]
    fn fires_once_interval_is_exceeded() {
        let mut sampler = small_sampler();
        let (received, on_update) = recorder();
        sampler.start(on_update);

        let ones = |s: &mut [f32]| s.iter_mut().for_each(|v| *v = 1.0);
        assert!(!sampler.advance(0.02, true, ones));
        assert!(!sampler.advance(0.02, true, ones));
        assert!(sampler.advance(0.02, true, ones));

        assert_eq!(sampler.elapsed(), 0.0);
        assert_eq!(*received.borrow(), vec![vec![10.0, 20.0]]);
    }

    #[test]
    fn exact_interval_does_not_fire() {
        let mut sampler = small_sampler();
        let (received, on_update) = recorder();
        sampler.start(on_update);

        assert!(!sampler.advance(0.05, true, |_| ()));
        assert_relative_eq!(sampler.elapsed(), 0.05);
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn no_catch_up_on_long_ticks() {
        let mut sampler = small_sampler();
        let (received, on_update) = recorder();
        sampler.start(on_update);

        assert!(sampler.advance(1.0, true, |_| ()));
        assert_eq!(received.borrow().len(), 1);
        assert_eq!(sampler.elapsed(), 0.0);
    }

    #[test]
    fn idle_ticks_are_ignored() {
        let mut sampler = small_sampler();
        assert!(!sampler.advance(1.0, true, |_| panic!("idle sampler asked for a frame")));
        assert_eq!(sampler.elapsed(), 0.0);
    }

    #[test]
    fn paused_ticks_count_time_without_delivering() {
        let mut sampler = small_sampler();
        let (received, on_update) = recorder();
        sampler.start(on_update);

        assert!(!sampler.advance(1.0, false, |_| panic!("paused sampler asked for a frame")));
        assert_relative_eq!(sampler.elapsed(), 1.0);
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn resumed_playback_delivers_on_first_tick() {
        let mut sampler = small_sampler();
        let (received, on_update) = recorder();
        sampler.start(on_update);

        assert!(!sampler.advance(0.03, false, |_| ()));
        assert!(!sampler.advance(0.03, false, |_| ()));
        assert!(sampler.advance(0.001, true, |_| ()));
        assert_eq!(sampler.elapsed(), 0.0);
        assert_eq!(received.borrow().len(), 1);
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut sampler = small_sampler();
        let (received, on_update) = recorder();
        sampler.start(on_update);
        sampler.advance(0.03, true, |_| ());
        sampler.stop();

        assert_eq!(sampler.state(), State::Idle);
        assert_eq!(sampler.elapsed(), 0.0);
        assert!(!sampler.advance(1.0, true, |_| ()));
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut sampler = small_sampler();
        sampler.start(|_| ());
        assert!(!sampler.advance(f32::NAN, true, |_| ()));
        assert!(!sampler.advance(-1.0, true, |_| ()));
        assert_eq!(sampler.elapsed(), 0.0);
    }

    #[test]
    fn provider_gets_a_cleared_frame() {
        let mut sampler = small_sampler();
        sampler.start(|_| ());
        sampler.advance(1.0, true, |s| s.iter_mut().for_each(|v| *v = 5.0));
        sampler.advance(1.0, true, |s| {
            assert_eq!(s.len(), 4);
            assert!(s.iter().all(|v| *v == 0.0));
        });
    }

    #[test]
    fn process_matches_scenario() {
        let sampler = small_sampler();
        assert_eq!(sampler.process(&[1.0, 1.0, 1.0, 1.0]), vec![10.0, 20.0]);
    }
}
