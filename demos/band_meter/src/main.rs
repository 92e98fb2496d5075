use bandmeter::fft::SampleSpectrum;
use bandmeter::meter::{Meter, MeterConfig};

use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 44_100.0;
const FPS: f32 = 60.0;

fn main() {
    env_logger::init();

    let config = MeterConfig {
        band_count: 12,
        sample_rate: SAMPLE_RATE,
        ..Default::default()
    };
    let source = SampleSpectrum::new(config.resolution);

    let mut meter = match Meter::new(config, source) {
        Ok(meter) => meter,
        Err(e) => {
            log::error!("invalid meter config: {}", e);
            return;
        }
    };

    meter.start(|bands| {
        let line: Vec<String> = bands
            .iter()
            .map(|v| "#".repeat((*v * 0.1).min(20.0) as usize))
            .map(|bar| format!("{:<20}", bar))
            .collect();
        println!("|{}|", line.join("|"));
    });

    // a low and a high tone, the high one slowly fading in
    let samples_per_tick = (SAMPLE_RATE / FPS) as usize;
    let mut t: usize = 0;
    for tick in 0..(FPS as usize * 3) {
        let fade = tick as f32 / (FPS * 3.0);
        let data: Vec<f32> = (t..t + samples_per_tick)
            .map(|i| {
                let time = i as f32 / SAMPLE_RATE;
                let low = 0.6 * (2.0 * PI * 220.0 * time).sin();
                let high = 0.4 * fade * (2.0 * PI * 5_000.0 * time).sin();
                low + high
            })
            .collect();
        t += samples_per_tick;

        meter.source_mut().push(&data);
        meter.advance(1.0 / FPS);
    }

    meter.stop();
}
