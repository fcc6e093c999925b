// Synthetic telemetry source
use crate::domain::telemetry::{ForecastPoint, Sample, Window};
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces one synthetic energy reading per call.
#[derive(Debug)]
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A reading stamped with the current wall-clock time
    pub fn next_sample(&mut self) -> Sample {
        self.sample_at(Local::now())
    }

    pub fn sample_at(&mut self, at: DateTime<Local>) -> Sample {
        // Usage and cost are whole numbers on the dashboard
        let usage_kw = self.rng.gen_range(400.0..600.0_f64).floor();
        let cost = self.rng.gen_range(50.0..75.0_f64).floor();
        let voltage = self.rng.gen_range(230.0..235.0);
        let current = self.rng.gen_range(1.8..2.2);

        Sample::new(at, usage_kw, cost, voltage, current)
    }

    /// Pairs every sample with a predicted value within ±20 kW of the actual usage.
    pub fn forecast(&mut self, window: &Window) -> Vec<ForecastPoint> {
        window
            .samples()
            .map(|sample| ForecastPoint {
                sample: sample.clone(),
                predicted_kw: sample.usage_kw + self.rng.gen_range(-20.0..20.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_range() {
        let mut generator = SampleGenerator::with_seed(42);

        for _ in 0..1_000 {
            let sample = generator.next_sample();
            assert!((400.0..600.0).contains(&sample.usage_kw));
            assert_eq!(sample.usage_kw.fract(), 0.0);
            assert!((50.0..75.0).contains(&sample.cost));
            assert!((230.0..235.0).contains(&sample.voltage));
            assert!((1.8..2.2).contains(&sample.current));
        }
    }

    #[test]
    fn test_sample_is_stamped_with_given_time() {
        let mut generator = SampleGenerator::with_seed(1);
        let at = Local::now();
        let sample = generator.sample_at(at);

        assert_eq!(sample.recorded_at, at);
        assert_eq!(sample.timestamp, at.format("%H:%M").to_string());
    }

    #[test]
    fn test_same_seed_same_readings() {
        let at = Local::now();
        let a = SampleGenerator::with_seed(9).sample_at(at);
        let b = SampleGenerator::with_seed(9).sample_at(at);
        assert_eq!(a.usage_kw, b.usage_kw);
        assert_eq!(a.voltage, b.voltage);
    }

    #[test]
    fn test_forecast_tracks_actual_usage() {
        let mut generator = SampleGenerator::with_seed(3);
        let window = Window::seeded((0..5).map(|_| generator.next_sample()));

        let forecast = generator.forecast(&window);
        assert_eq!(forecast.len(), 5);
        for point in forecast {
            assert!((point.predicted_kw - point.sample.usage_kw).abs() <= 20.0);
        }
    }
}
