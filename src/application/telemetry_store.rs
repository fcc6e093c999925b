// Telemetry store - seeds and advances the rolling window
use crate::application::sample_generator::SampleGenerator;
use crate::domain::telemetry::{ForecastPoint, WINDOW_LEN, Window};
use chrono::{DateTime, Duration, Local};

#[derive(Debug)]
pub struct TelemetryStore {
    generator: SampleGenerator,
}

impl TelemetryStore {
    pub fn new(generator: SampleGenerator) -> Self {
        Self { generator }
    }

    /// Seed a full window of hourly history ending now
    pub fn initialize(&mut self) -> Window {
        self.initialize_at(Local::now())
    }

    pub fn initialize_at(&mut self, now: DateTime<Local>) -> Window {
        let generator = &mut self.generator;
        Window::seeded(
            (0..WINDOW_LEN as i64)
                .rev()
                .map(|hours_back| generator.sample_at(now - Duration::hours(hours_back))),
        )
    }

    /// Drop the oldest sample and append one stamped now
    pub fn tick(&mut self, window: &mut Window) {
        window.push(self.generator.next_sample());
    }

    pub fn forecast(&mut self, window: &Window) -> Vec<ForecastPoint> {
        self.generator.forecast(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TelemetryStore {
        TelemetryStore::new(SampleGenerator::with_seed(7))
    }

    #[test]
    fn test_initialize_seeds_hourly_history_ending_now() {
        let now = Local::now();
        let window = store().initialize_at(now);

        assert_eq!(window.len(), WINDOW_LEN);
        assert_eq!(window.generation(), 0);
        assert_eq!(window.latest().unwrap().recorded_at, now);

        let instants: Vec<_> = window.samples().map(|s| s.recorded_at).collect();
        for pair in instants.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::hours(1));
        }
        assert_eq!(instants[0], now - Duration::hours(24));
    }

    #[test]
    fn test_tick_preserves_length() {
        let mut store = store();
        let mut window = store.initialize();

        for _ in 0..60 {
            store.tick(&mut window);
            assert_eq!(window.len(), WINDOW_LEN);
        }
        assert_eq!(window.generation(), 60);
    }

    #[test]
    fn test_tick_evicts_oldest_and_appends_now() {
        let mut store = store();
        let start = Local::now();
        let mut window = store.initialize_at(start);
        let second_oldest = window.samples().nth(1).unwrap().recorded_at;

        store.tick(&mut window);

        assert_eq!(window.samples().next().unwrap().recorded_at, second_oldest);
        assert!(window.latest().unwrap().recorded_at >= start);
    }
}
