// Telemetry data domain models
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;

/// Number of samples held by the rolling window.
pub const WINDOW_LEN: usize = 25;

/// One timestamped energy reading.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: String,
    pub usage_kw: f64,
    pub cost: f64,
    pub voltage: f64,
    pub current: f64,
    #[serde(skip)]
    pub recorded_at: DateTime<Local>,
}

impl Sample {
    pub fn new(
        recorded_at: DateTime<Local>,
        usage_kw: f64,
        cost: f64,
        voltage: f64,
        current: f64,
    ) -> Self {
        Self {
            timestamp: format_timestamp(&recorded_at),
            usage_kw,
            cost,
            voltage,
            current,
            recorded_at,
        }
    }
}

/// Display format used on the chart axis, e.g. "14:05"
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// Fixed-capacity FIFO of the most recent samples, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Window {
    samples: VecDeque<Sample>,
    generation: u64,
}

impl Window {
    pub fn seeded(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut window = Self {
            samples: VecDeque::with_capacity(WINDOW_LEN),
            generation: 0,
        };
        for sample in samples {
            window.evict_and_append(sample);
        }
        window
    }

    /// Evicts the oldest sample once full, then appends. Counts as one tick.
    pub fn push(&mut self, sample: Sample) {
        self.evict_and_append(sample);
        self.generation += 1;
    }

    fn evict_and_append(&mut self, sample: Sample) {
        if self.samples.len() >= WINDOW_LEN {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Ticks applied since seeding
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// The last `count` samples (or all of them when shorter), oldest first.
    pub fn recent(&self, count: usize) -> Vec<Sample> {
        let skip = self.samples.len().saturating_sub(count);
        self.samples.iter().skip(skip).cloned().collect()
    }

    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    pub fn summary(&self) -> WindowSummary {
        WindowSummary::from_window(self)
    }
}

/// Headline figures for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub live_usage_kw: f64,
    pub average_usage_kw: f64,
    pub peak_usage_kw: f64,
    pub total_cost: f64,
    pub average_voltage: f64,
    pub sample_count: usize,
}

impl WindowSummary {
    fn from_window(window: &Window) -> Self {
        let count = window.len();
        if count == 0 {
            return Self {
                live_usage_kw: 0.0,
                average_usage_kw: 0.0,
                peak_usage_kw: 0.0,
                total_cost: 0.0,
                average_voltage: 0.0,
                sample_count: 0,
            };
        }

        let total_usage: f64 = window.samples().map(|s| s.usage_kw).sum();
        let total_voltage: f64 = window.samples().map(|s| s.voltage).sum();
        let peak_usage_kw = window
            .samples()
            .map(|s| s.usage_kw)
            .fold(f64::MIN, f64::max);

        Self {
            live_usage_kw: window.latest().map(|s| s.usage_kw).unwrap_or_default(),
            average_usage_kw: total_usage / count as f64,
            peak_usage_kw,
            total_cost: window.samples().map(|s| s.cost).sum(),
            average_voltage: total_voltage / count as f64,
            sample_count: count,
        }
    }
}

/// A sample paired with a synthetic forecast value for the predictive chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    #[serde(flatten)]
    pub sample: Sample,
    pub predicted_kw: f64,
}
