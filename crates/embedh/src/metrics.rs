//! Metrics collection and reporting using metrics-rs.
//!
//! Conversions record through the `metrics` facade. Without an installed
//! recorder this is a no-op; the CLI installs [`CliRecorder`] on `--metrics`
//! and prints a summary at exit.

use std::collections::HashMap;
use std::sync::Arc;

use metrics::{
    Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit, counter,
    describe_counter, describe_gauge, describe_histogram, gauge, histogram,
};
use parking_lot::RwLock;

use crate::ReadMode;

/// Initialize metric descriptions.
pub fn init() {
    describe_counter!(
        "embedh_conversions_total",
        Unit::Count,
        "Total headers written"
    );
    describe_counter!(
        "embedh_bytes_total",
        Unit::Bytes,
        "Total input bytes emitted as array entries"
    );
    describe_gauge!(
        "embedh_convert_seconds",
        Unit::Seconds,
        "Wall-clock time of the last conversion"
    );
    describe_histogram!(
        "embedh_input_bytes",
        Unit::Bytes,
        "Input size distribution"
    );
}

/// Record a finished conversion.
pub fn record_conversion(mode: ReadMode, bytes: u64, secs: f64) {
    let labels = [("mode", mode.as_str().to_string())];

    counter!("embedh_conversions_total", &labels).increment(1);
    counter!("embedh_bytes_total", &labels).increment(bytes);
    gauge!("embedh_convert_seconds", &labels).set(secs);
    #[allow(clippy::cast_precision_loss)]
    let size = bytes as f64;
    histogram!("embedh_input_bytes", &labels).record(size);
}

// ============================================================================
// CLI Recorder for terminal output
// ============================================================================

type Storage<T> = RwLock<HashMap<String, T>>;

struct CliCounter {
    key: String,
    storage: Arc<Storage<u64>>,
}

impl metrics::CounterFn for CliCounter {
    fn increment(&self, value: u64) {
        *self.storage.write().entry(self.key.clone()).or_insert(0) += value;
    }

    fn absolute(&self, value: u64) {
        self.storage.write().insert(self.key.clone(), value);
    }
}

struct CliGauge {
    key: String,
    storage: Arc<Storage<f64>>,
}

impl metrics::GaugeFn for CliGauge {
    fn increment(&self, value: f64) {
        *self.storage.write().entry(self.key.clone()).or_insert(0.0) += value;
    }

    fn decrement(&self, value: f64) {
        *self.storage.write().entry(self.key.clone()).or_insert(0.0) -= value;
    }

    fn set(&self, value: f64) {
        self.storage.write().insert(self.key.clone(), value);
    }
}

struct CliHistogram {
    key: String,
    storage: Arc<Storage<Vec<f64>>>,
}

impl metrics::HistogramFn for CliHistogram {
    fn record(&self, value: f64) {
        self.storage
            .write()
            .entry(self.key.clone())
            .or_default()
            .push(value);
    }
}

/// Recorder that keeps metrics in memory for a terminal summary.
#[derive(Default)]
pub struct CliRecorder {
    counters: Arc<Storage<u64>>,
    gauges: Arc<Storage<f64>>,
    histograms: Arc<Storage<Vec<f64>>>,
}

impl CliRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle sharing this recorder's storage.
    #[must_use]
    pub fn handle(&self) -> CliRecorderHandle {
        CliRecorderHandle {
            counters: Arc::clone(&self.counters),
            gauges: Arc::clone(&self.gauges),
            histograms: Arc::clone(&self.histograms),
        }
    }

    /// Install this recorder as the global metrics recorder.
    ///
    /// Returns `None` if a recorder is already installed.
    #[must_use]
    pub fn install(self) -> Option<CliRecorderHandle> {
        let handle = self.handle();
        metrics::set_global_recorder(self).ok()?;
        Some(handle)
    }
}

fn key_to_string(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|l| format!("{}={}", l.key(), l.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for CliRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(CliCounter {
            key: key_to_string(key),
            storage: Arc::clone(&self.counters),
        }))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::from_arc(Arc::new(CliGauge {
            key: key_to_string(key),
            storage: Arc::clone(&self.gauges),
        }))
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::from_arc(Arc::new(CliHistogram {
            key: key_to_string(key),
            storage: Arc::clone(&self.histograms),
        }))
    }
}

/// Handle for reading metrics after installing the CLI recorder.
pub struct CliRecorderHandle {
    counters: Arc<Storage<u64>>,
    gauges: Arc<Storage<f64>>,
    histograms: Arc<Storage<Vec<f64>>>,
}

impl CliRecorderHandle {
    /// Get a counter value by key.
    #[must_use]
    pub fn get_counter(&self, key: &str) -> Option<u64> {
        self.counters.read().get(key).copied()
    }

    /// Get a gauge value by key.
    #[must_use]
    pub fn get_gauge(&self, key: &str) -> Option<f64> {
        self.gauges.read().get(key).copied()
    }

    /// Print all collected metrics.
    pub fn print_summary(&self) {
        let counters = self.counters.read();
        let gauges = self.gauges.read();
        let histograms = self.histograms.read();

        if counters.is_empty() && gauges.is_empty() && histograms.is_empty() {
            println!("No metrics collected.");
            return;
        }

        println!();
        println!("## Metrics Summary");
        println!();

        if !counters.is_empty() {
            println!("### Counters");
            for (key, value) in sorted(&counters) {
                println!("  {key}: {value}");
            }
            println!();
        }

        if !gauges.is_empty() {
            println!("### Gauges");
            for (key, value) in sorted(&gauges) {
                println!("  {key}: {value:.6}");
            }
            println!();
        }

        if !histograms.is_empty() {
            println!("### Histograms");
            for (key, values) in sorted(&histograms) {
                if values.is_empty() {
                    continue;
                }
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                #[allow(clippy::cast_precision_loss)]
                let avg = values.iter().sum::<f64>() / values.len() as f64;
                println!(
                    "  {key}: count={}, min={min:.0}, max={max:.0}, avg={avg:.1}",
                    values.len()
                );
            }
            println!();
        }
    }
}

fn sorted<T>(map: &HashMap<String, T>) -> Vec<(&String, &T)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}
