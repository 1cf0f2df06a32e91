use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock duration of one named detector stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings of one detection run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Record the time elapsed since `start` under `label`.
    pub fn record(&mut self, label: impl Into<String>, start: Instant) {
        self.push(label, elapsed_ms(start));
    }

    /// Elapsed time of the stage named `label`, if it was recorded.
    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Milliseconds elapsed since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_keep_insertion_order() {
        let mut timing = TimingBreakdown::with_total(3.0);
        timing.push("vote", 2.0);
        timing.record("extract", Instant::now());
        assert_eq!(timing.stages.len(), 2);
        assert_eq!(timing.stages[0].label, "vote");
        assert_eq!(timing.stage_ms("vote"), Some(2.0));
        assert!(timing.stage_ms("missing").is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let timing = TimingBreakdown::with_total(1.5);
        let json = serde_json::to_string(&timing).unwrap();
        assert!(json.contains("\"totalMs\":1.5"));
    }
}
