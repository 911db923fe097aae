use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding window over which note starts contribute to the feel signal.
pub const FEEL_WINDOW: Duration = Duration::from_millis(4000);

/// Cadence at which hosts should poll the aggregator between note starts.
pub const FEEL_TICK: Duration = Duration::from_millis(60);

/// Multiplier applied to the per-second weighted rate of each band.
pub const RATE_GAIN: f32 = 2.5;

/// Minimum per-band change before a new snapshot is published.
pub const PUBLISH_EPSILON: f32 = 0.01;

/// Pitch bands in absolute semitone numbers (C4 = 60). Ranges overlap, so a
/// single note may feed more than one band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeelBand {
    Low,
    Mid,
    High,
}

impl FeelBand {
    pub const ALL: [FeelBand; 3] = [FeelBand::Low, FeelBand::Mid, FeelBand::High];

    pub fn range(self) -> (i32, i32) {
        match self {
            FeelBand::Low => (21, 60),
            FeelBand::Mid => (36, 84),
            FeelBand::High => (64, 108),
        }
    }

    /// Contribution of a note start at `semitone`, or None outside the band.
    /// Low notes weigh heavier toward the bottom, high notes toward the top.
    pub fn weight(self, semitone: i32) -> Option<f32> {
        let (low, high) = self.range();
        if semitone < low || semitone > high {
            return None;
        }
        let t = (semitone - low) as f32 / (high - low) as f32;
        Some(match self {
            FeelBand::Low => 1.5 + t * (0.5 - 1.5),
            FeelBand::Mid => 1.0,
            FeelBand::High => 0.5 + t * (1.5 - 0.5),
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    at: Instant,
    weight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayFeel {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl PlayFeel {
    fn band(&self, band: FeelBand) -> f32 {
        match band {
            FeelBand::Low => self.low,
            FeelBand::Mid => self.mid,
            FeelBand::High => self.high,
        }
    }
}

/// Windowed rate estimator over recent note starts. All reads take an
/// explicit `Instant` so decay is a pure function of the injected clock.
pub struct FeelAggregator {
    window: Duration,
    bands: [VecDeque<Sample>; 3],
    published: PlayFeel,
}

impl FeelAggregator {
    pub fn new() -> Self {
        Self::with_window(FEEL_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            bands: [VecDeque::new(), VecDeque::new(), VecDeque::new()],
            published: PlayFeel::default(),
        }
    }

    pub fn note_started(&mut self, semitone: i32, at: Instant) {
        for (slot, band) in self.bands.iter_mut().zip(FeelBand::ALL) {
            if let Some(weight) = band.weight(semitone) {
                slot.push_back(Sample { at, weight });
            }
        }
    }

    /// Current per-band rates: summed in-window weight per second, scaled.
    pub fn rates(&mut self, now: Instant) -> PlayFeel {
        self.prune(now);
        let seconds = self.window.as_secs_f32();
        let rate = |slot: &VecDeque<Sample>| -> f32 {
            slot.iter().map(|sample| sample.weight).sum::<f32>() / seconds * RATE_GAIN
        };
        PlayFeel {
            low: rate(&self.bands[0]),
            mid: rate(&self.bands[1]),
            high: rate(&self.bands[2]),
        }
    }

    /// Rates at `now`, published only when some band moved by more than the
    /// epsilon since the last publication.
    pub fn poll(&mut self, now: Instant) -> Option<PlayFeel> {
        let next = self.rates(now);
        let unchanged = FeelBand::ALL
            .iter()
            .all(|&band| (next.band(band) - self.published.band(band)).abs() <= PUBLISH_EPSILON);
        if unchanged {
            return None;
        }
        self.published = next;
        Some(next)
    }

    /// Last published snapshot.
    pub fn current(&self) -> PlayFeel {
        self.published
    }

    /// Drop all samples; the next poll decays the published signal to zero.
    pub fn clear(&mut self) {
        for slot in &mut self.bands {
            slot.clear();
        }
    }

    fn prune(&mut self, now: Instant) {
        for slot in &mut self.bands {
            while slot
                .front()
                .is_some_and(|sample| now.duration_since(sample.at) > self.window)
            {
                slot.pop_front();
            }
        }
    }
}

impl Default for FeelAggregator {
    fn default() -> Self {
        Self::new()
    }
}
