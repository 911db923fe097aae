use clavier_ports::tone::TonePort;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Headless tone backend: tracks started pitches by reference count without
/// producing audio. The default adapter for embedders that bring their own
/// synthesis, and the observable backend in engine tests.
pub struct SimpleTone {
    inner: Mutex<Inner>,
}

#[derive(Default, Debug)]
struct Inner {
    counts: HashMap<String, u32>,
    started: u64,
    stopped: u64,
}

impl SimpleTone {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Currently sounding pitches, sorted by name.
    pub fn active_pitches(&self) -> Vec<String> {
        let inner = self.inner.lock();
        let mut pitches: Vec<String> = inner.counts.keys().cloned().collect();
        pitches.sort();
        pitches
    }

    pub fn is_active(&self, pitch: &str) -> bool {
        self.inner.lock().counts.contains_key(pitch)
    }

    /// Total start commands received.
    pub fn started_count(&self) -> u64 {
        self.inner.lock().started
    }

    /// Total stop commands received, counting only those that hit a voice.
    pub fn stopped_count(&self) -> u64 {
        self.inner.lock().stopped
    }
}

impl Default for SimpleTone {
    fn default() -> Self {
        Self::new()
    }
}

impl TonePort for SimpleTone {
    fn start_tone(&self, pitch: &str) {
        let mut inner = self.inner.lock();
        *inner.counts.entry(pitch.to_string()).or_insert(0) += 1;
        inner.started += 1;
    }

    fn stop_tone(&self, pitch: &str) {
        let mut inner = self.inner.lock();
        let Some(count) = inner.counts.get_mut(pitch) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            inner.counts.remove(pitch);
        }
        inner.stopped += 1;
    }

    fn stop_all_tones(&self) {
        self.inner.lock().counts.clear();
    }
}
