use clavier_ports::tone::TonePort;
use clavier_ports::types::Hand;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Debug)]
struct VoiceEntry {
    pitch: String,
    hand: Option<Hand>,
}

/// In-flight notes keyed by an opaque input identifier (a keyboard symbol or
/// a pointer token). Several identifiers may hold the same pitch; the
/// sounding set is reference-counted per pitch, so it only drops a pitch
/// once no identifier references it.
pub struct VoiceRegistry {
    tone: Arc<dyn TonePort>,
    entries: HashMap<String, VoiceEntry>,
    counts: HashMap<String, u32>,
    sounding: Vec<String>,
}

impl VoiceRegistry {
    pub fn new(tone: Arc<dyn TonePort>) -> Self {
        Self {
            tone,
            entries: HashMap::new(),
            counts: HashMap::new(),
            sounding: Vec::new(),
        }
    }

    pub fn start(&mut self, identifier: &str, pitch: &str, hand: Option<Hand>) {
        let entry = VoiceEntry {
            pitch: pitch.to_string(),
            hand,
        };
        if let Some(previous) = self.entries.insert(identifier.to_string(), entry) {
            self.release(&previous.pitch);
        }

        let count = self.counts.entry(pitch.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.sounding.push(pitch.to_string());
        }

        self.tone.start_tone(pitch);
    }

    /// No-op for identifiers that are not active, so stray key-up events
    /// (after a mode switch cleared state) are harmless.
    pub fn stop(&mut self, identifier: &str) {
        let Some(entry) = self.entries.remove(identifier) else {
            return;
        };
        self.tone.stop_tone(&entry.pitch);
        self.release(&entry.pitch);
    }

    pub fn stop_all(&mut self) {
        for entry in self.entries.values() {
            self.tone.stop_tone(&entry.pitch);
        }
        // Catches any voice the registry lost track of.
        self.tone.stop_all_tones();
        self.entries.clear();
        self.counts.clear();
        self.sounding.clear();
    }

    pub fn is_active(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn pitch_for(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(|entry| entry.pitch.as_str())
    }

    pub fn hand_for(&self, identifier: &str) -> Option<Hand> {
        self.entries.get(identifier).and_then(|entry| entry.hand)
    }

    /// Distinct sounding pitches in press order.
    pub fn sounding(&self) -> &[String] {
        &self.sounding
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn release(&mut self, pitch: &str) {
        if let Some(count) = self.counts.get_mut(pitch) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(pitch);
                self.sounding.retain(|sounding| sounding != pitch);
            }
        }
    }
}
