use crate::diagnostics::{export_diagnostics, DiagnosticsError};
use crate::dispatch::{InputDispatcher, NavAction};
use crate::ipc::{Command, EngineSnapshot, Event, HandView, PlayMode};
use crate::voices::VoiceRegistry;
use clavier_domain_feel::FeelAggregator;
use clavier_domain_keys::{
    absolute_semitone, diatonic_indices, playable_degrees, playable_hand, preset_index_for,
    resolve_black, resolve_degree, resolve_white, scale_shift_bounds, shift_bounds,
    distinct_roots, HandLayout, DegreeLayout, KeyLayoutKind, Keyboard, ScalePreset, ScaleQuality,
    ShiftBounds, SCALE_PRESETS,
};
use clavier_ports::notify::{Notice, NotifyPort};
use clavier_ports::tone::TonePort;
use clavier_ports::types::Hand;
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("diagnostics error: {0}")]
    Diagnostics(#[from] DiagnosticsError),
}

/// The performance-state engine. Owns every piece of session state (mode,
/// scale, per-hand shift, voices, feel) and mutates it only from its own
/// command handlers; ports are passive consumers.
pub struct Engine {
    keyboard: Keyboard,
    layout: KeyLayoutKind,
    mode_index: usize,
    scale_index: usize,
    left_shift: i32,
    right_shift: i32,
    diatonic: Vec<usize>,
    voices: VoiceRegistry,
    dispatcher: InputDispatcher,
    feel: FeelAggregator,
    notify: Option<Arc<dyn NotifyPort>>,
    events: VecDeque<Event>,
}

impl Engine {
    pub fn new(tone: Arc<dyn TonePort>, notify: Option<Arc<dyn NotifyPort>>) -> Self {
        let keyboard = Keyboard::new();
        let diatonic = diatonic_indices(&keyboard, &SCALE_PRESETS[0]);
        Self {
            keyboard,
            layout: KeyLayoutKind::Qwertz,
            mode_index: 0,
            scale_index: 0,
            left_shift: 0,
            right_shift: 0,
            diatonic,
            voices: VoiceRegistry::new(tone),
            dispatcher: InputDispatcher::new(),
            feel: FeelAggregator::new(),
            notify,
            events: VecDeque::new(),
        }
    }

    pub fn handle_command(&mut self, cmd: Command) -> Result<(), EngineError> {
        match cmd {
            Command::KeyDown { key } => self.key_down(&key),
            Command::KeyUp { key } => self.key_up(&key),
            Command::PointerDown { pitch } => self.pointer_down(&pitch),
            Command::PointerUp { pitch } => self.pointer_up(&pitch),
            Command::ChangeShift { hand, delta } => self.change_shift(hand, delta),
            Command::ShiftMode { delta } => self.shift_mode(delta),
            Command::ShiftScale { delta } => self.shift_scale(delta),
            Command::SetScaleRoot { root } => self.set_scale_root(&root),
            Command::SetScaleQuality { quality } => self.set_scale_quality(quality),
            Command::SetLayout { layout } => self.set_layout(layout),
            Command::ToggleLayout => self.set_layout(self.layout.toggled()),
            Command::FocusLost => self.focus_lost(),
            Command::StopAll => self.stop_all_playing(),
            Command::ExportDiagnostics { path } => {
                export_diagnostics(Path::new(&path), &self.snapshot())?;
            }
        }
        Ok(())
    }

    /// Periodic host callback (see `FEEL_TICK`) so the feel signal decays
    /// between note starts.
    pub fn tick(&mut self) {
        if let Some(feel) = self.feel.poll(Instant::now()) {
            self.events.push_back(Event::FeelUpdated { feel });
        }
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn mode(&self) -> PlayMode {
        PlayMode::ALL[self.mode_index]
    }

    pub fn layout(&self) -> KeyLayoutKind {
        self.layout
    }

    pub fn current_scale(&self) -> &'static ScalePreset {
        &SCALE_PRESETS[self.scale_index]
    }

    pub fn shift(&self, hand: Hand) -> i32 {
        match hand {
            Hand::Left => self.left_shift,
            Hand::Right => self.right_shift,
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mode = self.mode();
        let (left_bounds, right_bounds) = self.hand_bounds();
        let (left_playable, right_playable) = match mode {
            PlayMode::Scale => {
                let layout = self.layout.scale();
                (
                    playable_degrees(&self.keyboard, &self.diatonic, &layout.left, self.left_shift),
                    playable_degrees(&self.keyboard, &self.diatonic, &layout.right, self.right_shift),
                )
            }
            PlayMode::Dual => {
                let layout = self.layout.dual();
                (
                    playable_hand(&self.keyboard, &layout.left, self.left_shift),
                    playable_hand(&self.keyboard, &layout.right, self.right_shift),
                )
            }
            PlayMode::Standard => {
                let single = playable_hand(&self.keyboard, &self.layout.single(), self.left_shift);
                (single.clone(), single)
            }
        };
        let combined = self.merge_playable(&left_playable, &right_playable);

        EngineSnapshot {
            layout: self.layout,
            mode: mode.label().to_string(),
            scale: self.current_scale().label.to_string(),
            sounding: self.voices.sounding().to_vec(),
            left: HandView {
                shift: self.left_shift,
                bounds: left_bounds,
                playable: left_playable,
            },
            right: HandView {
                shift: self.right_shift,
                bounds: right_bounds,
                playable: right_playable,
            },
            combined_playable: combined,
            feel: self.feel.current(),
        }
    }

    fn key_down(&mut self, raw: &str) {
        let key = InputDispatcher::normalize(raw);
        if key.is_empty() || !self.dispatcher.press(&key) {
            return;
        }

        if let Some(action) = self.dispatcher.route(self.mode(), self.layout, &key) {
            self.apply_nav(action);
            return;
        }

        if let Some((pitch, hand)) = self.resolve_key(&key) {
            self.start_voice(&key, &pitch, hand);
        }
    }

    fn key_up(&mut self, raw: &str) {
        let key = InputDispatcher::normalize(raw);
        self.dispatcher.release(&key);
        self.stop_voice(&key);
    }

    fn pointer_down(&mut self, pitch: &str) {
        if self.keyboard.index_of(pitch).is_none() {
            return;
        }
        // The pitch name doubles as the identifier; pointer input has no key
        // symbol of its own.
        let identifier = pitch.to_string();
        self.start_voice(&identifier, pitch, None);
    }

    fn pointer_up(&mut self, pitch: &str) {
        self.stop_voice(pitch);
    }

    fn apply_nav(&mut self, action: NavAction) {
        match action {
            NavAction::SetQuality(quality) => self.set_scale_quality(quality),
            NavAction::SelectRoot(root) => self.set_scale_root(root),
            NavAction::CycleRoot(delta) => self.shift_scale(delta),
            NavAction::ChangeShift { hand, delta } => self.change_shift(hand, delta),
            NavAction::CycleMode(delta) => self.shift_mode(delta),
        }
    }

    fn change_shift(&mut self, hand: Hand, delta: i32) {
        let (left_bounds, right_bounds) = self.hand_bounds();
        match hand {
            Hand::Left => {
                self.left_shift = left_bounds.clamp(self.left_shift + delta);
            }
            Hand::Right => {
                self.right_shift = right_bounds.clamp(self.right_shift + delta);
            }
        }
        self.emit_snapshot();
    }

    fn shift_mode(&mut self, delta: i32) {
        let count = PlayMode::ALL.len() as i32;
        let next = (self.mode_index as i32 + delta).rem_euclid(count) as usize;
        let previous = self.mode().label().to_string();
        self.mode_index = next;

        // No voice may persist across a mode boundary.
        self.stop_all_playing();
        self.clamp_shifts();

        let label = self.mode().label().to_string();
        self.events.push_back(Event::ModeChanged {
            label: label.clone(),
            previous: previous.clone(),
        });
        if let Some(notify) = &self.notify {
            notify.notify(Notice::ModeChanged { label, previous });
        }
        self.emit_snapshot();
    }

    fn shift_scale(&mut self, delta: i32) {
        let roots = distinct_roots();
        if roots.is_empty() {
            return;
        }
        let current = self.current_scale().root;
        let index = roots.iter().position(|&root| root == current).unwrap_or(0);
        let next = roots[(index as i32 + delta).rem_euclid(roots.len() as i32) as usize];
        self.set_scale_root(next);
    }

    fn set_scale_root(&mut self, root: &str) {
        let quality = self.current_scale().quality();
        if let Some(next) = preset_index_for(root, quality) {
            self.apply_scale_index(next);
        }
    }

    fn set_scale_quality(&mut self, quality: ScaleQuality) {
        let root = self.current_scale().root;
        if let Some(next) = preset_index_for(root, quality) {
            self.apply_scale_index(next);
        }
    }

    fn apply_scale_index(&mut self, next: usize) {
        if next >= SCALE_PRESETS.len() || next == self.scale_index {
            return;
        }
        let previous = self.current_scale().label.to_string();
        self.scale_index = next;
        self.diatonic = diatonic_indices(&self.keyboard, self.current_scale());
        if self.mode() == PlayMode::Scale {
            self.clamp_shifts();
        }

        let label = self.current_scale().label.to_string();
        self.events.push_back(Event::ScaleChanged {
            label: label.clone(),
            previous: previous.clone(),
        });
        if let Some(notify) = &self.notify {
            notify.notify(Notice::ScaleChanged { label, previous });
        }
        self.emit_snapshot();
    }

    fn set_layout(&mut self, layout: KeyLayoutKind) {
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.clamp_shifts();
        self.emit_snapshot();
    }

    fn focus_lost(&mut self) {
        self.stop_all_playing();
        self.dispatcher.clear();
    }

    fn stop_all_playing(&mut self) {
        self.voices.stop_all();
        self.feel.clear();
        if let Some(feel) = self.feel.poll(Instant::now()) {
            self.events.push_back(Event::FeelUpdated { feel });
        }
        self.events.push_back(Event::SoundingChanged {
            pitches: Vec::new(),
        });
    }

    fn start_voice(&mut self, identifier: &str, pitch: &str, hand: Option<Hand>) {
        self.voices.start(identifier, pitch, hand);

        let now = Instant::now();
        if let Some(semitone) = absolute_semitone(pitch) {
            self.feel.note_started(semitone, now);
        }
        if let Some(feel) = self.feel.poll(now) {
            self.events.push_back(Event::FeelUpdated { feel });
        }
        self.events.push_back(Event::SoundingChanged {
            pitches: self.voices.sounding().to_vec(),
        });
    }

    fn stop_voice(&mut self, identifier: &str) {
        if !self.voices.is_active(identifier) {
            return;
        }
        self.voices.stop(identifier);
        self.events.push_back(Event::SoundingChanged {
            pitches: self.voices.sounding().to_vec(),
        });
    }

    fn resolve_key(&self, key: &str) -> Option<(String, Option<Hand>)> {
        match self.mode() {
            PlayMode::Scale => {
                let layout = self.layout.scale();
                self.resolve_degree_key(&layout.left, self.left_shift, Hand::Left, key)
                    .or_else(|| {
                        self.resolve_degree_key(&layout.right, self.right_shift, Hand::Right, key)
                    })
            }
            PlayMode::Dual => {
                let layout = self.layout.dual();
                self.resolve_hand_key(&layout.left, self.left_shift, Hand::Left, key)
                    .or_else(|| {
                        self.resolve_hand_key(&layout.right, self.right_shift, Hand::Right, key)
                    })
            }
            PlayMode::Standard => {
                self.resolve_hand_key(&self.layout.single(), self.left_shift, Hand::Left, key)
            }
        }
    }

    fn resolve_hand_key(
        &self,
        layout: &HandLayout,
        shift: i32,
        hand: Hand,
        key: &str,
    ) -> Option<(String, Option<Hand>)> {
        if let Some(binding) = layout.white.iter().find(|binding| binding.key == key) {
            if let Some(note) = resolve_white(&self.keyboard, shift, binding.white_offset) {
                return Some((note.name.clone(), Some(hand)));
            }
        }
        if let Some(binding) = layout.black.iter().find(|binding| binding.key == key) {
            if let Some(note) = resolve_black(&self.keyboard, shift, binding.after_white_offset) {
                return Some((note.name.clone(), Some(hand)));
            }
        }
        None
    }

    fn resolve_degree_key(
        &self,
        layout: &DegreeLayout,
        shift: i32,
        hand: Hand,
        key: &str,
    ) -> Option<(String, Option<Hand>)> {
        let binding = layout.degrees.iter().find(|binding| binding.key == key)?;
        let note = resolve_degree(&self.keyboard, &self.diatonic, shift, binding.degree_offset)?;
        Some((note.name.clone(), Some(hand)))
    }

    fn hand_bounds(&self) -> (ShiftBounds, ShiftBounds) {
        match self.mode() {
            PlayMode::Scale => {
                let bounds = scale_shift_bounds(&self.keyboard, &self.diatonic);
                (bounds, bounds)
            }
            PlayMode::Dual => {
                let layout = self.layout.dual();
                (
                    shift_bounds(&self.keyboard, &layout.left),
                    shift_bounds(&self.keyboard, &layout.right),
                )
            }
            PlayMode::Standard => {
                let bounds = shift_bounds(&self.keyboard, &self.layout.single());
                (bounds, bounds)
            }
        }
    }

    fn clamp_shifts(&mut self) {
        let (left_bounds, right_bounds) = self.hand_bounds();
        self.left_shift = left_bounds.clamp(self.left_shift);
        if self.mode() != PlayMode::Standard {
            self.right_shift = right_bounds.clamp(self.right_shift);
        }
    }

    fn merge_playable(&self, left: &[String], right: &[String]) -> Vec<String> {
        let mut indices = BTreeSet::new();
        for name in left.iter().chain(right) {
            if let Some(index) = self.keyboard.index_of(name) {
                indices.insert(index);
            }
        }
        indices
            .into_iter()
            .filter_map(|index| self.keyboard.note(index).map(|note| note.name.clone()))
            .collect()
    }

    fn emit_snapshot(&mut self) {
        self.events.push_back(Event::SnapshotUpdated {
            snapshot: self.snapshot(),
        });
    }
}
