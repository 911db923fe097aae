use clavier_core::{Command, Engine, Event, PlayMode};
use clavier_domain_keys::{KeyLayoutKind, ScaleQuality};
use clavier_infra_tone_simple::SimpleTone;
use clavier_ports::notify::{Notice, NotifyPort};
use clavier_ports::types::Hand;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn new_engine() -> (Engine, Arc<SimpleTone>) {
    let tone = Arc::new(SimpleTone::new());
    let engine = Engine::new(tone.clone(), None);
    (engine, tone)
}

#[derive(Default)]
struct RecordingNotify {
    notices: Mutex<Vec<Notice>>,
}

impl NotifyPort for RecordingNotify {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

fn key_down(engine: &mut Engine, key: &str) {
    engine
        .handle_command(Command::KeyDown { key: key.to_string() })
        .unwrap();
}

fn key_up(engine: &mut Engine, key: &str) {
    engine
        .handle_command(Command::KeyUp { key: key.to_string() })
        .unwrap();
}

#[test]
fn press_and_release_round_trip() {
    let (mut engine, tone) = new_engine();

    key_down(&mut engine, "a");
    assert_eq!(engine.snapshot().sounding, vec!["C4".to_string()]);
    assert!(tone.is_active("C4"));

    key_up(&mut engine, "a");
    assert!(engine.snapshot().sounding.is_empty());
    assert!(!tone.is_active("C4"));
}

#[test]
fn auto_repeat_downs_are_ignored() {
    let (mut engine, tone) = new_engine();

    key_down(&mut engine, "a");
    key_down(&mut engine, "a");
    key_down(&mut engine, "A");

    assert_eq!(tone.started_count(), 1);
}

#[test]
fn keyboard_and_pointer_share_one_pitch() {
    let (mut engine, tone) = new_engine();

    key_down(&mut engine, "a");
    engine
        .handle_command(Command::PointerDown { pitch: "C4".to_string() })
        .unwrap();
    assert_eq!(engine.snapshot().sounding, vec!["C4".to_string()]);

    // Releasing one source keeps the pitch sounding for the other.
    key_up(&mut engine, "a");
    assert_eq!(engine.snapshot().sounding, vec!["C4".to_string()]);
    assert!(tone.is_active("C4"));

    engine
        .handle_command(Command::PointerUp { pitch: "C4".to_string() })
        .unwrap();
    assert!(engine.snapshot().sounding.is_empty());
    assert!(!tone.is_active("C4"));
}

#[test]
fn pointer_rejects_unknown_pitches() {
    let (mut engine, tone) = new_engine();

    engine
        .handle_command(Command::PointerDown { pitch: "H9".to_string() })
        .unwrap();

    assert!(engine.snapshot().sounding.is_empty());
    assert_eq!(tone.started_count(), 0);
}

#[test]
fn mode_cycle_returns_home_and_silences_each_step() {
    let (mut engine, tone) = new_engine();

    for _ in 0..3 {
        key_down(&mut engine, "a");
        assert!(!engine.snapshot().sounding.is_empty());
        engine.handle_command(Command::ShiftMode { delta: 1 }).unwrap();
        assert!(engine.snapshot().sounding.is_empty());
        assert!(tone.active_pitches().is_empty());
        key_up(&mut engine, "a");
    }

    assert_eq!(engine.mode(), PlayMode::Standard);
}

#[test]
fn mode_keys_cycle_modes() {
    let (mut engine, _tone) = new_engine();

    key_down(&mut engine, "0");
    assert_eq!(engine.mode(), PlayMode::Dual);

    key_down(&mut engine, "9");
    assert_eq!(engine.mode(), PlayMode::Standard);
}

#[test]
fn mode_cycle_wraps_backwards() {
    let (mut engine, _tone) = new_engine();

    engine.handle_command(Command::ShiftMode { delta: -1 }).unwrap();
    assert_eq!(engine.mode(), PlayMode::Scale);

    let events = engine.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ModeChanged { label, previous }
            if label == "SCALE" && previous == "STANDARD"
    )));
}

#[test]
fn shift_moves_the_single_hand_layout() {
    let (mut engine, _tone) = new_engine();

    engine
        .handle_command(Command::ChangeShift { hand: Hand::Left, delta: 2 })
        .unwrap();
    key_down(&mut engine, "a");

    assert_eq!(engine.snapshot().sounding, vec!["E4".to_string()]);
}

#[test]
fn shift_clamps_to_single_layout_bounds() {
    let (mut engine, _tone) = new_engine();

    engine
        .handle_command(Command::ChangeShift { hand: Hand::Left, delta: 999 })
        .unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.left.shift, 22);
    assert_eq!(snapshot.left.bounds.min, -23);
    assert_eq!(snapshot.left.bounds.max, 22);

    // The top of the layout lands on the last key.
    key_down(&mut engine, "j");
    assert_eq!(engine.snapshot().sounding, vec!["C8".to_string()]);
}

#[test]
fn shift_keys_route_before_notes() {
    let (mut engine, tone) = new_engine();

    // QWERTZ binds "y" as the left hand's large down-shift.
    key_down(&mut engine, "y");
    assert_eq!(tone.started_count(), 0);
    assert_eq!(engine.shift(Hand::Left), -3);
}

#[test]
fn layout_toggle_swaps_the_black_row() {
    let (mut engine, _tone) = new_engine();

    key_down(&mut engine, "z");
    assert_eq!(engine.snapshot().sounding, vec!["A#4".to_string()]);
    key_up(&mut engine, "z");

    engine.handle_command(Command::ToggleLayout).unwrap();
    assert_eq!(engine.layout(), KeyLayoutKind::Qwerty);

    // Under QWERTY the same key is a shift binding instead.
    key_down(&mut engine, "z");
    assert!(engine.snapshot().sounding.is_empty());
    assert_eq!(engine.shift(Hand::Left), -3);
}

#[test]
fn dual_mode_splits_hands() {
    let (mut engine, _tone) = new_engine();

    engine.handle_command(Command::ShiftMode { delta: 1 }).unwrap();
    assert_eq!(engine.mode(), PlayMode::Dual);

    // Both hands anchor at the reference key until a hand shifts away.
    key_down(&mut engine, "a");
    key_down(&mut engine, "h");
    assert_eq!(engine.snapshot().sounding, vec!["C4".to_string()]);
    key_up(&mut engine, "a");
    key_up(&mut engine, "h");

    engine
        .handle_command(Command::ChangeShift { hand: Hand::Right, delta: 4 })
        .unwrap();
    key_down(&mut engine, "a");
    key_down(&mut engine, "h");
    assert_eq!(
        engine.snapshot().sounding,
        vec!["C4".to_string(), "G4".to_string()]
    );
}

#[test]
fn scale_mode_presents_a_full_degree_window() {
    let (mut engine, _tone) = new_engine();

    engine.handle_command(Command::ShiftMode { delta: -1 }).unwrap();
    assert_eq!(engine.mode(), PlayMode::Scale);

    key_down(&mut engine, "a");
    assert_eq!(engine.snapshot().sounding, vec!["C4".to_string()]);
    key_up(&mut engine, "a");

    // Shift to the very top: the window clamps, the seventh degree is C8.
    engine
        .handle_command(Command::ChangeShift { hand: Hand::Left, delta: 999 })
        .unwrap();
    assert_eq!(engine.snapshot().left.shift, 28);

    key_down(&mut engine, "e");
    assert_eq!(engine.snapshot().sounding, vec!["C8".to_string()]);

    // The octave-above degree has nowhere to go past the top.
    key_down(&mut engine, "r");
    assert_eq!(engine.snapshot().sounding, vec!["C8".to_string()]);
}

#[test]
fn scale_quality_keys_preserve_root() {
    let (mut engine, _tone) = new_engine();
    engine.handle_command(Command::ShiftMode { delta: -1 }).unwrap();

    key_down(&mut engine, "4");
    assert_eq!(engine.current_scale().label, "Cm");

    key_down(&mut engine, "2");
    assert_eq!(engine.current_scale().label, "Dm");

    key_down(&mut engine, "3");
    assert_eq!(engine.current_scale().label, "DM");
}

#[test]
fn scale_commands_preserve_the_other_axis() {
    let (mut engine, _tone) = new_engine();

    engine
        .handle_command(Command::SetScaleQuality { quality: ScaleQuality::Minor })
        .unwrap();
    assert_eq!(engine.current_scale().label, "Cm");

    engine
        .handle_command(Command::SetScaleRoot { root: "G".to_string() })
        .unwrap();
    assert_eq!(engine.current_scale().label, "Gm");

    engine
        .handle_command(Command::SetScaleQuality { quality: ScaleQuality::Major })
        .unwrap();
    assert_eq!(engine.current_scale().label, "GM");
}

#[test]
fn scale_root_cycle_wraps_and_keeps_quality() {
    let (mut engine, _tone) = new_engine();

    engine
        .handle_command(Command::SetScaleQuality { quality: ScaleQuality::Minor })
        .unwrap();
    engine.handle_command(Command::ShiftScale { delta: -1 }).unwrap();
    assert_eq!(engine.current_scale().label, "Am");

    engine.handle_command(Command::ShiftScale { delta: 1 }).unwrap();
    assert_eq!(engine.current_scale().label, "Cm");
}

#[test]
fn unknown_scale_root_is_a_no_op() {
    let (mut engine, _tone) = new_engine();

    engine
        .handle_command(Command::SetScaleRoot { root: "B".to_string() })
        .unwrap();
    assert_eq!(engine.current_scale().label, "CM");
}

#[test]
fn focus_loss_clears_everything() {
    let (mut engine, tone) = new_engine();

    key_down(&mut engine, "a");
    key_down(&mut engine, "s");
    engine.handle_command(Command::FocusLost).unwrap();

    assert!(engine.snapshot().sounding.is_empty());
    assert!(tone.active_pitches().is_empty());

    // Stray key-ups after the purge are harmless.
    key_up(&mut engine, "a");
    key_up(&mut engine, "s");
    assert!(engine.snapshot().sounding.is_empty());
}

#[test]
fn stop_all_is_idempotent() {
    let (mut engine, tone) = new_engine();

    key_down(&mut engine, "a");
    engine.handle_command(Command::StopAll).unwrap();
    engine.handle_command(Command::StopAll).unwrap();

    assert!(engine.snapshot().sounding.is_empty());
    assert!(tone.active_pitches().is_empty());
}

#[test]
fn snapshot_reports_playable_sets_per_hand() {
    let (mut engine, _tone) = new_engine();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.mode, "STANDARD");
    assert_eq!(snapshot.scale, "CM");
    assert_eq!(snapshot.left.playable, snapshot.right.playable);
    assert_eq!(snapshot.combined_playable.len(), 12);

    engine.handle_command(Command::ShiftMode { delta: 1 }).unwrap();
    engine
        .handle_command(Command::ChangeShift { hand: Hand::Right, delta: -7 })
        .unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.mode, "DUAL");
    assert_ne!(snapshot.left.playable, snapshot.right.playable);
}

#[test]
fn mode_and_scale_changes_reach_the_notify_collaborator() {
    let tone = Arc::new(SimpleTone::new());
    let notify = Arc::new(RecordingNotify::default());
    let mut engine = Engine::new(tone, Some(notify.clone() as Arc<dyn NotifyPort>));

    engine.handle_command(Command::ShiftMode { delta: 1 }).unwrap();
    engine
        .handle_command(Command::SetScaleQuality { quality: ScaleQuality::Minor })
        .unwrap();

    let notices = notify.notices.lock().unwrap();
    assert_eq!(
        *notices,
        vec![
            Notice::ModeChanged {
                label: "DUAL".to_string(),
                previous: "STANDARD".to_string(),
            },
            Notice::ScaleChanged {
                label: "Cm".to_string(),
                previous: "CM".to_string(),
            },
        ]
    );
}

#[test]
fn note_events_surface_the_sounding_set() {
    let (mut engine, _tone) = new_engine();

    key_down(&mut engine, "a");
    let events = engine.drain_events();

    assert!(events.iter().any(|event| matches!(
        event,
        Event::SoundingChanged { pitches } if pitches == &vec!["C4".to_string()]
    )));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::FeelUpdated { .. })));
}
