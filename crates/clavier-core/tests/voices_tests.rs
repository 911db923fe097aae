use clavier_core::VoiceRegistry;
use clavier_infra_tone_simple::SimpleTone;
use clavier_ports::types::Hand;
use clavier_ports::TonePort;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn registry() -> (VoiceRegistry, Arc<SimpleTone>) {
    let tone = Arc::new(SimpleTone::new());
    (VoiceRegistry::new(tone.clone()), tone)
}

#[test]
fn tracks_entries_by_identifier() {
    let (mut voices, tone) = registry();

    voices.start("a", "C4", Some(Hand::Left));
    assert!(voices.is_active("a"));
    assert_eq!(voices.pitch_for("a"), Some("C4"));
    assert_eq!(voices.hand_for("a"), Some(Hand::Left));
    assert!(tone.is_active("C4"));

    voices.stop("a");
    assert!(!voices.is_active("a"));
    assert!(voices.is_empty());
    assert!(!tone.is_active("C4"));
}

#[test]
fn sounding_set_is_reference_counted_per_pitch() {
    let (mut voices, _tone) = registry();

    voices.start("a", "C4", Some(Hand::Left));
    voices.start("C4", "C4", None);
    assert_eq!(voices.sounding(), ["C4".to_string()]);

    voices.stop("a");
    assert_eq!(voices.sounding(), ["C4".to_string()]);

    voices.stop("C4");
    assert!(voices.sounding().is_empty());
}

#[test]
fn stop_is_a_no_op_for_unknown_identifiers() {
    let (mut voices, tone) = registry();

    voices.stop("ghost");
    assert!(voices.is_empty());
    assert_eq!(tone.stopped_count(), 0);
}

#[test]
fn restarting_an_identifier_replaces_its_pitch() {
    let (mut voices, tone) = registry();

    voices.start("a", "C4", Some(Hand::Left));
    voices.start("a", "E4", Some(Hand::Left));
    assert_eq!(voices.sounding(), ["E4".to_string()]);

    voices.stop("a");
    assert!(voices.sounding().is_empty());
    assert!(!tone.is_active("E4"));
}

#[test]
fn stop_all_silences_the_backend_unconditionally() {
    let (mut voices, tone) = registry();

    voices.start("a", "C4", Some(Hand::Left));
    voices.start("s", "D4", Some(Hand::Left));
    // A voice the registry never saw.
    tone.start_tone("G7");

    voices.stop_all();
    assert!(voices.is_empty());
    assert!(voices.sounding().is_empty());
    assert!(tone.active_pitches().is_empty());
}
