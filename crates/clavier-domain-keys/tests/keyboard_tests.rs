use clavier_domain_keys::{absolute_semitone, pitch_class, Keyboard, NoteKind};
use pretty_assertions::assert_eq;

#[test]
fn builds_the_full_88_note_range() {
    let keyboard = Keyboard::new();

    assert_eq!(keyboard.len(), 88);
    assert_eq!(keyboard.notes()[0].name, "A0");
    assert_eq!(keyboard.notes()[87].name, "C8");
    assert_eq!(keyboard.white_count(), 52);
}

#[test]
fn reference_white_key_is_c4() {
    let keyboard = Keyboard::new();

    assert_eq!(keyboard.base_index(), 39);
    assert_eq!(keyboard.base_white_position(), 23);
    assert_eq!(keyboard.index_of("C4"), Some(39));
}

#[test]
fn sharped_names_are_black() {
    let keyboard = Keyboard::new();

    let sharp = keyboard.note(keyboard.index_of("A#0").unwrap()).unwrap();
    assert_eq!(sharp.kind, NoteKind::Black);

    let natural = keyboard.note(keyboard.index_of("B0").unwrap()).unwrap();
    assert_eq!(natural.kind, NoteKind::White);
}

#[test]
fn white_index_lookup_rejects_out_of_range_positions() {
    let keyboard = Keyboard::new();

    assert_eq!(keyboard.white_index_at(0), Some(0));
    assert_eq!(keyboard.white_index_at(51), Some(87));
    assert_eq!(keyboard.white_index_at(-1), None);
    assert_eq!(keyboard.white_index_at(52), None);
}

#[test]
fn pitch_class_follows_letter_table() {
    assert_eq!(pitch_class("C4"), Some(0));
    assert_eq!(pitch_class("C#4"), Some(1));
    assert_eq!(pitch_class("E2"), Some(4));
    assert_eq!(pitch_class("B0"), Some(11));
}

#[test]
fn pitch_class_is_none_for_malformed_names() {
    assert_eq!(pitch_class(""), None);
    assert_eq!(pitch_class("H2"), None);
    assert_eq!(pitch_class("x"), None);
}

#[test]
fn absolute_semitone_places_c4_at_60() {
    assert_eq!(absolute_semitone("A0"), Some(21));
    assert_eq!(absolute_semitone("C4"), Some(60));
    assert_eq!(absolute_semitone("F#3"), Some(54));
    assert_eq!(absolute_semitone("C8"), Some(108));
    assert_eq!(absolute_semitone("nope"), None);
}
