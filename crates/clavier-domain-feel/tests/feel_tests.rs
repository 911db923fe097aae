use clavier_domain_feel::{FeelAggregator, FeelBand, FEEL_WINDOW, RATE_GAIN};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn band_weights_interpolate_across_their_ranges() {
    assert_eq!(FeelBand::Low.weight(21), Some(1.5));
    assert_eq!(FeelBand::Low.weight(60), Some(0.5));
    assert_eq!(FeelBand::Mid.weight(36), Some(1.0));
    assert_eq!(FeelBand::Mid.weight(84), Some(1.0));
    assert_eq!(FeelBand::High.weight(64), Some(0.5));
    assert_eq!(FeelBand::High.weight(108), Some(1.5));
}

#[test]
fn out_of_range_semitones_contribute_nothing() {
    assert_eq!(FeelBand::Low.weight(61), None);
    assert_eq!(FeelBand::High.weight(63), None);
    assert_eq!(FeelBand::Mid.weight(20), None);
}

#[test]
fn middle_c_feeds_low_and_mid_but_not_high() {
    let mut feel = FeelAggregator::new();
    let t0 = Instant::now();

    feel.note_started(60, t0);
    let rates = feel.rates(t0);

    let seconds = FEEL_WINDOW.as_secs_f32();
    assert!(close(rates.low, 0.5 / seconds * RATE_GAIN));
    assert!(close(rates.mid, 1.0 / seconds * RATE_GAIN));
    assert_eq!(rates.high, 0.0);
}

#[test]
fn samples_expire_after_the_window() {
    let mut feel = FeelAggregator::new();
    let t0 = Instant::now();

    feel.note_started(60, t0);
    let rates = feel.rates(t0 + Duration::from_millis(5000));

    assert_eq!(rates.low, 0.0);
    assert_eq!(rates.mid, 0.0);
    assert_eq!(rates.high, 0.0);
}

#[test]
fn overlapping_bands_accumulate_independently() {
    let mut feel = FeelAggregator::new();
    let t0 = Instant::now();

    // 70 sits in both mid and high.
    feel.note_started(70, t0);
    feel.note_started(70, t0 + Duration::from_millis(100));
    let rates = feel.rates(t0 + Duration::from_millis(200));

    let seconds = FEEL_WINDOW.as_secs_f32();
    assert_eq!(rates.low, 0.0);
    assert!(close(rates.mid, 2.0 / seconds * RATE_GAIN));
    assert!(rates.high > 0.0);
}

#[test]
fn unchanged_windows_are_not_republished() {
    let mut feel = FeelAggregator::new();
    let t0 = Instant::now();

    feel.note_started(60, t0);
    assert!(feel.poll(t0).is_some());
    assert!(feel.poll(t0).is_none());
    assert!(feel.poll(t0 + Duration::from_millis(1)).is_none());
}

#[test]
fn decay_republishes_once_past_the_epsilon() {
    let mut feel = FeelAggregator::new();
    let t0 = Instant::now();

    feel.note_started(60, t0);
    assert!(feel.poll(t0).is_some());

    let decayed = feel.poll(t0 + Duration::from_millis(5000)).unwrap();
    assert_eq!(decayed.mid, 0.0);
    assert_eq!(feel.current().mid, 0.0);
}

#[test]
fn clear_drops_pending_samples() {
    let mut feel = FeelAggregator::new();
    let t0 = Instant::now();

    feel.note_started(60, t0);
    assert!(feel.poll(t0).is_some());

    feel.clear();
    let zeroed = feel.poll(t0).unwrap();
    assert_eq!(zeroed.mid, 0.0);
}
