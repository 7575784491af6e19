use super::*;

#[test]
fn fresh_clock_reads_zero_on_first_tick() {
    let mut c = ClockState::fresh();
    assert_eq!(c.epoch_ms(), None);
    assert_eq!(c.elapsed_at(123_456.0), 0.0);
    assert_eq!(c.epoch_ms(), Some(123_456.0));
    assert!((c.elapsed_at(125_956.0) - 2.5).abs() < 1e-9);
}

#[test]
fn elapsed_wraps_at_loop_length() {
    let mut c = ClockState::fresh();
    c.elapsed_at(0.0);
    assert!((c.elapsed_at(19_999.9) - 19.9999).abs() < 1e-9);
    assert_eq!(c.elapsed_at(20_000.0), 0.0);
    assert!((c.elapsed_at(21_500.0) - 1.5).abs() < 1e-9);
    assert!((c.elapsed_at(65_000.0) - 5.0).abs() < 1e-9);
}

#[test]
fn timestamps_before_epoch_stay_in_range() {
    let mut c = ClockState::fresh();
    c.elapsed_at(10_000.0);
    let e = c.elapsed_at(9_000.0);
    assert!((e - 19.0).abs() < 1e-9);
}

#[test]
fn wrap_seconds_stays_half_open() {
    assert_eq!(wrap_seconds(0.0), 0.0);
    assert_eq!(wrap_seconds(20.0), 0.0);
    assert_eq!(wrap_seconds(-1e-18), 0.0);
    assert!((wrap_seconds(-5.0) - 15.0).abs() < 1e-12);
    for s in [-100.3, -0.1, 0.0, 7.0, 19.99999, 40.5, 1e9] {
        let w = wrap_seconds(s);
        assert!((0.0..TOTAL_DURATION).contains(&w), "{s} -> {w}");
    }
}

#[test]
fn paused_clock_resumes_from_pause_point() {
    let mut c = ClockState::fresh();
    c.elapsed_at(1_000.0);
    let before = c.elapsed_at(8_500.0);
    assert!((before - 7.5).abs() < 1e-9);

    let mut resumed = c.paused();
    assert_eq!(resumed.epoch_ms(), None);
    assert!((resumed.last_elapsed() - 7.5).abs() < 1e-9);
    // Long gap while paused does not count.
    assert!((resumed.elapsed_at(500_000.0) - 7.5).abs() < 1e-9);
    assert!((resumed.elapsed_at(500_016.0) - 7.516).abs() < 1e-9);
}

#[test]
fn pausing_after_several_loops_keeps_the_wrapped_position() {
    let mut c = ClockState::fresh();
    c.elapsed_at(0.0);
    c.elapsed_at(43_000.0);
    let mut resumed = c.paused();
    assert!((resumed.elapsed_at(1.0) - 3.0).abs() < 1e-9);
}

#[test]
fn default_is_fresh() {
    assert_eq!(ClockState::default(), ClockState::fresh());
}
