use super::*;
use crate::clock::captions::CaptionLog;
use crate::clock::scheduler::ManualScheduler;
use crate::render::recording::{DrawCommand, RecordingSurface};
use crate::story::timetable::CANVAS;

type TestDriver = ClockDriver<RecordingSurface, ManualScheduler, CaptionLog>;

fn driver(autoplay: bool) -> TestDriver {
    ClockDriver::builder()
        .surface(RecordingSurface::new(CANVAS))
        .scheduler(ManualScheduler::new())
        .captions(CaptionLog::new())
        .autoplay(autoplay)
        .build()
        .unwrap()
}

/// Deliver the armed callback the way a host would.
fn tick(d: &mut TestDriver, ts: f64) -> TickOutcome {
    d.scheduler_mut().fire();
    d.on_frame(ts).unwrap()
}

#[test]
fn missing_collaborators_are_setup_errors() {
    let no_surface = ClockDriverBuilder::<RecordingSurface, ManualScheduler, CaptionLog>::new()
        .scheduler(ManualScheduler::new())
        .captions(CaptionLog::new())
        .build();
    let err = no_surface.err().unwrap();
    assert!(matches!(err, SavannaError::Setup(_)));
    assert!(err.to_string().contains("surface unavailable"));

    let no_scheduler = ClockDriverBuilder::<RecordingSurface, ManualScheduler, CaptionLog>::new()
        .surface(RecordingSurface::new(CANVAS))
        .captions(CaptionLog::new())
        .build();
    assert!(matches!(no_scheduler, Err(SavannaError::Setup(_))));

    let no_captions = ClockDriverBuilder::<RecordingSurface, ManualScheduler, CaptionLog>::new()
        .surface(RecordingSurface::new(CANVAS))
        .scheduler(ManualScheduler::new())
        .build();
    assert!(matches!(no_captions, Err(SavannaError::Setup(_))));
}

#[test]
fn autoplay_arms_one_frame() {
    let d = driver(true);
    assert_eq!(d.state(), PlaybackState::Running);
    assert_eq!(d.scheduler().pending(), 1);
    assert!(d.pending_frame().is_some());

    let idle = driver(false);
    assert_eq!(idle.state(), PlaybackState::Stopped);
    assert_eq!(idle.scheduler().pending(), 0);
}

#[test]
fn first_tick_renders_at_zero_and_announces_scene() {
    let mut d = driver(true);
    let out = tick(&mut d, 5_000.0);
    assert_eq!(out.elapsed(), Some(0.0));
    assert_eq!(out.scene().map(|s| s.id), Some("playful"));
    assert_eq!(d.captions().ids(), vec!["playful"]);
    assert_eq!(d.active_scene(), Some("playful"));
    assert_eq!(d.surface().commands()[0], DrawCommand::Clear);
    assert_eq!(d.scheduler().pending(), 1);
}

#[test]
fn captions_fire_only_on_scene_change() {
    let mut d = driver(true);
    for ms in [0.0, 1_000.0, 2_000.0, 5_999.0, 6_000.0, 7_000.0, 10_500.0, 14_000.0, 19_999.0] {
        tick(&mut d, ms);
    }
    assert_eq!(
        d.captions().ids(),
        vec!["playful", "warning", "pounce", "aftermath"]
    );

    // Loop wrap brings the first caption back.
    let out = tick(&mut d, 20_000.1);
    assert_eq!(out.scene().map(|s| s.id), Some("playful"));
    assert_eq!(d.captions().len(), 5);
}

#[test]
fn stopped_or_unarmed_ticks_are_idle() {
    let mut d = driver(false);
    assert_eq!(d.on_frame(1_000.0).unwrap(), TickOutcome::Idle);
    assert!(d.surface().commands().is_empty());

    d.play();
    d.pause();
    assert_eq!(d.on_frame(2_000.0).unwrap(), TickOutcome::Idle);
    assert!(d.captions().is_empty());
}

#[test]
fn non_finite_timestamp_is_rejected_and_frame_stays_armed() {
    let mut d = driver(true);
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = d.on_frame(bad).unwrap_err();
        assert!(matches!(err, SavannaError::Validation(_)));
    }
    assert!(d.pending_frame().is_some());
    assert!(d.surface().commands().is_empty());
}

#[test]
fn toggle_twice_returns_to_running_with_single_armed_frame() {
    let mut d = driver(true);
    d.toggle();
    assert_eq!(d.state(), PlaybackState::Stopped);
    assert_eq!(d.scheduler().pending(), 0);
    assert_eq!(d.pending_frame(), None);

    d.toggle();
    assert_eq!(d.state(), PlaybackState::Running);
    assert_eq!(d.scheduler().pending(), 1);

    d.play();
    assert_eq!(d.scheduler().pending(), 1);
    assert_eq!(d.scheduler().requests(), 2);
}

#[test]
fn pause_is_idempotent() {
    let mut d = driver(true);
    d.pause();
    d.pause();
    assert_eq!(d.scheduler().cancellations(), 1);
    assert_eq!(d.state(), PlaybackState::Stopped);
}

#[test]
fn pause_and_resume_preserves_elapsed() {
    let mut d = driver(true);
    tick(&mut d, 1_000.0);
    let before = tick(&mut d, 8_000.0).elapsed().unwrap();
    assert!((before - 7.0).abs() < 1e-9);

    d.toggle();
    d.toggle();
    let after = tick(&mut d, 90_000.0).elapsed().unwrap();
    assert!((after - before).abs() < 1e-9);
    let next = tick(&mut d, 90_016.0).elapsed().unwrap();
    assert!((next - 7.016).abs() < 1e-9);
}

#[test]
fn restart_yields_zero_on_next_tick() {
    let mut d = driver(true);
    tick(&mut d, 0.0);
    tick(&mut d, 12_000.0);
    d.restart();
    assert_eq!(d.scheduler().pending(), 1);
    let out = tick(&mut d, 12_016.0);
    assert_eq!(out.elapsed(), Some(0.0));
    assert_eq!(out.scene().map(|s| s.id), Some("playful"));
}

#[test]
fn restart_from_stopped_runs_and_restart_twice_arms_once() {
    let mut d = driver(false);
    d.restart();
    d.restart();
    assert_eq!(d.state(), PlaybackState::Running);
    assert_eq!(d.scheduler().pending(), 1);
    assert_eq!(d.scheduler().cancellations(), 1);
}

#[test]
fn into_parts_hands_back_collaborators() {
    let mut d = driver(true);
    tick(&mut d, 0.0);
    let (surface, scheduler, captions) = d.into_parts();
    assert!(!surface.commands().is_empty());
    assert_eq!(scheduler.pending(), 1);
    assert_eq!(captions.len(), 1);
}
