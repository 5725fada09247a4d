//! Tests for the playback controller and its media surface

use std::time::{Duration, Instant};

use super::*;
use crate::models::Channel;

fn channel(url: &str) -> Channel {
    Channel {
        id: "1".to_string(),
        name: "Premium Sports HD".to_string(),
        url: url.to_string(),
        logo: None,
        category: "Sports".to_string(),
        description: None,
    }
}

fn controller(url: &str) -> (PlayerController, Instant) {
    let t0 = Instant::now();
    (PlayerController::new(channel(url), t0), t0)
}

#[test]
fn test_autoplay_on_selection() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    assert_eq!(ctrl.phase(), PlaybackPhase::Loading);
    ctrl.update(t0);
    assert_eq!(ctrl.phase(), PlaybackPhase::Playing);
    assert!(ctrl.is_playing());
}

#[test]
fn test_toggle_play_flips_between_playing_and_paused() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);

    ctrl.toggle_play();
    ctrl.update(t0 + Duration::from_millis(100));
    assert_eq!(ctrl.phase(), PlaybackPhase::Paused);

    ctrl.toggle_play();
    ctrl.update(t0 + Duration::from_millis(200));
    assert_eq!(ctrl.phase(), PlaybackPhase::Playing);
}

#[test]
fn test_time_advances_while_playing() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);
    ctrl.update(t0 + Duration::from_secs(5));
    assert!((ctrl.current_time() - 5.0).abs() < 0.01);
}

#[test]
fn test_time_frozen_while_paused() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);
    ctrl.toggle_play();
    ctrl.update(t0 + Duration::from_secs(1));
    let at_pause = ctrl.current_time();
    ctrl.update(t0 + Duration::from_secs(30));
    assert_eq!(ctrl.current_time(), at_pause);
}

#[test]
fn test_external_pause_is_mirrored() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);
    assert!(ctrl.is_playing());

    // something other than the controller pauses the element
    ctrl.media_mut().pause();
    ctrl.update(t0 + Duration::from_millis(100));
    assert_eq!(ctrl.phase(), PlaybackPhase::Paused);
}

#[test]
fn test_missing_source_never_starts() {
    let (mut ctrl, t0) = controller("");
    ctrl.update(t0);
    ctrl.update(t0 + Duration::from_secs(10));
    assert_eq!(ctrl.phase(), PlaybackPhase::Loading);
    assert_eq!(ctrl.current_time(), 0.0);
}

#[test]
fn test_set_volume_zero_mutes() {
    let (mut ctrl, _) = controller("http://example.com/stream.ts");
    ctrl.set_volume(0);
    assert_eq!(ctrl.volume(), 0);
    assert!(ctrl.is_muted());
}

#[test]
fn test_set_volume_audible_unmutes() {
    let (mut ctrl, _) = controller("http://example.com/stream.ts");
    ctrl.set_volume(0);
    ctrl.set_volume(40);
    assert_eq!(ctrl.volume(), 40);
    assert!(!ctrl.is_muted());
}

#[test]
fn test_set_volume_clamps_to_range() {
    let (mut ctrl, _) = controller("http://example.com/stream.ts");
    ctrl.set_volume(150);
    assert_eq!(ctrl.volume(), 100);
    ctrl.set_volume(-20);
    assert_eq!(ctrl.volume(), 0);
    assert!(ctrl.is_muted());
}

#[test]
fn test_toggle_mute_mirrors_element() {
    let (mut ctrl, _) = controller("http://example.com/stream.ts");
    assert!(!ctrl.is_muted());
    ctrl.toggle_mute();
    assert!(ctrl.is_muted());
    assert!(ctrl.media_mut().is_muted());
    ctrl.toggle_mute();
    assert!(!ctrl.is_muted());
}

#[test]
fn test_seek_is_unclamped() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);
    ctrl.seek(1_000_000.0);
    assert_eq!(ctrl.current_time(), 1_000_000.0);
}

#[test]
fn test_skip_back_stops_at_zero() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);
    ctrl.update(t0 + Duration::from_secs(4));
    ctrl.skip_back();
    assert_eq!(ctrl.current_time(), 0.0);
}

#[test]
fn test_skip_forward_advances_by_step() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0);
    ctrl.seek(20.0);
    ctrl.skip_forward();
    assert_eq!(ctrl.current_time(), 30.0);
}

#[test]
fn test_declared_duration_is_mirrored() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.media_mut().load("http://example.com/movie.mp4", Some(42.0));
    ctrl.update(t0);
    assert_eq!(ctrl.duration(), Some(42.0));
}

#[test]
fn test_live_source_has_unknown_duration() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0 + Duration::from_secs(2));
    assert_eq!(ctrl.duration(), None);
}

#[test]
fn test_controls_hide_after_inactivity() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    assert!(ctrl.controls_visible());
    ctrl.update(t0 + Duration::from_millis(3100));
    assert!(!ctrl.controls_visible());
}

#[test]
fn test_activity_rearms_hide_timer() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.update(t0 + Duration::from_secs(2));
    ctrl.notify_activity(t0 + Duration::from_secs(2));
    // old deadline has passed, the rearmed one has not
    ctrl.update(t0 + Duration::from_secs(4));
    assert!(ctrl.controls_visible());
    ctrl.update(t0 + Duration::from_millis(5100));
    assert!(!ctrl.controls_visible());
}

#[test]
fn test_hide_controls_cancels_timer() {
    let (mut ctrl, t0) = controller("http://example.com/stream.ts");
    ctrl.hide_controls();
    assert!(!ctrl.controls_visible());
    ctrl.show_controls();
    // shown without a deadline: stays visible well past the hide window
    ctrl.update(t0 + Duration::from_secs(60));
    assert!(ctrl.controls_visible());
}

#[test]
fn test_fullscreen_flip_is_optimistic() {
    let (mut ctrl, _) = controller("http://example.com/stream.ts");
    assert!(!ctrl.is_fullscreen());
    assert!(ctrl.toggle_fullscreen());
    assert!(ctrl.is_fullscreen());
    assert!(!ctrl.toggle_fullscreen());
}

#[test]
fn test_element_play_noop_when_already_playing() {
    let mut media = MediaElement::new();
    media.load("http://example.com/stream.ts", None);
    let t0 = Instant::now();
    media.tick(t0);
    media.poll_events();
    media.play();
    assert!(media.poll_events().is_empty());
}

#[test]
fn test_element_seek_emits_timeupdate() {
    let mut media = MediaElement::new();
    media.load("http://example.com/stream.ts", None);
    let t0 = Instant::now();
    media.tick(t0);
    media.poll_events();
    media.seek(12.5);
    assert_eq!(media.poll_events(), vec![MediaEvent::TimeUpdate(12.5)]);
}

#[test]
fn test_format_time() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(65.4), "1:05");
    assert_eq!(format_time(600.0), "10:00");
    assert_eq!(format_time(-3.0), "0:00");
}
