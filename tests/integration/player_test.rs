//! Integration tests for the timeline player

use std::time::Duration;

use castplay::player::{ErrorKind, PlayerError, PlayerEvent, PlayerState, MAX_SCHEDULED_DELAY};
use castplay::terminal::SurfaceCommand;
use castplay::transport::{FileTransport, MemoryTransport};

use crate::helpers::{drain, fixtures_dir, load_fixture, temp_fixture, test_player, v3_cast};

/// Ten output events, 100 ms apart, writing "0".."9".
fn ten_events() -> String {
    let events: Vec<(f64, &str, String)> = (0..10).map(|i| (0.1, "o", i.to_string())).collect();
    let borrowed: Vec<(f64, &str, &str)> =
        events.iter().map(|(d, c, s)| (*d, *c, s.as_str())).collect();
    v3_cast(80, 24, &borrowed)
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn load_resizes_surface_and_notifies() {
    let (mut player, _clock) = test_player();
    let rx = player.subscribe();

    player.load(&load_fixture("sample_v3.cast")).unwrap();

    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(player.position(), 0);
    assert_eq!(player.surface().size(), Some((100, 30)));
    assert_eq!(player.surface().clear_count(), 0);
    assert!(matches!(
        drain(&rx).as_slice(),
        [PlayerEvent::Loaded {
            width: 100,
            height: 30,
            ..
        }]
    ));
}

#[test]
fn failed_load_without_session_stays_idle() {
    let (mut player, _clock) = test_player();
    let rx = player.subscribe();

    let err = player.load("{not json").unwrap_err();

    assert!(matches!(err, PlayerError::Format(_)));
    assert_eq!(player.state(), PlayerState::Idle);
    assert!(player.session().is_none());
    assert!(matches!(
        drain(&rx).as_slice(),
        [PlayerEvent::Error {
            kind: ErrorKind::Format,
            ..
        }]
    ));
}

#[test]
fn failed_load_keeps_previous_session_paused() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.seek(4);
    player.play();
    assert!(player.is_playing());

    assert!(player.load("{\"version\": 9}").is_err());

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(player.position(), 4);
    assert_eq!(player.len(), 10);
}

#[test]
fn load_while_playing_cancels_pending_event() {
    let (mut player, clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.play();
    let rx = player.subscribe();

    player
        .load(&v3_cast(100, 30, &[(0.5, "o", "b0"), (0.5, "o", "b1")]))
        .unwrap();

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(player.position(), 0);
    assert_eq!(player.time_until_next(), None);

    clock.advance_ms(150);
    assert_eq!(player.tick(), 0);
    assert_eq!(player.surface().contents(), "");

    assert_eq!(
        drain(&rx),
        vec![
            PlayerEvent::Toggled { playing: false },
            PlayerEvent::Loaded {
                width: 100,
                height: 30,
                events: 2,
            },
        ]
    );
}

#[test]
fn load_from_memory_transport() {
    let transport = MemoryTransport::new().with("demo", load_fixture("with_markers.cast"));
    let (mut player, _clock) = test_player();

    player.load_from(&transport, "demo").unwrap();
    assert_eq!(player.len(), 5);
    assert_eq!(player.markers().len(), 2);
}

#[test]
fn load_from_file_transport() {
    let (_dir, path) = temp_fixture("sample_v2.cast");
    let (mut player, _clock) = test_player();

    player
        .load_from(&FileTransport::new(), path.to_str().unwrap())
        .unwrap();
    assert_eq!(player.len(), 4);
}

#[test]
fn transport_failure_is_reported() {
    let (mut player, _clock) = test_player();
    let rx = player.subscribe();

    let err = player
        .load_from(&FileTransport::with_base_dir(fixtures_dir()), "missing.cast")
        .unwrap_err();

    assert!(matches!(err, PlayerError::Transport(_)));
    assert!(matches!(
        drain(&rx).as_slice(),
        [PlayerEvent::Error {
            kind: ErrorKind::Transport,
            ..
        }]
    ));
}

// ============================================================================
// Timed playback
// ============================================================================

#[test]
fn events_fire_only_when_due() {
    let (mut player, clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.play();

    assert_eq!(player.time_until_next(), Some(Duration::from_millis(100)));
    clock.advance_ms(99);
    assert_eq!(player.tick(), 0);

    clock.advance_ms(1);
    assert_eq!(player.tick(), 1);
    assert_eq!(player.surface().contents(), "0");
    assert_eq!(player.position(), 1);
}

#[test]
fn play_emits_started_and_toggled() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    let rx = player.subscribe();

    player.play();
    player.play();

    assert_eq!(
        drain(&rx),
        vec![PlayerEvent::Started, PlayerEvent::Toggled { playing: true }]
    );
}

#[test]
fn play_without_session_is_a_noop() {
    let (mut player, _clock) = test_player();
    player.play();

    assert_eq!(player.state(), PlayerState::Idle);
    assert!(!player.is_playing());
}

#[test]
fn pause_then_play_waits_the_full_delay_again() {
    let (mut player, clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.play();

    clock.advance_ms(80);
    player.pause();
    assert!(!player.is_playing());
    assert_eq!(player.position(), 0);

    player.play();
    clock.advance_ms(80);
    assert_eq!(player.tick(), 0, "fired before the full delay elapsed");
    assert_eq!(player.surface().contents(), "");

    clock.advance_ms(20);
    assert_eq!(player.tick(), 1);
    assert_eq!(player.surface().contents(), "0");
}

#[test]
fn pause_is_idempotent() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    let rx = player.subscribe();

    player.pause();
    player.play();
    player.pause();
    player.pause();

    let toggles: Vec<_> = drain(&rx)
        .into_iter()
        .filter(|e| matches!(e, PlayerEvent::Toggled { playing: false }))
        .collect();
    assert_eq!(toggles.len(), 1);
}

#[test]
fn end_of_session_fires_ended_once() {
    let (mut player, clock) = test_player();
    player.load(&ten_events()).unwrap();
    let rx = player.subscribe();
    player.play();

    clock.advance_ms(5_000);
    assert_eq!(player.tick(), 10);
    assert_eq!(player.tick(), 0);

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(player.position(), 10);
    assert_eq!(player.surface().contents(), "0123456789");

    let ended = drain(&rx)
        .into_iter()
        .filter(|e| *e == PlayerEvent::Ended)
        .count();
    assert_eq!(ended, 1);
}

#[test]
fn empty_session_play_ends_without_arming() {
    let (mut player, _clock) = test_player();
    player.load(&load_fixture("empty.cast")).unwrap();
    let rx = player.subscribe();

    player.play();

    assert!(!player.is_playing());
    assert_eq!(player.next_deadline(), None);
    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(drain(&rx), vec![PlayerEvent::Ended]);
}

#[test]
fn markers_notify_during_playback() {
    let (mut player, clock) = test_player();
    player.load(&load_fixture("with_markers.cast")).unwrap();
    let rx = player.subscribe();
    player.play();

    clock.advance_ms(10_000);
    player.tick();

    let labels: Vec<_> = drain(&rx)
        .into_iter()
        .filter_map(|e| match e {
            PlayerEvent::MarkerReached { index, label } => Some((index, label)),
            _ => None,
        })
        .collect();
    assert_eq!(
        labels,
        vec![(1, "build done".to_string()), (3, "tests done".to_string())]
    );
}

#[test]
fn idle_time_limit_caps_waits() {
    let (mut player, _clock) = test_player();
    let raw = "{\"version\": 3, \"term\": {\"cols\": 80, \"rows\": 24}, \"idle_time_limit\": 1.0}\n\
               [30.0, \"o\", \"late\"]\n";
    player.load(raw).unwrap();
    player.play();

    assert_eq!(player.time_until_next(), Some(Duration::from_secs(1)));
    assert_eq!(player.session().unwrap().events[0].delay_ms, 30_000.0);
}

#[test]
fn enormous_recorded_gaps_play_without_panicking() {
    for gap in [1e19, 1e30] {
        let (mut player, clock) = test_player();
        player.load(&v3_cast(80, 24, &[(gap, "o", "x")])).unwrap();
        player.play();

        assert!(player.is_playing());
        assert_eq!(player.time_until_next(), Some(MAX_SCHEDULED_DELAY));

        clock.advance(Duration::from_secs(24 * 60 * 60));
        assert_eq!(player.tick(), 0);
        assert_eq!(player.surface().contents(), "");
    }
}

#[test]
fn malformed_resize_does_not_stop_playback() {
    let (mut player, clock) = test_player();
    player.load(&load_fixture("bad_resize.cast")).unwrap();
    let rx = player.subscribe();
    player.play();

    clock.advance_ms(1_000);
    assert_eq!(player.tick(), 3);

    assert_eq!(player.surface().contents(), "before after");
    assert_eq!(player.surface().size(), Some((80, 24)));
    assert!(drain(&rx).iter().any(|e| matches!(
        e,
        PlayerEvent::Error {
            kind: ErrorKind::MalformedEvent,
            ..
        }
    )));
}

// ============================================================================
// Seeking
// ============================================================================

#[test]
fn seek_sets_cursor_and_replays_prefix() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();

    for k in 0..=10 {
        player.seek(k);
        assert_eq!(player.position(), k);
        let expected: String = (0..k).map(|i| i.to_string()).collect();
        assert_eq!(player.surface().contents(), expected);
    }
}

#[test]
fn seek_round_trip_matches_direct_seek() {
    let (mut direct, _c1) = test_player();
    direct.load(&load_fixture("sample_v3.cast")).unwrap();
    direct.seek(4);

    let (mut round_trip, _c2) = test_player();
    round_trip.load(&load_fixture("sample_v3.cast")).unwrap();
    round_trip.seek(4);
    round_trip.seek(0);
    round_trip.seek(4);

    assert_eq!(direct.surface().contents(), round_trip.surface().contents());
    assert_eq!(direct.surface().size(), round_trip.surface().size());
    assert_eq!(round_trip.position(), 4);
}

#[test]
fn forward_seek_appends_without_clearing() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.seek(3);
    player.surface_mut().reset_history();

    player.seek(7);

    let expected: Vec<_> = ["3", "4", "5", "6"]
        .iter()
        .map(|s| SurfaceCommand::Write(s.to_string()))
        .collect();
    assert_eq!(player.surface().clear_count(), 0);
    assert_eq!(player.surface().commands(), expected.as_slice());
}

#[test]
fn backward_seek_clears_once_and_replays() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.seek(7);
    player.surface_mut().reset_history();

    player.seek(3);

    assert_eq!(player.surface().clear_count(), 1);
    assert_eq!(player.surface().commands()[0], SurfaceCommand::Clear);
    assert_eq!(player.surface().write_count(), 3);
    assert_eq!(player.surface().contents(), "012");
}

#[test]
fn seek_to_same_index_clears_and_replays() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.seek(7);
    player.surface_mut().reset_history();

    player.seek(7);

    assert_eq!(player.surface().clear_count(), 1);
    assert_eq!(player.surface().write_count(), 7);
    assert_eq!(player.surface().contents(), "0123456");
}

#[test]
fn seek_clamps_out_of_range_targets() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();

    player.seek(99);
    assert_eq!(player.position(), 10);

    player.seek_relative(-99);
    assert_eq!(player.position(), 0);
}

#[test]
fn seek_relative_moves_from_cursor() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();

    player.seek_relative(4);
    player.seek_relative(-1);
    assert_eq!(player.position(), 3);
}

#[test]
fn seek_without_session_is_a_noop() {
    let (mut player, _clock) = test_player();
    player.seek(3);
    assert_eq!(player.position(), 0);
    assert!(player.surface().commands().is_empty());
}

#[test]
fn seek_while_playing_rearms_at_new_cursor() {
    let (mut player, clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.play();
    clock.advance_ms(50);

    player.seek(5);

    assert!(player.is_playing());
    assert_eq!(player.time_until_next(), Some(Duration::from_millis(100)));
    clock.advance_ms(100);
    assert_eq!(player.tick(), 1);
    assert_eq!(player.surface().contents(), "012345");
}

#[test]
fn seek_to_end_while_playing_finishes() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();
    player.play();
    let rx = player.subscribe();

    player.seek(10);

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(
        drain(&rx),
        vec![
            PlayerEvent::SeekCompleted { index: 10 },
            PlayerEvent::Ended
        ]
    );
}

#[test]
fn seek_while_paused_stays_paused() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();

    player.seek(5);
    assert!(!player.is_playing());
    assert_eq!(player.state(), PlayerState::Paused);
}

#[test]
fn seek_does_not_report_markers() {
    let (mut player, _clock) = test_player();
    player.load(&load_fixture("with_markers.cast")).unwrap();
    let rx = player.subscribe();

    player.seek(5);

    assert!(!drain(&rx)
        .iter()
        .any(|e| matches!(e, PlayerEvent::MarkerReached { .. })));
}

#[test]
fn seek_to_time_lands_after_due_events() {
    let (mut player, _clock) = test_player();
    player.load(&ten_events()).unwrap();

    player.seek_to_time(350.0);
    assert_eq!(player.position(), 3);

    player.seek_time_relative(200.0);
    assert_eq!(player.position(), 5);
}

#[test]
fn marker_navigation() {
    let (mut player, _clock) = test_player();
    player.load(&load_fixture("with_markers.cast")).unwrap();

    assert!(player.next_marker());
    assert_eq!(player.position(), 2);
    assert!(player.next_marker());
    assert_eq!(player.position(), 4);
    assert!(!player.next_marker());

    assert!(player.prev_marker());
    assert_eq!(player.position(), 2);
    assert!(!player.prev_marker());
    assert_eq!(player.position(), 0);
}

#[test]
fn backward_seek_restores_recorded_size() {
    let (mut player, _clock) = test_player();
    player.load(&load_fixture("sample_v3.cast")).unwrap();

    player.seek(6);
    assert_eq!(player.surface().size(), Some((120, 40)));

    player.seek(1);
    assert_eq!(player.surface().size(), Some((100, 30)));
}
