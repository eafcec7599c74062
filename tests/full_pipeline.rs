//! Full pipeline integration tests: config → compose → SMF bytes.
//!
//! The written bytes are decoded with `midly` and checked against the
//! composition they came from.

use dancemidi::config::GenConfig;
use dancemidi::event::{find_unbalanced, Event, EventKind, VelocityRange};
use dancemidi::instrument::Role;
use dancemidi::{build, ErrorKind, Rendered};
use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

const SEED: u64 = 42;

fn seeded(config: GenConfig) -> GenConfig {
    GenConfig {
        seed: Some(SEED),
        ..config
    }
}

/// A file as `midly` sees it, with events mapped back to crate events.
struct Decoded {
    format: Format,
    division: u16,
    tracks: Vec<Vec<Event>>,
}

fn to_event(event: &TrackEvent) -> Event {
    let delta = event.delta.as_int();
    match event.kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            match message {
                MidiMessage::NoteOn { key, vel } => {
                    Event::note_on(delta, channel, key.as_int(), vel.as_int())
                }
                MidiMessage::NoteOff { key, vel } => Event {
                    delta_time: delta,
                    kind: EventKind::NoteOff {
                        channel,
                        note: key.as_int(),
                        velocity: vel.as_int(),
                    },
                },
                MidiMessage::ProgramChange { program } => {
                    Event::program_change(delta, channel, program.as_int())
                }
                other => panic!("unexpected channel message {other:?}"),
            }
        }
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Event::tempo(delta, tempo.as_int()),
        other => panic!("unexpected event {other:?}"),
    }
}

/// Events before End of Track, which must close the track at delta 0.
fn track_events(track: &[TrackEvent]) -> Vec<Event> {
    let (last, body) = track.split_last().expect("track has no events");
    assert_eq!(last.kind, TrackEventKind::Meta(MetaMessage::EndOfTrack));
    assert_eq!(last.delta.as_int(), 0);
    body.iter().map(to_event).collect()
}

fn decode(bytes: &[u8]) -> Decoded {
    let smf = Smf::parse(bytes).expect("midly rejected the file");
    let division = match smf.header.timing {
        Timing::Metrical(ticks) => ticks.as_int(),
        Timing::Timecode(..) => panic!("expected metrical timing"),
    };
    Decoded {
        format: smf.header.format,
        division,
        tracks: smf.tracks.iter().map(|t| track_events(t)).collect(),
    }
}

/// Length fields of every `MTrk` chunk, checked against the bytes they frame.
fn chunk_lengths(bytes: &[u8]) -> Vec<u32> {
    let mut lengths = Vec::new();
    let mut pos = 14;
    while pos < bytes.len() {
        assert_eq!(&bytes[pos..pos + 4], b"MTrk");
        let len = u32::from_be_bytes(bytes[pos + 4..pos + 8].try_into().unwrap());
        let body_end = pos + 8 + len as usize;
        assert!(body_end <= bytes.len());
        // Each body ends exactly on its End of Track event.
        assert_eq!(&bytes[body_end - 4..body_end], &[0x00, 0xFF, 0x2F, 0x00]);
        lengths.push(len);
        pos = body_end;
    }
    assert_eq!(pos, bytes.len());
    lengths
}

fn decoded_default() -> (Rendered, Decoded) {
    let rendered = build(&seeded(GenConfig::default())).expect("build failed");
    let decoded = decode(&rendered.bytes);
    (rendered, decoded)
}

// =============================================================================
// Header and chunk framing
// =============================================================================

#[test]
fn header_reports_tracks_and_division() {
    let (rendered, decoded) = decoded_default();
    assert_eq!(&rendered.bytes[..4], b"MThd");
    assert_eq!(decoded.format, Format::Parallel);
    assert_eq!(&rendered.bytes[10..12], &4u16.to_be_bytes());
    assert_eq!(decoded.tracks.len(), rendered.composition.tracks.len());
    assert_eq!(decoded.tracks.len(), 4);
    assert_eq!(decoded.division, 480);
}

#[test]
fn custom_division_lands_in_header() {
    let config = seeded(GenConfig {
        ticks_per_beat: 96,
        ..GenConfig::default()
    });
    let rendered = build(&config).unwrap();
    assert_eq!(decode(&rendered.bytes).division, 96);
}

#[test]
fn chunk_lengths_match_their_bodies() {
    let (rendered, _) = decoded_default();
    assert_eq!(chunk_lengths(&rendered.bytes).len(), 4);
}

// =============================================================================
// Events survive the byte round trip
// =============================================================================

#[test]
fn decoded_events_match_composition() {
    let (rendered, decoded) = decoded_default();
    for (track, events) in rendered.composition.tracks.iter().zip(&decoded.tracks) {
        assert_eq!(&track.events, events, "{:?}", track.role);
    }
}

#[test]
fn deltas_decode_to_their_values() {
    let config = seeded(GenConfig {
        ticks_per_beat: 0x7FFF,
        ..GenConfig::default()
    });
    let rendered = build(&config).unwrap();
    let decoded = decode(&rendered.bytes);
    let deltas = |events: &[Event]| -> Vec<u32> { events.iter().map(|e| e.delta_time).collect() };
    for (track, events) in rendered.composition.tracks.iter().zip(&decoded.tracks) {
        assert_eq!(deltas(&track.events), deltas(events), "{:?}", track.role);
    }
    // Drum beats are separated by a full beat of 0x7FFF ticks.
    assert!(decoded.tracks[3].iter().any(|e| e.delta_time == 0x7FFF));
}

#[test]
fn decoded_tracks_keep_note_pairing() {
    for seed in [1, 2, 3, 99, 12345] {
        let config = GenConfig {
            seed: Some(seed),
            ..GenConfig::default()
        };
        let decoded = decode(&build(&config).unwrap().bytes);
        for events in &decoded.tracks {
            assert_eq!(find_unbalanced(events), None, "seed {seed}");
            let ons = events.iter().filter(|e| e.is_note_on()).count();
            let offs = events
                .iter()
                .filter(|e| matches!(e.kind, EventKind::NoteOff { .. }))
                .count();
            assert_eq!(ons, offs, "seed {seed}");
        }
    }
}

#[test]
fn tempo_replicated_on_every_track() {
    let (_, decoded) = decoded_default();
    for events in &decoded.tracks {
        assert_eq!(events[0], Event::tempo(0, 468_750));
    }
}

#[test]
fn program_changes_on_melodic_channels_only() {
    let (rendered, decoded) = decoded_default();
    for (track, events) in rendered.composition.tracks.iter().zip(&decoded.tracks) {
        let programs: Vec<(u8, u8)> = events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::ProgramChange { channel, program } => Some((channel, program)),
                _ => None,
            })
            .collect();
        if track.role == Role::Percussion {
            assert!(programs.is_empty());
        } else {
            assert_eq!(programs.len(), 1);
            let (channel, program) = programs[0];
            assert_eq!(channel, track.role.channel());
            assert!(track.role.programs().iter().any(|p| p.number() == program));
        }
    }
}

// =============================================================================
// Structure-driven cases
// =============================================================================

#[test]
fn single_pitch_scale_one_bar() {
    let config = seeded(GenConfig {
        bars: 1,
        notes_per_bar: 4,
        scale: vec![60],
        ..GenConfig::default()
    });
    let rendered = build(&config).unwrap();
    let notes = |role: Role| -> Vec<u8> {
        rendered
            .composition
            .track(role)
            .unwrap()
            .events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::NoteOn { note, .. } => Some(note),
                _ => None,
            })
            .collect()
    };
    assert_eq!(notes(Role::Main), vec![60, 60, 60, 60]);
    assert_eq!(notes(Role::Bass), vec![48, 48, 48, 48]);
    assert_eq!(notes(Role::Harmony), vec![65, 65, 65, 65]);
}

#[test]
fn zero_drum_bars_gives_tempo_and_end_only() {
    let config = seeded(GenConfig {
        drum_bars: 0,
        ..GenConfig::default()
    });
    let bytes = build(&config).unwrap().bytes;
    let drums = &decode(&bytes).tracks[3];
    assert_eq!(drums.len(), 1);
    assert!(matches!(drums[0].kind, EventKind::Tempo { .. }));
    // tempo (7 bytes) + end of track (4 bytes)
    assert_eq!(chunk_lengths(&bytes)[3], 11);
}

#[test]
fn same_seed_same_bytes() {
    let a = build(&seeded(GenConfig::default())).unwrap();
    let b = build(&seeded(GenConfig::default())).unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(a.file_name, b.file_name);
}

#[test]
fn different_seeds_differ_in_melody() {
    let a = build(&GenConfig {
        seed: Some(1),
        ..GenConfig::default()
    })
    .unwrap();
    let b = build(&GenConfig {
        seed: Some(2),
        ..GenConfig::default()
    })
    .unwrap();
    assert_ne!(a.bytes, b.bytes);
}

#[test]
fn unseeded_run_reports_its_seed() {
    let first = build(&GenConfig::default()).unwrap();
    let replay = build(&GenConfig {
        seed: Some(first.seed),
        ..GenConfig::default()
    })
    .unwrap();
    assert_eq!(first.bytes, replay.bytes);
}

// =============================================================================
// Configuration errors stop the pipeline
// =============================================================================

#[test]
fn config_errors() {
    let empty_scale = GenConfig {
        scale: Vec::new(),
        ..GenConfig::default()
    };
    let negative_bars = GenConfig {
        bars: -4,
        ..GenConfig::default()
    };
    let mut inverted = GenConfig::default();
    inverted.main.velocity = VelocityRange { min: 120, max: 80 };

    for config in [empty_scale, negative_bars, inverted] {
        let err = build(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(err.to_string().starts_with("ConfigError"));
    }
}
