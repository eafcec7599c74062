//! SMF writer: encodes a [`Composition`] as a format 1 Standard MIDI File.
//!
//! Every field is range-checked as it is written. A value that does not fit
//! its byte width is a `SerializationError`, never a truncated byte.

use tracing::debug;

use super::vlq::{encoded_len, write_vlq};
use crate::error::{GenError, Result};
use crate::event::timing::{MAX_TEMPO, MAX_TICKS_PER_BEAT};
use crate::event::{Event, EventKind};
use crate::track::{Composition, Track};

const HEADER_MAGIC: &[u8; 4] = b"MThd";
const TRACK_MAGIC: &[u8; 4] = b"MTrk";
const HEADER_LENGTH: u32 = 6;

/// Format 1: several tracks played simultaneously.
const FORMAT_PARALLEL: u16 = 1;

const STATUS_NOTE_OFF: u8 = 0x80;
const STATUS_NOTE_ON: u8 = 0x90;
const STATUS_PROGRAM_CHANGE: u8 = 0xC0;
const STATUS_META: u8 = 0xFF;
const META_TEMPO: u8 = 0x51;
const META_END_OF_TRACK: u8 = 0x2F;

/// Track bytes outside its notes: tempo, program change, End of Track.
pub const TRACK_PREAMBLE_LEN: u64 = 7 + 3 + 4;

/// Encoded size of one note-on/note-off pair.
pub fn span_len(lead_in: u32, length: u32) -> u64 {
    (encoded_len(lead_in) + encoded_len(length)) as u64 + 2 * 3
}

/// Encode the whole composition into an in-memory SMF image.
pub fn serialize(composition: &Composition) -> Result<Vec<u8>> {
    let division = composition.ticks_per_beat;
    if division == 0 || division > MAX_TICKS_PER_BEAT {
        return Err(GenError::serialization(format!(
            "ticks per beat {division} is not a metrical division"
        )));
    }
    let track_count = u16::try_from(composition.tracks.len())
        .map_err(|_| GenError::serialization("too many tracks for one file"))?;

    let mut buf = Vec::new();
    write_header(&mut buf, track_count, division);
    for track in &composition.tracks {
        write_track(&mut buf, track)?;
    }
    debug!(bytes = buf.len(), tracks = track_count, "composition serialized");
    Ok(buf)
}

fn write_header(buf: &mut Vec<u8>, track_count: u16, division: u16) {
    buf.extend_from_slice(HEADER_MAGIC);
    buf.extend_from_slice(&HEADER_LENGTH.to_be_bytes());
    buf.extend_from_slice(&FORMAT_PARALLEL.to_be_bytes());
    buf.extend_from_slice(&track_count.to_be_bytes());
    buf.extend_from_slice(&division.to_be_bytes());
}

/// Write one `MTrk` chunk, closing it with End of Track.
fn write_track(buf: &mut Vec<u8>, track: &Track) -> Result<()> {
    if let Some((channel, note)) = track.unbalanced_note() {
        return Err(GenError::serialization(format!(
            "{} track leaves note {note} on channel {channel} unpaired",
            track.role.name()
        )));
    }

    let mut content = Vec::new();
    for event in &track.events {
        encode_event(&mut content, event)?;
    }
    content.extend_from_slice(&[0x00, STATUS_META, META_END_OF_TRACK, 0x00]);

    let length = u32::try_from(content.len())
        .map_err(|_| GenError::serialization("track chunk exceeds 4 GiB"))?;
    buf.extend_from_slice(TRACK_MAGIC);
    buf.extend_from_slice(&length.to_be_bytes());
    buf.extend_from_slice(&content);
    Ok(())
}

/// Append one event: delta time, status byte, data bytes.
fn encode_event(buf: &mut Vec<u8>, event: &Event) -> Result<()> {
    write_vlq(buf, event.delta_time)?;
    match event.kind {
        EventKind::ProgramChange { channel, program } => {
            buf.push(STATUS_PROGRAM_CHANGE | check_channel(channel)?);
            buf.push(check_data("program", program)?);
        }
        EventKind::NoteOn {
            channel,
            note,
            velocity,
        } => {
            buf.push(STATUS_NOTE_ON | check_channel(channel)?);
            buf.push(check_data("note", note)?);
            buf.push(check_data("velocity", velocity)?);
        }
        EventKind::NoteOff {
            channel,
            note,
            velocity,
        } => {
            buf.push(STATUS_NOTE_OFF | check_channel(channel)?);
            buf.push(check_data("note", note)?);
            buf.push(check_data("velocity", velocity)?);
        }
        EventKind::Tempo { micros_per_beat } => {
            if micros_per_beat > MAX_TEMPO {
                return Err(GenError::serialization(format!(
                    "tempo {micros_per_beat} does not fit in 3 bytes"
                )));
            }
            buf.extend_from_slice(&[STATUS_META, META_TEMPO, 0x03]);
            buf.extend_from_slice(&micros_per_beat.to_be_bytes()[1..]);
        }
    }
    Ok(())
}

fn check_channel(channel: u8) -> Result<u8> {
    if channel > 0x0F {
        return Err(GenError::serialization(format!(
            "channel {channel} is outside 0-15"
        )));
    }
    Ok(channel)
}

fn check_data(field: &str, value: u8) -> Result<u8> {
    if value > 0x7F {
        return Err(GenError::serialization(format!(
            "{field} {value} is outside 0-127"
        )));
    }
    Ok(value)
}
