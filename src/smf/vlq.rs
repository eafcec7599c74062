//! Variable-length quantities: MIDI's 7-bits-per-byte delta-time encoding.
//!
//! Big-endian groups, continuation bit set on every byte but the last, and
//! never more bytes than the value needs. Four bytes carry at most
//! [`MAX_DELTA`].

use crate::error::{GenError, Result};
use crate::event::timing::MAX_DELTA;

/// Longest encoding, in bytes.
pub const MAX_VLQ_BYTES: usize = 4;

/// Append the VLQ encoding of `value` to `buf`.
pub fn write_vlq(buf: &mut Vec<u8>, value: u32) -> Result<()> {
    if value > MAX_DELTA {
        return Err(GenError::serialization(format!(
            "delta time {value} exceeds the 28-bit VLQ limit"
        )));
    }
    let mut groups = [0u8; MAX_VLQ_BYTES];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for (i, group) in groups[..len].iter().enumerate().rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        buf.push(group | continuation);
    }
    Ok(())
}

/// Number of bytes `write_vlq` emits for `value`.
pub fn encoded_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        _ => 4,
    }
}
