//! Standard MIDI File encoding: header and track chunks with
//! variable-length delta times.

pub mod vlq;
pub mod writer;

pub use writer::{serialize, span_len, TRACK_PREAMBLE_LEN};
