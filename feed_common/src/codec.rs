//! Binary wire codec for the record feed.
//!
//! Requests are 2-byte frames: a call-type tag followed by one parameter
//! byte. Responses are a concatenation of fixed 17-byte records:
//!
//! | offset | width | field      | encoding              |
//! |--------|-------|------------|-----------------------|
//! | 0      | 4     | `symbol`   | ASCII text            |
//! | 4      | 1     | `side`     | ASCII text            |
//! | 5      | 4     | `quantity` | big-endian `i32`      |
//! | 9      | 4     | `price`    | big-endian `i32`      |
//! | 13     | 4     | `sequence` | big-endian `i32`      |
//!
//! The resend parameter is a single byte, so a resend for sequence `n`
//! actually asks for `n mod 256`. Sequences above
//! [`MAX_RESENDABLE_SEQUENCE`] alias onto lower ones; this is a limit of the
//! wire format and is kept for compatibility with existing servers.
use strum_macros::Display;

use crate::error::FeedError;
use crate::record::{Record, SYMBOL_LEN};
use crate::result::Result;

/// Width of one record frame on the wire.
pub const RECORD_LEN: usize = 17;
/// Width of one request frame on the wire.
pub const REQUEST_LEN: usize = 2;
/// Largest sequence number a resend request can address without aliasing.
pub const MAX_RESENDABLE_SEQUENCE: i32 = u8::MAX as i32;

const SIDE_OFFSET: usize = 4;
const QUANTITY_OFFSET: usize = 5;
const PRICE_OFFSET: usize = 9;
const SEQUENCE_OFFSET: usize = 13;

/// A single raw record frame.
pub type Frame = [u8; RECORD_LEN];

/// Request call types understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[repr(u8)]
pub enum CallType {
    /// Stream every record, then close.
    FetchAll = 1,
    /// Send back at most one record.
    Resend = 2,
}

/// A decoded request frame, as seen by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Stream every record.
    FetchAll,
    /// Resend the record whose sequence is congruent to the byte modulo 256.
    Resend(u8),
}

/// Encodes the "fetch all" request: `{1, 0}`.
pub fn encode_fetch_all_request() -> [u8; REQUEST_LEN] {
    [CallType::FetchAll as u8, 0]
}

/// Encodes a resend request: `{2, sequence mod 256}`.
///
/// The parameter is truncated to one byte, so `300` and `44` produce the same
/// frame. Callers must not rely on resends above [`MAX_RESENDABLE_SEQUENCE`].
pub fn encode_resend_request(sequence: i32) -> [u8; REQUEST_LEN] {
    [CallType::Resend as u8, resend_key(sequence)]
}

/// The byte a resend request for `sequence` carries on the wire.
pub fn resend_key(sequence: i32) -> u8 {
    sequence.rem_euclid(256) as u8
}

/// Decodes a request frame.
pub fn decode_request(buf: &[u8]) -> Result<Request> {
    if buf.len() < REQUEST_LEN {
        return Err(FeedError::MalformedRequest(format!(
            "expected {} bytes, got {}",
            REQUEST_LEN,
            buf.len()
        )));
    }
    match buf[0] {
        t if t == CallType::FetchAll as u8 => Ok(Request::FetchAll),
        t if t == CallType::Resend as u8 => Ok(Request::Resend(buf[1])),
        other => Err(FeedError::MalformedRequest(format!(
            "unknown call type {}",
            other
        ))),
    }
}

/// Decodes one record from the first 17 bytes of `buf`.
///
/// Fails with [`FeedError::MalformedRecord`] when fewer than 17 bytes are
/// supplied; nothing is decoded in that case.
pub fn decode_record(buf: &[u8]) -> Result<Record> {
    if buf.len() < RECORD_LEN {
        return Err(FeedError::MalformedRecord {
            expected: RECORD_LEN,
            actual: buf.len(),
        });
    }
    Ok(Record {
        symbol: ascii_text(&buf[..SYMBOL_LEN]),
        side: ascii_text(&buf[SIDE_OFFSET..QUANTITY_OFFSET]),
        quantity: read_i32_be(buf, QUANTITY_OFFSET),
        price: read_i32_be(buf, PRICE_OFFSET),
        sequence: read_i32_be(buf, SEQUENCE_OFFSET),
    })
}

/// Encodes a record into its 17-byte wire form.
///
/// Text fields are space-padded or truncated to their width; non-ASCII
/// characters are written as `?`.
pub fn encode_record(record: &Record) -> Frame {
    let mut frame = [0u8; RECORD_LEN];
    write_ascii(&mut frame[..SYMBOL_LEN], &record.symbol);
    write_ascii(&mut frame[SIDE_OFFSET..QUANTITY_OFFSET], &record.side);
    frame[QUANTITY_OFFSET..PRICE_OFFSET].copy_from_slice(&record.quantity.to_be_bytes());
    frame[PRICE_OFFSET..SEQUENCE_OFFSET].copy_from_slice(&record.price.to_be_bytes());
    frame[SEQUENCE_OFFSET..RECORD_LEN].copy_from_slice(&record.sequence.to_be_bytes());
    frame
}

fn read_i32_be(buf: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

fn ascii_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

fn write_ascii(dst: &mut [u8], text: &str) {
    let mut chars = text.chars();
    for slot in dst.iter_mut() {
        *slot = match chars.next() {
            Some(c) if c.is_ascii() => c as u8,
            Some(_) => b'?',
            None => b' ',
        };
    }
}

/// Accumulates raw bytes from a stream and hands out whole record frames.
///
/// Bytes that never complete a frame stay pending; the owner decides what to
/// do with them once the stream ends.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends freshly read bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Removes and returns the oldest complete frame, if any.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.buf.len() < RECORD_LEN {
            return None;
        }
        let mut frame = [0u8; RECORD_LEN];
        frame.copy_from_slice(&self.buf[..RECORD_LEN]);
        self.buf.drain(..RECORD_LEN);
        Some(frame)
    }

    /// Number of buffered bytes that do not yet form a frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drops the pending bytes, returning how many there were.
    pub fn discard(&mut self) -> usize {
        let n = self.buf.len();
        self.buf.clear();
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        let mut frame = [0u8; RECORD_LEN];
        frame[..4].copy_from_slice(b"MSFT");
        frame[4] = b'B';
        frame[5..9].copy_from_slice(&50i32.to_be_bytes());
        frame[9..13].copy_from_slice(&(-1234i32).to_be_bytes());
        frame[13..17].copy_from_slice(&7i32.to_be_bytes());
        frame
    }

    #[test]
    fn fetch_all_request_is_fixed() {
        assert_eq!(encode_fetch_all_request(), [1, 0]);
    }

    #[test]
    fn resend_request_carries_sequence_byte() {
        assert_eq!(encode_resend_request(3), [2, 3]);
        assert_eq!(encode_resend_request(255), [2, 255]);
        assert_eq!(encode_resend_request(256), [2, 0]);
    }

    #[test]
    fn resend_above_255_aliases_lower_sequence() {
        assert_eq!(encode_resend_request(300), encode_resend_request(44));
        assert_eq!(encode_resend_request(300), [2, 44]);
    }

    #[test]
    fn decode_reads_fixed_offsets() {
        let record = decode_record(&sample_frame()).unwrap();
        assert_eq!(record, Record::new("MSFT", "B", 50, -1234, 7));
    }

    #[test]
    fn decode_then_encode_reproduces_bytes() {
        let frame = sample_frame();
        let record = decode_record(&frame).unwrap();
        assert_eq!(encode_record(&record), frame);
    }

    #[test]
    fn decode_uses_big_endian() {
        let mut frame = sample_frame();
        frame[13..17].copy_from_slice(&[0x00, 0x00, 0x01, 0x02]);
        assert_eq!(decode_record(&frame).unwrap().sequence, 258);
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let frame = sample_frame();
        match decode_record(&frame[..16]) {
            Err(FeedError::MalformedRecord { expected, actual }) => {
                assert_eq!(expected, 17);
                assert_eq!(actual, 16);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(decode_record(&[]).is_err());
    }

    #[test]
    fn decode_ignores_bytes_past_one_frame() {
        let mut long = sample_frame().to_vec();
        long.extend_from_slice(&[0xFF; 5]);
        assert_eq!(decode_record(&long).unwrap().sequence, 7);
    }

    #[test]
    fn non_ascii_text_decodes_to_question_mark() {
        let mut frame = sample_frame();
        frame[0] = 0xC3;
        assert_eq!(decode_record(&frame).unwrap().symbol, "?SFT");
    }

    #[test]
    fn encode_pads_and_truncates_text() {
        let frame = encode_record(&Record::new("GE", "SELL", 1, 2, 3));
        assert_eq!(&frame[..5], b"GE  S");
    }

    #[test]
    fn decode_request_kinds() {
        assert_eq!(decode_request(&[1, 0]).unwrap(), Request::FetchAll);
        assert_eq!(decode_request(&[1, 9]).unwrap(), Request::FetchAll);
        assert_eq!(decode_request(&[2, 44]).unwrap(), Request::Resend(44));
        assert!(matches!(
            decode_request(&[3, 0]),
            Err(FeedError::MalformedRequest(_))
        ));
        assert!(matches!(
            decode_request(&[1]),
            Err(FeedError::MalformedRequest(_))
        ));
    }

    #[test]
    fn call_type_display() {
        assert_eq!(CallType::FetchAll.to_string(), "FetchAll");
        assert_eq!(CallType::Resend.to_string(), "Resend");
    }

    #[test]
    fn frame_buffer_yields_only_whole_frames() {
        let frame = sample_frame();
        let mut buffer = FrameBuffer::new();
        buffer.extend(&frame[..10]);
        assert!(buffer.next_frame().is_none());
        buffer.extend(&frame[10..]);
        buffer.extend(&frame[..3]);
        assert_eq!(buffer.next_frame(), Some(frame));
        assert!(buffer.next_frame().is_none());
        assert_eq!(buffer.pending(), 3);
        assert_eq!(buffer.discard(), 3);
        assert_eq!(buffer.pending(), 0);
    }
}
