//! One request/response exchange over TCP.
//!
//! A [`Connection`] is opened per request and consumed by the call that
//! sends it, so the socket is closed on every exit path: when the call
//! returns, when the returned [`FrameStream`] is exhausted, or when either is
//! dropped early.
use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use feed_common::codec::{Frame, FrameBuffer, RECORD_LEN};
use feed_common::{FeedError, Result};
use log::debug;

use crate::config::ClientConfig;

const READ_CHUNK: usize = 4096;

/// How a drained stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The peer closed the stream (zero-byte read).
    Closed,
    /// A read failed; frames yielded before it remain valid.
    Failed(ErrorKind),
}

/// An open TCP connection to the feed.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// Connect to the configured endpoint, trying every resolved address.
    ///
    /// Fails with [`FeedError::Connection`] if no address accepts within the
    /// connect deadline. The I/O deadline is applied to the open stream.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let addrs = endpoint
            .to_socket_addrs()
            .map_err(|e| FeedError::connection(&endpoint, e))?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, config.connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(config.io_timeout))?;
                    stream.set_write_timeout(Some(config.io_timeout))?;
                    debug!("Connected to {}", addr);
                    return Ok(Self { stream, peer: addr });
                }
                Err(e) => {
                    debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }
        let source = last_err
            .unwrap_or_else(|| io::Error::new(ErrorKind::NotFound, "no address resolved"));
        Err(FeedError::connection(endpoint, source))
    }

    /// Address of the connected peer.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Write `request`, then hand back a lazy iterator over every whole
    /// record frame the peer sends until it closes or a read fails.
    pub fn send_and_drain_all(mut self, request: &[u8]) -> Result<FrameStream> {
        self.stream.write_all(request)?;
        Ok(FrameStream {
            conn: Some(self),
            buffer: FrameBuffer::new(),
            chunk: vec![0u8; READ_CHUNK],
            end: None,
            discarded: 0,
        })
    }

    /// Write `request` and read once.
    ///
    /// Returns the frame only when that single read produced exactly one
    /// record's worth of bytes. A short read, an empty answer or a read error
    /// all yield `None`.
    pub fn send_and_read_one(mut self, request: &[u8]) -> Result<Option<Frame>> {
        self.stream.write_all(request)?;
        let mut frame = [0u8; RECORD_LEN];
        let read = loop {
            match self.stream.read(&mut frame) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                other => break other,
            }
        };
        match read {
            Ok(RECORD_LEN) => Ok(Some(frame)),
            Ok(n) => {
                debug!("{} answered with {} bytes, expected {}", self.peer, n, RECORD_LEN);
                Ok(None)
            }
            Err(e) => {
                debug!("Read from {} failed: {}", self.peer, e);
                Ok(None)
            }
        }
    }
}

/// Frames read from a drained connection, in arrival order.
///
/// Bytes are buffered until a whole frame is available. When the stream ends
/// the connection is dropped and any incomplete trailing bytes are discarded;
/// [`FrameStream::end`] and [`FrameStream::discarded`] report what happened.
#[derive(Debug)]
pub struct FrameStream {
    conn: Option<Connection>,
    buffer: FrameBuffer,
    chunk: Vec<u8>,
    end: Option<StreamEnd>,
    discarded: usize,
}

impl FrameStream {
    /// Why the stream stopped, once it has.
    pub fn end(&self) -> Option<StreamEnd> {
        self.end
    }

    /// Trailing bytes dropped because they never formed a whole frame.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    fn finish(&mut self, end: StreamEnd) {
        self.conn = None;
        self.discarded = self.buffer.discard();
        self.end = Some(end);
    }
}

impl Iterator for FrameStream {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        loop {
            if let Some(frame) = self.buffer.next_frame() {
                return Some(frame);
            }
            let conn = self.conn.as_mut()?;
            match conn.stream.read(&mut self.chunk) {
                Ok(0) => self.finish(StreamEnd::Closed),
                Ok(n) => self.buffer.extend(&self.chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("Read from {} failed: {}", conn.peer, e);
                    self.finish(StreamEnd::Failed(e.kind()));
                }
            }
        }
    }
}
