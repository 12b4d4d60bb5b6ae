use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tokio::time::Instant;

use crate::packet::{Direction, Packet};

/// Decides when an idle gap on one direction means "packet complete".
///
/// Two states: idle (nothing buffered, no timer running) and accumulating.
/// Every new byte re-arms the timer; once the gap since the last byte
/// exceeds `max_delay`, the buffered bytes are flushed as one [`Packet`].
///
/// A direction that never goes quiet never flushes. Packets are byte bursts
/// separated by silence, nothing more.
#[derive(Debug)]
pub struct Framer {
    direction: Direction,
    max_delay: Duration,
    buffer: BytesMut,

    /// When the most recent byte arrived.
    /// `None` means nothing is buffered: the timestamp doubles as the
    /// pending flag, so flag and buffer cannot disagree.
    last_byte_at: Option<Instant>,
}

impl Framer {
    /// A framer for one direction.
    ///
    /// Each framer carries its own threshold; the configuration currently
    /// hands both directions the same value.
    pub fn new(direction: Direction, max_delay: Duration) -> Self {
        Self {
            direction,
            max_delay,
            buffer: BytesMut::new(),
            last_byte_at: None,
        }
    }

    /// Append a forwarded byte and re-arm the idle timer.
    pub fn on_byte(&mut self, byte: u8, now: Instant) {
        self.buffer.put_u8(byte);
        self.last_byte_at = Some(now);
    }

    /// Flush the accumulated bytes as a packet if the direction has been
    /// idle for longer than the maximum delay.
    ///
    /// Returns `None` when nothing is pending or the gap is still within
    /// bounds. A flush drains the buffer, so calling this again without new
    /// bytes in between returns `None`.
    pub fn check_idle(&mut self, now: Instant) -> Option<Packet> {
        let last = self.last_byte_at?;

        if now.duration_since(last) > self.max_delay {
            self.last_byte_at = None;

            Some(Packet {
                direction: self.direction,
                bytes: self.buffer.split().freeze(),
            })
        } else {
            None
        }
    }

    /// Whether any bytes are waiting for an idle gap.
    pub fn has_pending(&self) -> bool {
        self.last_byte_at.is_some()
    }

    /// How many bytes are waiting for an idle gap.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }
}
