use std::io::Write;

use crate::error::Error;
use crate::packet::{Direction, Packet};

/// Hex values printed per transcript line.
const VALUES_PER_LINE: usize = 16;

/// Width of the `# PACKET #` header and footer rows.
const HEADER_WIDTH: usize = 80;

/// Width of the request/response banner rows.
const BANNER_WIDTH: usize = 78;

/// Renders completed packets as human-readable transcript blocks.
///
/// A host-to-device packet opens a new exchange: a `#`-filled ` PACKET `
/// header, a `>`-filled ` REQUEST ` banner, then the bytes. A
/// device-to-host packet prints a `<`-filled ` RESPONSE ` banner, the
/// bytes, and a closing `#` row.
///
/// Bytes print as two-digit uppercase hex, one trailing space each,
/// sixteen values per line.
#[derive(Debug)]
pub struct TranscriptWriter<W> {
    sink: W,
    only: Option<Direction>,
}

impl<W: Write> TranscriptWriter<W> {
    /// A transcript writing to the given sink.
    pub fn new(sink: W) -> Self {
        Self { sink, only: None }
    }

    /// Restrict the transcript to one direction.
    /// Forwarding is unaffected; the other direction is simply not printed.
    pub fn with_filter(mut self, only: Option<Direction>) -> Self {
        self.only = only;
        self
    }

    /// Render one packet.
    ///
    /// An empty packet renders nothing and succeeds.
    pub fn render(&mut self, packet: &Packet) -> Result<(), Error> {
        if packet.bytes.is_empty() {
            return Ok(());
        }

        if let Some(only) = self.only {
            if only != packet.direction {
                return Ok(());
            }
        }

        self.write(packet).map_err(Error::Transcript)
    }

    fn write(&mut self, packet: &Packet) -> std::io::Result<()> {
        match packet.direction {
            Direction::HostToDevice => {
                writeln!(self.sink)?;
                writeln!(self.sink, "{}", banner(" PACKET ", '#', HEADER_WIDTH))?;
                writeln!(self.sink, "{} ", banner(" REQUEST ", '>', BANNER_WIDTH))?;
                self.write_hex(&packet.bytes)?;
            }
            Direction::DeviceToHost => {
                writeln!(self.sink, "{} ", banner(" RESPONSE ", '<', BANNER_WIDTH))?;
                self.write_hex(&packet.bytes)?;
                writeln!(self.sink, "{}", "#".repeat(HEADER_WIDTH))?;
            }
        }

        self.sink.flush()
    }

    fn write_hex(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        for (index, byte) in bytes.iter().enumerate() {
            if index > 0 && index % VALUES_PER_LINE == 0 {
                writeln!(self.sink)?;
            }

            write!(self.sink, "{byte:02X} ")?;
        }

        writeln!(self.sink)
    }
}

/// Center `title` in a row of `fill` characters.
fn banner(title: &str, fill: char, width: usize) -> String {
    let pad = width.saturating_sub(title.len());
    let left = pad / 2;
    let right = pad - left;

    format!(
        "{}{title}{}",
        fill.to_string().repeat(left),
        fill.to_string().repeat(right)
    )
}
