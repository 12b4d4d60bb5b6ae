use std::io::Write;
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::framer::Framer;
use crate::packet::Direction;
use crate::transcript::TranscriptWriter;
use crate::transport::{Side, Transport};

/// How long to sleep once both sides have gone quiet.
///
/// Must stay well below the idle threshold so gaps are observed at the
/// resolution the framing depends on; 200 µs against the 5 ms default.
const POLL_INTERVAL: Duration = Duration::from_micros(200);

/// Quiet passes in a row before the loop sleeps instead of spinning.
const QUIET_PASSES_BEFORE_SLEEP: u8 = 2;

/// Run the tap until a transport fails or `cancel` fires.
///
/// One cooperative loop alternates between a host-to-device and a
/// device-to-host pass. A pass drains the active side byte by byte: each
/// byte is written to the opposite port first, then appended to the active
/// direction's framer. When the active side is empty the idle check runs
/// for that direction, flushing a packet to the transcript if the gap
/// exceeded the configured maximum delay.
///
/// Bytes are relayed in strict arrival order within a direction; the two
/// directions never share buffers or timers.
///
/// The stop token is checked once per pass. On stop, bytes still waiting
/// for an idle gap are discarded, not flushed. Both ports are owned here
/// and therefore closed on every exit path, error or not.
pub async fn run<H, D, W>(
    mut host: H,
    mut device: D,
    config: Config,
    mut transcript: TranscriptWriter<W>,
    cancel: CancellationToken,
) -> Result<(), Error>
where
    H: Transport,
    D: Transport,
    W: Write,
{
    config.validate()?;
    let max_delay = config.max_delay();

    let mut host_framer = Framer::new(Direction::HostToDevice, max_delay);
    let mut device_framer = Framer::new(Direction::DeviceToHost, max_delay);

    let mut active = Direction::HostToDevice;
    let mut quiet_passes: u8 = 0;

    info!(
        host = %config.host.path,
        device = %config.device.path,
        ?max_delay,
        "Tap running"
    );

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let moved = match active {
            Direction::HostToDevice => drain_pass(
                &mut host,
                Side::Host,
                &mut device,
                Side::Device,
                &mut host_framer,
                &mut transcript,
            )?,
            Direction::DeviceToHost => drain_pass(
                &mut device,
                Side::Device,
                &mut host,
                Side::Host,
                &mut device_framer,
                &mut transcript,
            )?,
        };

        active = active.opposite();

        if moved {
            quiet_passes = 0;
        } else {
            quiet_passes = quiet_passes.saturating_add(1);
        }

        if quiet_passes >= QUIET_PASSES_BEFORE_SLEEP {
            time::sleep(POLL_INTERVAL).await;
        }
    }

    if host_framer.has_pending() || device_framer.has_pending() {
        debug!(
            host_pending = host_framer.pending_len(),
            device_pending = device_framer.pending_len(),
            "Stop requested, discarding unflushed bytes"
        );
    }

    info!("Tap stopped");

    Ok(())
}

/// One scheduling pass: drain the source port into the sink port, then run
/// the source direction's idle check.
///
/// Returns whether any byte moved.
fn drain_pass<S, T, W>(
    source: &mut S,
    source_side: Side,
    sink: &mut T,
    sink_side: Side,
    framer: &mut Framer,
    transcript: &mut TranscriptWriter<W>,
) -> Result<bool, Error>
where
    S: Transport,
    T: Transport,
    W: Write,
{
    let mut moved = false;

    while source
        .bytes_available()
        .map_err(|e| Error::transport(source_side, e))?
        > 0
    {
        let byte = source
            .read_byte()
            .map_err(|e| Error::transport(source_side, e))?;

        // On the opposite wire before any framing: the tapped devices must
        // never wait on the observer.
        sink.write_byte(byte)
            .map_err(|e| Error::transport(sink_side, e))?;

        framer.on_byte(byte, Instant::now());
        moved = true;
    }

    if let Some(packet) = framer.check_idle(Instant::now()) {
        debug!(
            direction = %packet.direction,
            len = packet.bytes.len(),
            "Packet complete"
        );

        transcript.render(&packet)?;
    }

    Ok(moved)
}
