use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::info;

use crate::config::PortConfig;
use crate::error::Error;
use crate::transport::{Side, Transport};

/// Read timeout on the underlying port.
///
/// Reads only happen after the port reported bytes waiting, so this never
/// actually elapses on a healthy link; it bounds how long a dying link can
/// stall the loop.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// One open serial port of the tap.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

/// Open the port described by `settings`, 8N1 with the configured flow
/// control.
pub fn open(side: Side, settings: &PortConfig) -> Result<SerialLink, Error> {
    info!(
        %side,
        path = %settings.path,
        baud = %settings.baud,
        flow_control = ?settings.flow_control,
        "Opening serial port"
    );

    let port = serialport::new(&settings.path, settings.baud)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(settings.flow_control)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|e| Error::transport(side, e.into()))?;

    Ok(SerialLink { port })
}

impl Transport for SerialLink {
    fn bytes_available(&mut self) -> std::io::Result<usize> {
        let waiting = self.port.bytes_to_read()?;

        Ok(waiting as usize)
    }

    fn read_byte(&mut self) -> std::io::Result<u8> {
        let mut byte = [0u8; 1];
        self.port.read_exact(&mut byte)?;

        Ok(byte[0])
    }

    fn write_byte(&mut self, byte: u8) -> std::io::Result<()> {
        self.port.write_all(&[byte])
    }
}
