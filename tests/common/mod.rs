#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use serial_tap::config::{Config, PortConfig};

/// A transcript sink the test keeps a handle to after the bridge takes
/// ownership of the writer.
#[derive(Debug, Clone, Default)]
pub struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Two mock ports, 5 ms idle threshold.
pub fn test_config() -> Config {
    Config {
        host: PortConfig::new("mock-host"),
        device: PortConfig::new("mock-device"),
        max_delay: 5e-3,
    }
}
