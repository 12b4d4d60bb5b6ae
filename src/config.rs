use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One side of the tap as described by a configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConfig {
    /// The path to the port.
    /// Likely "/dev/ttyUSBx" or "COMx".
    pub path: String,

    /// Baud rate.
    #[serde(default = "default_baud")]
    pub baud: u32,

    /// Flow control. Passed through to the port, nothing more.
    #[serde(default = "default_flow_control")]
    pub flow_control: serialport::FlowControl,
}

impl PortConfig {
    /// A port at the given path with the default baud and no flow control.
    pub fn new<S: AsRef<str>>(path: S) -> Self {
        Self {
            path: path.as_ref().into(),
            baud: default_baud(),
            flow_control: default_flow_control(),
        }
    }
}

fn default_baud() -> u32 {
    9600
}

fn default_flow_control() -> serialport::FlowControl {
    serialport::FlowControl::None
}

fn default_max_delay() -> f64 {
    5e-3
}

/// The configuration used for running the tap.
/// Immutable once the run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The port facing the host.
    pub host: PortConfig,

    /// The port facing the device under observation.
    pub device: PortConfig,

    /// Maximum allowed silence inside one packet, in seconds.
    /// A longer gap closes the packet. Applies to both directions.
    #[serde(default = "default_max_delay")]
    pub max_delay: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: PortConfig::new(""),
            device: PortConfig::new(""),
            max_delay: default_max_delay(),
        }
    }
}

impl Config {
    fn ron() -> ron::Options {
        ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
            .with_default_extension(ron::extensions::Extensions::UNWRAP_NEWTYPES)
    }

    /// Deserialize a .ron file's contents.
    pub fn deserialize(input: &str) -> Result<Self, Error> {
        Self::ron()
            .from_str::<Config>(input)
            .map_err(|e| Error::BadConfig(format!("Not valid configuration: {e}")))
    }

    /// An example configuration with some fields filled in.
    pub fn example() -> Self {
        Self {
            host: PortConfig {
                path: "/dev/ttyUSB0".into(),
                baud: 9600,
                flow_control: serialport::FlowControl::None,
            },
            device: PortConfig {
                path: "/dev/ttyUSB1".into(),
                baud: 9600,
                flow_control: serialport::FlowControl::None,
            },
            max_delay: 5e-3,
        }
    }

    /// Serialize the configuration in a "pretty" (i.e. non-compact) fashion.
    pub fn serialize_pretty(&self) -> String {
        Self::ron()
            .to_string_pretty(self, ron::ser::PrettyConfig::default())
            .expect("configuration serializes")
    }

    /// Setup a new configuration from a RON file.
    pub fn new_from_path<P: AsRef<Path>>(p: P) -> Result<Self, Error> {
        let s = std::fs::read_to_string(&p).map_err(|e| {
            Error::BadConfig(format!("Could not read {:?}: {e}", p.as_ref()))
        })?;

        Self::deserialize(&s)
    }

    /// The idle threshold as a duration.
    /// Call [`validate`](Self::validate) first; a non-positive delay has no
    /// duration.
    pub fn max_delay(&self) -> Duration {
        Duration::from_secs_f64(self.max_delay)
    }

    /// Reject configurations the run loop cannot honor.
    pub fn validate(&self) -> Result<(), Error> {
        Self::check_port(&self.host, "host")?;
        Self::check_port(&self.device, "device")?;
        self.check_distinct_ports()?;
        self.check_max_delay()?;

        Ok(())
    }

    fn check_port(port: &PortConfig, side: &str) -> Result<(), Error> {
        if port.path.is_empty() {
            return Err(Error::BadConfig(format!(
                "No {side} port given. Pass one on the command line or in the configuration file."
            )));
        }

        if port.baud == 0 {
            return Err(Error::BadConfig(format!(
                "The {side} baud rate must be non-zero."
            )));
        }

        Ok(())
    }

    fn check_distinct_ports(&self) -> Result<(), Error> {
        if self.host.path == self.device.path {
            return Err(Error::BadConfig(format!(
                "The host and device sides both name `{}`. A tap needs two distinct ports.",
                self.host.path
            )));
        }

        Ok(())
    }

    fn check_max_delay(&self) -> Result<(), Error> {
        // Also rejects NaN.
        if !(self.max_delay > 0.0) {
            return Err(Error::BadConfig(format!(
                "The maximum idle delay must be positive, got {}.",
                self.max_delay
            )));
        }

        Ok(())
    }
}
