use std::fmt::Display;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::Error;

/// Which way a byte travelled through the tap.
///
/// Each direction owns its own framing state; the two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Request-like traffic: read from the host port, written to the device port.
    HostToDevice,

    /// Response-like traffic: read from the device port, written to the host port.
    DeviceToHost,
}

impl Direction {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::HostToDevice => Self::DeviceToHost,
            Self::DeviceToHost => Self::HostToDevice,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HostToDevice => write!(f, "host-to-device"),
            Self::DeviceToHost => write!(f, "device-to-host"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host-to-device" | "request" => Ok(Self::HostToDevice),
            "device-to-host" | "response" => Ok(Self::DeviceToHost),
            _ => Err(Error::BadDirection(s.into())),
        }
    }
}

/// A completed packet: a maximal run of bytes on one direction,
/// bounded by idle gaps. Not a protocol-level frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Which way the bytes travelled.
    pub direction: Direction,

    /// The bytes, in arrival order.
    pub bytes: Bytes,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn directions_parse() {
        assert_eq!(
            "host-to-device".parse::<Direction>().unwrap(),
            Direction::HostToDevice
        );
        assert_eq!(
            "RESPONSE".parse::<Direction>().unwrap(),
            Direction::DeviceToHost
        );
    }

    #[test]
    fn anything_else_is_a_typed_error() {
        let err = "sideways".parse::<Direction>().unwrap_err();

        assert!(matches!(err, Error::BadDirection(s) if s == "sideways"));
    }

    #[test]
    fn opposite_swaps() {
        assert_eq!(
            Direction::HostToDevice.opposite(),
            Direction::DeviceToHost
        );
        assert_eq!(
            Direction::DeviceToHost.opposite().opposite(),
            Direction::DeviceToHost
        );
    }
}
