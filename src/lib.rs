#![deny(missing_docs)]

//! This crate puts a transparent tap between two serial ports.
//!
//! One port faces the host, the other faces the device under observation.
//! Every byte read from one side is immediately written to the other, so
//! neither side can tell the tap is there.
//!
//! The wire itself carries no framing. Packet boundaries are inferred from
//! timing instead: once a direction has been silent for longer than the
//! configured maximum delay, the bytes accumulated on that direction are
//! closed out as one packet and printed as a hex transcript block.
//!
//! Both directions are framed independently, from a single cooperative loop.

/// The command line interface.
pub mod cli;

/// Relates to config files and run configuration.
pub mod config;

/// The forwarding loop: keeps both ports drained and relays bytes.
pub mod bridge;

/// Per-direction idle-gap packet segmentation.
pub mod framer;

/// Directions and completed packets.
pub mod packet;

/// Rendering completed packets as transcript text.
pub mod transcript;

/// Serial endpoints: the real port driver and an in-memory mock.
pub mod transport;

/// Possible errors in this library.
pub mod error;

/// Logging/tracing setup.
pub mod logging;
