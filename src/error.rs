use std::io;

use thiserror::Error;

use crate::transport::Side;

/// Errors that may occur while tapping a link.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration cannot be used.
    /// Detected before any port is opened.
    #[error("Bad configuration: {0}")]
    BadConfig(String),

    /// A port failed to open, read or write.
    /// Fatal to the run; both ports are closed before this propagates.
    #[error("Transport failure on the {side} side")]
    Transport {
        /// Which of the two ports failed.
        side: Side,

        /// The underlying IO problem.
        #[source]
        source: io::Error,
    },

    /// A direction outside host-to-device / device-to-host.
    #[error("`{0}` is not a direction (expected `host-to-device` or `device-to-host`)")]
    BadDirection(String),

    /// The transcript sink rejected a write.
    #[error("Could not write transcript")]
    Transcript(#[source] io::Error),
}

impl Error {
    /// Wrap an IO problem with the side it happened on.
    pub fn transport(side: Side, source: io::Error) -> Self {
        Self::Transport { side, source }
    }
}
