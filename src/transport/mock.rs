use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct State {
    incoming: VecDeque<u8>,
    written: Vec<u8>,
    next_error: Option<io::ErrorKind>,
}

/// An in-memory port.
///
/// Bytes pushed through the [`MockPortHandle`] become available for reading;
/// bytes the tap writes are recorded for inspection. A scripted failure
/// makes the next transport call error, whichever it is.
#[derive(Debug)]
pub struct MockPort {
    state: Arc<Mutex<State>>,
}

/// The test's end of a [`MockPort`].
#[derive(Debug, Clone)]
pub struct MockPortHandle {
    state: Arc<Mutex<State>>,
}

impl MockPort {
    /// A fresh port plus the handle that drives and inspects it.
    pub fn new() -> (Self, MockPortHandle) {
        let state = Arc::new(Mutex::new(State::default()));

        (
            Self {
                state: Arc::clone(&state),
            },
            MockPortHandle { state },
        )
    }
}

impl MockPortHandle {
    /// Make the given bytes readable on the port.
    pub fn push_incoming(&self, bytes: &[u8]) {
        self.lock().incoming.extend(bytes.iter().copied());
    }

    /// Everything written to the port so far, in order.
    pub fn written(&self) -> Vec<u8> {
        self.lock().written.clone()
    }

    /// Make the next transport call on this port fail.
    pub fn fail_next(&self, kind: io::ErrorKind) {
        self.lock().next_error = Some(kind);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("mock port state poisoned")
    }
}

impl MockPort {
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("mock port state poisoned")
    }

    fn take_error(state: &mut State) -> io::Result<()> {
        match state.next_error.take() {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }
}

impl super::Transport for MockPort {
    fn bytes_available(&mut self) -> io::Result<usize> {
        let mut state = self.lock();
        Self::take_error(&mut state)?;

        Ok(state.incoming.len())
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let mut state = self.lock();
        Self::take_error(&mut state)?;

        state
            .incoming
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::WouldBlock))
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let mut state = self.lock();
        Self::take_error(&mut state)?;

        state.written.push(byte);

        Ok(())
    }
}
