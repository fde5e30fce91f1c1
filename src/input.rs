//! Keyboard input sampling.
//!
//! At most one command is read per frame. Bytes come from a [`ByteSource`]
//! so the decoding can be driven by scripted input in tests; the real
//! terminal source polls stdin directly.

use std::collections::VecDeque;
#[cfg(unix)]
use std::fs::{File, OpenOptions};
use std::io;
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

use crate::command::Command;
use crate::mode::Mode;

const ESC: u8 = 0x1B;

/// A source of raw key bytes.
pub trait ByteSource {
    /// Wait up to `timeout` for one byte. `Ok(None)` means nothing arrived;
    /// an `UnexpectedEof` error means the source is closed for good.
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Scripted input: bytes are handed out in order, timeouts are ignored.
impl ByteSource for VecDeque<u8> {
    fn poll_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// Wait budgets for the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long view mode waits for a key before redrawing anyway
    pub view_poll_timeout: Duration,
    /// Perspective frame tick: the frame advances on a key or after this long
    pub frame_interval: Duration,
    /// How long to wait for the rest of an escape sequence
    pub escape_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            view_poll_timeout: Duration::from_millis(100),
            frame_interval: Duration::from_millis(33),
            escape_timeout: Duration::from_millis(25),
        }
    }
}

/// Reads and decodes one command per frame.
pub struct InputSampler<S> {
    source: S,
    timing: Timing,
}

impl<S: ByteSource> InputSampler<S> {
    pub fn new(source: S, timing: Timing) -> Self {
        Self { source, timing }
    }

    /// Read at most one command.
    ///
    /// View mode waits up to the poll timeout; perspective mode waits at
    /// most one frame interval, so the camera keeps moving without input.
    /// A closed input quits instead of spinning on empty reads.
    pub fn poll(&mut self, mode: Mode) -> io::Result<Command> {
        let timeout = match mode {
            Mode::View => self.timing.view_poll_timeout,
            Mode::Affine => self.timing.frame_interval,
        };

        match self.read_command(timeout) {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                log::info!("Keyboard input closed");
                Ok(Command::Quit)
            }
            other => other,
        }
    }

    fn read_command(&mut self, timeout: Duration) -> io::Result<Command> {
        match self.source.poll_byte(timeout)? {
            None => Ok(Command::None),
            Some(ESC) => decode_escape(&mut self.source, self.timing.escape_timeout),
            Some(byte) => Ok(Command::from_key(byte)),
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

/// Decode the remainder of an escape sequence after the `ESC` byte.
///
/// Only `ESC [ A`..`ESC [ D` are recognised; anything else, including a
/// sequence cut short by the timeout, yields [`Command::None`].
pub fn decode_escape(source: &mut impl ByteSource, timeout: Duration) -> io::Result<Command> {
    if source.poll_byte(timeout)? != Some(b'[') {
        return Ok(Command::None);
    }

    Ok(source
        .poll_byte(timeout)?
        .map_or(Command::None, Command::from_cursor_key))
}

/// Key bytes read from the controlling terminal.
///
/// Expects the terminal to be in raw mode so bytes arrive unbuffered.
#[cfg(unix)]
#[derive(Debug)]
pub struct StdinSource {
    fd: RawFd,
    // Owns the descriptor when stdin is redirected
    _tty: Option<File>,
}

#[cfg(not(unix))]
#[derive(Debug, Default)]
pub struct StdinSource {
    pending: VecDeque<u8>,
}

#[cfg(unix)]
impl StdinSource {
    /// Open the keyboard source.
    ///
    /// Reads stdin when it is a terminal. Otherwise opens `/dev/tty`, the
    /// device raw mode is applied to in that case.
    ///
    /// # Errors
    /// Returns an error if there is no controlling terminal.
    pub fn open() -> io::Result<Self> {
        if unsafe { libc::isatty(libc::STDIN_FILENO) } == 1 {
            return Ok(Self {
                fd: libc::STDIN_FILENO,
                _tty: None,
            });
        }

        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .map_err(|e| io::Error::new(e.kind(), format!("no terminal for keyboard input: {}", e)))?;
        log::debug!("stdin is not a terminal, reading keys from /dev/tty");
        Ok(Self::from_file(tty))
    }

    /// Read key bytes from an already open file.
    pub fn from_file(file: File) -> Self {
        Self {
            fd: file.as_raw_fd(),
            _tty: Some(file),
        }
    }
}

#[cfg(not(unix))]
impl StdinSource {
    pub fn open() -> io::Result<Self> {
        Ok(Self::default())
    }
}

#[cfg(unix)]
fn input_closed() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "keyboard input closed")
}

#[cfg(unix)]
impl ByteSource for StdinSource {
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let mut fds = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

        let ready = unsafe { libc::poll(&mut fds, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            // A signal arrived; the frame loop checks the flags next
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(err);
        }
        if ready == 0 {
            return Ok(None);
        }
        if fds.revents & libc::POLLIN == 0 {
            if fds.revents & (libc::POLLHUP | libc::POLLERR | libc::POLLNVAL) != 0 {
                return Err(input_closed());
            }
            return Ok(None);
        }

        let mut byte = 0u8;
        let read = unsafe { libc::read(self.fd, &mut byte as *mut u8 as *mut libc::c_void, 1) };
        match read {
            1 => Ok(Some(byte)),
            0 => Err(input_closed()),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }
}

#[cfg(not(unix))]
impl ByteSource for StdinSource {
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        use crossterm::event::{self, Event, KeyCode, KeyEventKind};

        if let Some(byte) = self.pending.pop_front() {
            return Ok(Some(byte));
        }
        if !event::poll(timeout)? {
            return Ok(None);
        }

        // crossterm hands back decoded keys; re-encode them as the bytes a
        // unix terminal would have sent.
        let bytes: &[u8] = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) if c.is_ascii() => {
                    return Ok(Some(c as u8));
                }
                KeyCode::Up => b"\x1b[A",
                KeyCode::Down => b"\x1b[B",
                KeyCode::Right => b"\x1b[C",
                KeyCode::Left => b"\x1b[D",
                _ => &[],
            },
            _ => &[],
        };
        self.pending.extend(bytes);
        Ok(self.pending.pop_front())
    }
}
