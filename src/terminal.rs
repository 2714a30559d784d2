//! Terminal device abstraction used by both selection strategies.
//!
//! Strategies never touch the process streams directly; everything goes
//! through the [`Terminal`] trait so embedders (and the test suite) can
//! substitute their own device. [`StdTerminal`] is the default
//! implementation over stdin/stdout.

use std::env;
use std::io::{self, IsTerminal, Read, Write};

#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Byte- and line-level access to a terminal, plus its input mode flags.
///
/// The two mode flags mirror what a Unix terminal driver exposes:
/// *line mode* buffers input until Enter (canonical mode), *echo mode*
/// reflects typed characters back to the output. Both are snapshotted and
/// restored around the arrow-key selection loop.
pub trait Terminal {
    /// Writes text without a trailing newline.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Writes text followed by a newline.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Reads exactly one raw byte, blocking until one is available.
    ///
    /// End of input is an error (`UnexpectedEof`), not a sentinel value.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Reads one full line of text, blocking. The line terminator is
    /// stripped. End of input is an error.
    fn read_line(&mut self) -> io::Result<String>;

    /// Whether input is currently line-buffered.
    fn line_mode(&self) -> io::Result<bool>;

    /// Whether typed characters are currently echoed back.
    fn echo_mode(&self) -> io::Result<bool>;

    fn set_line_mode(&mut self, enabled: bool) -> io::Result<()>;

    fn set_echo_mode(&mut self, enabled: bool) -> io::Result<()>;
}

/// The process standard streams as a [`Terminal`].
///
/// On Unix the mode flags map to the `ICANON` and `ECHO` termios bits and
/// toggle independently. On other platforms both flags track crossterm's
/// raw mode, which flips them as a pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdTerminal;

impl StdTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Terminal for StdTerminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"\n")?;
        stdout.flush()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        io::stdin().read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input on stdin",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn line_mode(&self) -> io::Result<bool> {
        mode_flags().map(|(line, _)| line)
    }

    fn echo_mode(&self) -> io::Result<bool> {
        mode_flags().map(|(_, echo)| echo)
    }

    fn set_line_mode(&mut self, enabled: bool) -> io::Result<()> {
        set_line_mode(enabled)
    }

    fn set_echo_mode(&mut self, enabled: bool) -> io::Result<()> {
        set_echo_mode(enabled)
    }
}

/// Best-effort detection of cursor-movement escape code support.
///
/// True when both standard streams are attached to a terminal and `TERM`
/// does not advertise a dumb terminal. The result is only a default;
/// callers can override it per menu.
#[must_use]
pub fn ansi_supported() -> bool {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return false;
    }
    match env::var("TERM") {
        Ok(term) => term != "dumb",
        // Windows consoles typically have no TERM set but speak VT100.
        Err(_) => cfg!(windows),
    }
}

#[cfg(unix)]
fn read_termios() -> io::Result<libc::termios> {
    let fd = io::stdin().as_raw_fd();
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn write_termios(termios: &libc::termios) -> io::Result<()> {
    let fd = io::stdin().as_raw_fd();
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn mode_flags() -> io::Result<(bool, bool)> {
    let termios = read_termios()?;
    Ok((
        (termios.c_lflag & libc::ICANON) != 0,
        (termios.c_lflag & libc::ECHO) != 0,
    ))
}

#[cfg(unix)]
fn set_line_mode(enabled: bool) -> io::Result<()> {
    let mut termios = read_termios()?;
    if enabled {
        termios.c_lflag |= libc::ICANON;
    } else {
        termios.c_lflag &= !libc::ICANON;
        // With canonical mode off, reads must still block for one byte.
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
    }
    write_termios(&termios)
}

#[cfg(unix)]
fn set_echo_mode(enabled: bool) -> io::Result<()> {
    let mut termios = read_termios()?;
    if enabled {
        termios.c_lflag |= libc::ECHO;
    } else {
        termios.c_lflag &= !libc::ECHO;
    }
    write_termios(&termios)
}

#[cfg(not(unix))]
fn mode_flags() -> io::Result<(bool, bool)> {
    let raw = crossterm::terminal::is_raw_mode_enabled()?;
    Ok((!raw, !raw))
}

#[cfg(not(unix))]
fn set_line_mode(enabled: bool) -> io::Result<()> {
    if enabled {
        crossterm::terminal::disable_raw_mode()
    } else {
        crossterm::terminal::enable_raw_mode()
    }
}

#[cfg(not(unix))]
fn set_echo_mode(enabled: bool) -> io::Result<()> {
    set_line_mode(enabled)
}

/// Scope guard that switches a device to unbuffered, unechoed input and
/// restores the snapshotted flags on drop, whatever the exit path.
pub(crate) struct ModeGuard<'a, D: Terminal> {
    device: &'a mut D,
    line: bool,
    echo: bool,
}

impl<'a, D: Terminal> ModeGuard<'a, D> {
    pub(crate) fn acquire(device: &'a mut D) -> io::Result<Self> {
        let line = device.line_mode()?;
        let echo = device.echo_mode()?;
        device.set_line_mode(false)?;
        if let Err(err) = device.set_echo_mode(false) {
            let _ = device.set_line_mode(line);
            return Err(err);
        }
        Ok(Self { device, line, echo })
    }

    pub(crate) fn device(&mut self) -> &mut D {
        self.device
    }
}

impl<D: Terminal> Drop for ModeGuard<'_, D> {
    fn drop(&mut self) {
        // Restore terminal state, ignoring errors during cleanup
        let _ = self.device.set_line_mode(self.line);
        let _ = self.device.set_echo_mode(self.echo);
    }
}
