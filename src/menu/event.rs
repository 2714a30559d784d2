//! Classification of raw input bytes into selection events.

use std::io;

use crate::terminal::Terminal;

const NEWLINE: u8 = 0x0a;
const SPACE: u8 = 0x20;
const ESC: u8 = 0x1b;

/// One logical input event, read from the device a byte at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    /// Enter or space: accept the option under the cursor.
    Select,
    /// A configured shortcut key: accept and report which key fired.
    Shortcut(char),
    CursorUp,
    CursorDown,
    /// Anything unrecognized; the caller loops without a state change.
    Ignored,
}

/// Reads the next event from `device`, consuming one to three bytes.
///
/// Arrow keys arrive as the three-byte sequences `ESC [ A` and `ESC [ B`.
/// An `ESC` not followed by `[` is dropped along with the byte after it —
/// exactly two bytes, no pushback — so the tail of a longer unknown
/// sequence is classified by subsequent reads.
pub(crate) fn read_event<D: Terminal>(
    device: &mut D,
    shortcuts: &[char],
) -> io::Result<InputEvent> {
    let byte = device.read_byte()?;

    if byte == NEWLINE || byte == SPACE {
        return Ok(InputEvent::Select);
    }
    if let Some(key) = shortcuts.iter().find(|key| **key as u32 == u32::from(byte)) {
        return Ok(InputEvent::Shortcut(*key));
    }
    if byte != ESC {
        return Ok(InputEvent::Ignored);
    }

    if device.read_byte()? != b'[' {
        return Ok(InputEvent::Ignored);
    }
    Ok(match device.read_byte()? {
        b'A' => InputEvent::CursorUp,
        b'B' => InputEvent::CursorDown,
        _ => InputEvent::Ignored,
    })
}
