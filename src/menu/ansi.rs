//! Arrow-key selection: redraws the option list in place until the user
//! accepts the highlighted entry.

use std::fmt;
use std::io;

use crossterm::{Command, cursor::MoveUp};
use log::debug;

use super::{MenuError, RawChoice};
use super::event::{self, InputEvent};
use crate::terminal::{ModeGuard, Terminal};

const MARKER: &str = "--> ";
const NO_MARKER: &str = "    ";

/// Longest label rendered per option line; anything longer is clipped.
const MAX_LABEL_WIDTH: usize = 60;
const ELLIPSIS: &str = "...";

/// One arrow-key selection session over a fixed option list.
pub(crate) struct ArrowSelect<'a, T, D> {
    device: &'a mut D,
    options: &'a [T],
    shortcuts: &'a [char],
    cursor: usize,
}

impl<'a, T: fmt::Display, D: Terminal> ArrowSelect<'a, T, D> {
    pub(crate) fn new(
        device: &'a mut D,
        options: &'a [T],
        shortcuts: &'a [char],
        cursor: usize,
    ) -> Self {
        Self {
            device,
            options,
            shortcuts,
            cursor,
        }
    }

    /// Runs the redraw/read loop until a selecting event arrives.
    ///
    /// Line buffering and echo are turned off for the duration of the loop
    /// and restored on every exit path, including device failures.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn run(self) -> Result<RawChoice, MenuError> {
        let Self {
            device,
            options,
            shortcuts,
            mut cursor,
        } = self;
        debug!("arrow selection over {} options", options.len());

        let labels: Vec<String> = options
            .iter()
            .map(|option| clip_label(&option.to_string()))
            .collect();

        let mut modes = ModeGuard::acquire(device)?;

        // Reserve a fixed redraw region, one terminal line per option.
        for _ in 0..labels.len() {
            modes.device().write_line("")?;
        }

        loop {
            redraw(modes.device(), &labels, cursor)?;

            match event::read_event(modes.device(), shortcuts)? {
                InputEvent::Select => {
                    debug!("selected option {cursor}");
                    return Ok(RawChoice {
                        index: cursor,
                        shortcut: None,
                    });
                }
                InputEvent::Shortcut(key) => {
                    debug!("selected option {cursor} via shortcut {key:?}");
                    return Ok(RawChoice {
                        index: cursor,
                        shortcut: Some(key),
                    });
                }
                InputEvent::CursorUp => {
                    cursor = if cursor == 0 {
                        labels.len().saturating_sub(1)
                    } else {
                        cursor - 1
                    };
                }
                InputEvent::CursorDown => {
                    cursor = (cursor + 1) % labels.len();
                }
                InputEvent::Ignored => {}
            }
        }
    }
}

/// Repaints the whole option region: cursor up to its top, then one line
/// per option with the marker on the current cursor line.
#[allow(clippy::arithmetic_side_effects)]
fn redraw<D: Terminal>(device: &mut D, labels: &[String], cursor: usize) -> io::Result<()> {
    device.write(&cursor_up_sequence(labels.len()))?;
    for (idx, label) in labels.iter().enumerate() {
        let marker = if idx == cursor { MARKER } else { NO_MARKER };
        let number = idx + 1;
        device.write_line(&format!("{marker}{number:>3} {label}"))?;
    }
    Ok(())
}

/// The `ESC [ <n> A` cursor-up sequence for `lines` lines.
#[allow(clippy::cast_possible_truncation)]
fn cursor_up_sequence(lines: usize) -> String {
    let mut sequence = String::new();
    // Writing into a String cannot fail.
    let _ = MoveUp(lines as u16).write_ansi(&mut sequence);
    sequence
}

/// Clips a label to at most [`MAX_LABEL_WIDTH`] characters, marking the
/// cut with a trailing ellipsis.
fn clip_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_WIDTH {
        return label.to_string();
    }
    let mut clipped: String = label
        .chars()
        .take(MAX_LABEL_WIDTH.saturating_sub(ELLIPSIS.len()))
        .collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::testing::FakeTerminal;

    fn fruit() -> [&'static str; 3] {
        ["Apple", "Banana", "Cherry"]
    }

    #[test]
    fn test_enter_accepts_initial_cursor() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\n");
        let choice = ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert_eq!(
            choice,
            RawChoice {
                index: 0,
                shortcut: None
            }
        );
    }

    #[test]
    fn test_down_then_select_returns_second_option() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\x1b[B\n");
        let choice = ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert_eq!(choice.index, 1);
    }

    #[test]
    fn test_up_from_first_option_wraps_to_last() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\x1b[A\n");
        let choice = ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert_eq!(choice.index, 2);
    }

    #[test]
    fn test_down_from_last_option_wraps_to_first() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\x1b[B\n");
        let choice = ArrowSelect::new(&mut device, &options, &[], 2)
            .run()
            .unwrap();
        assert_eq!(choice.index, 0);
    }

    #[test]
    fn test_cursor_follows_any_up_down_sequence() {
        // down, down, up, down, down => (0+2-1+2) mod 3 = 0
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\x1b[B\x1b[B\x1b[A\x1b[B\x1b[B ");
        let choice = ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert_eq!(choice.index, 0);
    }

    #[test]
    fn test_shortcut_selects_without_moving_cursor() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"q");
        let choice = ArrowSelect::new(&mut device, &options, &['q'], 0)
            .run()
            .unwrap();
        assert_eq!(
            choice,
            RawChoice {
                index: 0,
                shortcut: Some('q')
            }
        );
    }

    #[test]
    fn test_unrecognized_byte_keeps_cursor_and_redraws() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"z\n");
        let choice = ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert_eq!(choice.index, 0);
        // One redraw per loop iteration, cursor change or not.
        assert_eq!(device.output.matches("\x1b[3A").count(), 2);
    }

    #[test]
    fn test_redraw_reserves_region_and_places_marker() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\n");
        ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert!(device.output.starts_with("\n\n\n\x1b[3A"));
        assert!(device.output.contains("-->   1 Apple\n"));
        assert!(device.output.contains("      2 Banana\n"));
        assert!(device.output.contains("      3 Cherry\n"));
    }

    #[test]
    fn test_modes_restored_after_selection() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"\n");
        ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap();
        assert!(device.line);
        assert!(device.echo);
    }

    #[test]
    fn test_modes_restored_after_device_failure() {
        let options = fruit();
        let mut device = FakeTerminal::with_bytes(b"");
        let err = ArrowSelect::new(&mut device, &options, &[], 0)
            .run()
            .unwrap_err();
        assert!(matches!(err, MenuError::Device(_)));
        assert!(device.line);
        assert!(device.echo);
    }

    #[test]
    fn test_clip_label_leaves_short_labels_alone() {
        let label = "a".repeat(60);
        assert_eq!(clip_label(&label), label);
    }

    #[test]
    fn test_clip_label_cuts_to_57_chars_plus_ellipsis() {
        let label = "a".repeat(61);
        let clipped = clip_label(&label);
        assert_eq!(clipped.len(), 60);
        assert_eq!(clipped, format!("{}...", "a".repeat(57)));
    }
}
