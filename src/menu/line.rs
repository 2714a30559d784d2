//! Numbered-list selection for terminals without escape sequence support.
//!
//! The list is printed once; the user types a 1-based number (optionally
//! prefixed with a shortcut key) and is re-prompted inline until the input
//! parses and lands in range.

use std::fmt;

use log::debug;

use super::{MenuError, RawChoice};
use crate::terminal::Terminal;

/// One line-input selection session over a fixed option list.
pub(crate) struct LineSelect<'a, T, D> {
    device: &'a mut D,
    options: &'a [T],
    shortcuts: &'a [char],
}

impl<'a, T: fmt::Display, D: Terminal> LineSelect<'a, T, D> {
    pub(crate) fn new(device: &'a mut D, options: &'a [T], shortcuts: &'a [char]) -> Self {
        Self {
            device,
            options,
            shortcuts,
        }
    }

    /// Prints the numbered list, then reads lines until a valid pick.
    ///
    /// Relies on the device's normal line-buffered, echoed input; no mode
    /// toggles happen here.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub(crate) fn run(self) -> Result<RawChoice, MenuError> {
        let Self {
            device,
            options,
            shortcuts,
        } = self;
        debug!("line selection over {} options", options.len());

        for (idx, option) in options.iter().enumerate() {
            let number = idx + 1;
            device.write_line(&format!("{number:>3}) {option}"))?;
        }

        loop {
            let line = device.read_line()?;

            let (shortcut, rest) = match line.chars().next() {
                Some(first) if shortcuts.contains(&first) => {
                    (Some(first), line.split_at(first.len_utf8()).1)
                }
                _ => (None, line.as_str()),
            };

            let Ok(pick) = rest.parse::<i64>() else {
                device.write_line(&format!("Bad input: '{line}'. Expecting a number."))?;
                continue;
            };

            if pick < 1 || pick > options.len() as i64 {
                device.write_line(&format!(
                    "Bad input: '{line}'. Expecting number from 1 to {}.",
                    options.len()
                ))?;
                continue;
            }

            debug!("selected option {} via typed input", pick - 1);
            return Ok(RawChoice {
                index: (pick - 1) as usize,
                shortcut,
            });
        }
    }
}
