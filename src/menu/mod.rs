//! Interactive single selection from a list of options.
//!
//! A [`Menu`] owns an ordered option list and runs one of two interaction
//! protocols when [`Menu::choose`] is called: an arrow-key loop that
//! redraws the list in place on ANSI-capable terminals, or a numbered
//! prompt that reads typed input everywhere else. Both resolve to the same
//! [`Selection`] contract.

mod ansi;
mod event;
mod line;

use std::fmt;
use std::io;

use derive_more::Display;
use log::debug;

use crate::terminal::{StdTerminal, Terminal, ansi_supported};

use ansi::ArrowSelect;
use line::LineSelect;

/// Failures building or running a [`Menu`].
#[derive(Debug, Display)]
pub enum MenuError {
    /// A shortcut key was not exactly one 8-bit character.
    #[display("invalid shortcut key {_0:?}: shortcut keys are a single 8-bit character")]
    InvalidShortcut(String),
    /// The menu was given an empty option list.
    #[display("a menu needs at least one option")]
    NoOptions,
    /// The terminal device failed mid-selection.
    #[display("terminal device error: {_0}")]
    Device(io::Error),
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Device(err) => Some(err),
            Self::InvalidShortcut(_) | Self::NoOptions => None,
        }
    }
}

impl From<io::Error> for MenuError {
    fn from(err: io::Error) -> Self {
        Self::Device(err)
    }
}

/// The outcome of one completed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    /// Zero-based position of the chosen option.
    pub index: usize,
    /// The chosen option.
    pub value: T,
    /// The text the chosen option renders as.
    pub text: String,
    /// The shortcut key that triggered the selection, if one did.
    pub shortcut: Option<char>,
}

/// Strategy-level outcome before it is mapped back onto the option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawChoice {
    pub(crate) index: usize,
    pub(crate) shortcut: Option<char>,
}

/// An interactive menu over a fixed, non-empty option list.
///
/// Menus are configured through [`MenuBuilder`] and hold no state between
/// [`choose`](Menu::choose) calls; calling it again re-runs the whole
/// interaction.
#[derive(Debug)]
pub struct Menu<T, D = StdTerminal> {
    options: Vec<T>,
    shortcuts: Vec<char>,
    ansi: bool,
    starting_index: usize,
    device: D,
}

impl<T: fmt::Display> Menu<T> {
    /// Starts building a menu over `options`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut menu = Menu::new(vec!["Install", "Upgrade", "Quit"])
    ///     .with_shortcut("q")
    ///     .build()?;
    /// let pick = menu.choose()?;
    /// println!("{}", pick.text);
    /// ```
    #[must_use]
    pub fn new(options: Vec<T>) -> MenuBuilder<T> {
        MenuBuilder::new(options)
    }
}

impl<T: fmt::Display + Clone, D: Terminal> Menu<T, D> {
    /// Runs one full selection interaction, blocking until it completes.
    ///
    /// Dispatches to the arrow-key protocol when the menu resolved as
    /// ANSI-capable, and to the numbered prompt otherwise. Terminal mode
    /// flags are back to their pre-call values by the time this returns,
    /// whether with a selection or a device error.
    #[allow(clippy::indexing_slicing)]
    pub fn choose(&mut self) -> Result<Selection<T>, MenuError> {
        debug!("choose: ansi={}", self.ansi);
        let raw = if self.ansi {
            ArrowSelect::new(
                &mut self.device,
                &self.options,
                &self.shortcuts,
                self.starting_index,
            )
            .run()?
        } else {
            LineSelect::new(&mut self.device, &self.options, &self.shortcuts).run()?
        };

        // Both strategies only ever report indices into the option list.
        let value = self.options[raw.index].clone();
        let text = value.to_string();
        Ok(Selection {
            index: raw.index,
            value,
            text,
            shortcut: raw.shortcut,
        })
    }
}

/// Builder for [`Menu`].
pub struct MenuBuilder<T, D = StdTerminal> {
    options: Vec<T>,
    shortcuts: Vec<String>,
    ansi: Option<bool>,
    starting_index: usize,
    device: D,
}

impl<T: fmt::Display> MenuBuilder<T> {
    #[must_use]
    pub fn new(options: Vec<T>) -> Self {
        Self {
            options,
            shortcuts: Vec::new(),
            ansi: None,
            starting_index: 0,
            device: StdTerminal::new(),
        }
    }
}

impl<T: fmt::Display, D: Terminal> MenuBuilder<T, D> {
    /// Adds a single-character key that selects the highlighted option
    /// directly. Validated by [`build`](MenuBuilder::build).
    #[must_use]
    pub fn with_shortcut(mut self, key: impl Into<String>) -> Self {
        self.shortcuts.push(key.into());
        self
    }

    /// Adds several shortcut keys at once, in selection-priority order.
    #[must_use]
    pub fn with_shortcuts<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shortcuts.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Overrides ANSI capability detection for this menu.
    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = Some(enabled);
        self
    }

    /// Sets the initial cursor position for the arrow-key protocol,
    /// clamped to the last option.
    #[must_use]
    pub fn with_starting_cursor(mut self, index: usize) -> Self {
        self.starting_index = index;
        self
    }

    /// Swaps in a custom terminal device.
    #[must_use]
    pub fn with_device<E: Terminal>(self, device: E) -> MenuBuilder<T, E> {
        MenuBuilder {
            options: self.options,
            shortcuts: self.shortcuts,
            ansi: self.ansi,
            starting_index: self.starting_index,
            device,
        }
    }

    /// Validates the configuration and produces the menu.
    ///
    /// Fails on an empty option list or on any shortcut key that is not
    /// exactly one character of at most 8 bits; no menu is produced in
    /// either case.
    pub fn build(self) -> Result<Menu<T, D>, MenuError> {
        if self.options.is_empty() {
            return Err(MenuError::NoOptions);
        }

        let mut shortcuts = Vec::with_capacity(self.shortcuts.len());
        for key in &self.shortcuts {
            shortcuts.push(shortcut_char(key)?);
        }

        let ansi = self.ansi.unwrap_or_else(ansi_supported);
        let starting_index = self
            .starting_index
            .min(self.options.len().saturating_sub(1));

        Ok(Menu {
            options: self.options,
            shortcuts,
            ansi,
            starting_index,
            device: self.device,
        })
    }
}

/// Validates one shortcut key: exactly one character, code point ≤ 255.
fn shortcut_char(key: &str) -> Result<char, MenuError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if (ch as u32) <= 0xff => Ok(ch),
        _ => Err(MenuError::InvalidShortcut(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::testing::FakeTerminal;

    fn fruit() -> Vec<&'static str> {
        vec!["Apple", "Banana", "Cherry"]
    }

    #[test]
    fn test_build_rejects_multi_character_shortcut() {
        let err = Menu::new(fruit()).with_shortcut("qq").build().unwrap_err();
        assert!(matches!(err, MenuError::InvalidShortcut(key) if key == "qq"));
    }

    #[test]
    fn test_build_rejects_shortcut_above_code_point_255() {
        let err = Menu::new(fruit()).with_shortcut("€").build().unwrap_err();
        assert!(matches!(err, MenuError::InvalidShortcut(_)));
    }

    #[test]
    fn test_build_rejects_empty_shortcut() {
        let err = Menu::new(fruit()).with_shortcut("").build().unwrap_err();
        assert!(matches!(err, MenuError::InvalidShortcut(_)));
    }

    #[test]
    fn test_build_accepts_top_of_latin1_shortcut() {
        assert!(Menu::new(fruit()).with_shortcut("ÿ").build().is_ok());
    }

    #[test]
    fn test_build_rejects_empty_option_list() {
        let err = Menu::new(Vec::<String>::new()).build().unwrap_err();
        assert!(matches!(err, MenuError::NoOptions));
    }

    #[test]
    fn test_choose_maps_raw_outcome_through_options() {
        let mut menu = Menu::new(fruit())
            .with_ansi(false)
            .with_device(FakeTerminal::with_lines(&["2"]))
            .build()
            .unwrap();
        let pick = menu.choose().unwrap();
        assert_eq!(pick.index, 1);
        assert_eq!(pick.value, "Banana");
        assert_eq!(pick.text, "Banana");
        assert_eq!(pick.shortcut, None);
    }

    #[test]
    fn test_choose_dispatches_to_arrow_protocol_when_ansi() {
        let mut menu = Menu::new(fruit())
            .with_ansi(true)
            .with_device(FakeTerminal::with_bytes(b"\x1b[B\n"))
            .build()
            .unwrap();
        let pick = menu.choose().unwrap();
        assert_eq!(pick.value, "Banana");
    }

    #[test]
    fn test_repeated_choose_reruns_the_interaction() {
        let mut menu = Menu::new(fruit())
            .with_ansi(false)
            .with_device(FakeTerminal::with_lines(&["3", "1"]))
            .build()
            .unwrap();
        assert_eq!(menu.choose().unwrap().index, 2);
        assert_eq!(menu.choose().unwrap().index, 0);
    }

    #[test]
    fn test_starting_cursor_is_clamped_to_last_option() {
        let mut menu = Menu::new(fruit())
            .with_ansi(true)
            .with_starting_cursor(10)
            .with_device(FakeTerminal::with_bytes(b"\n"))
            .build()
            .unwrap();
        assert_eq!(menu.choose().unwrap().value, "Cherry");
    }

    #[test]
    fn test_any_configured_shortcut_triggers_selection() {
        let mut menu = Menu::new(fruit())
            .with_ansi(true)
            .with_shortcuts(["a", "b"])
            .with_device(FakeTerminal::with_bytes(b"b"))
            .build()
            .unwrap();
        assert_eq!(menu.choose().unwrap().shortcut, Some('b'));
    }
}
