use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

/// Process-wide logger setup for binaries embedding the menu.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    /// Send log output to the given file instead of stderr, so log lines
    /// never interleave with the rendered option list.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable debug mode for verbose logging including per-event traces.
    ///
    /// Parameters:
    ///   - enable: true to enable debug mode
    ///
    /// Returns: Self for chaining
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();

        // Set log level based on debug mode
        if self.debug_mode {
            b.filter_level(LevelFilter::Debug);
        } else {
            b.filter_level(LevelFilter::Info);
        }

        if let Some(file_name) = &self.file_name {
            let fd = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_name)
                .with_context(|| format!("Unable to open {} for writing", file_name.display()))?;
            b.target(Target::Pipe(Box::new(fd)));
        }

        b.init();

        Ok(())
    }
}
