mod common;
mod logging;
mod menu;
mod terminal;

pub use common::{PROJECT_NAME, PROJECT_VERSION};
pub use logging::Logging;
pub use menu::{Menu, MenuBuilder, MenuError, Selection};
pub use terminal::{StdTerminal, Terminal, ansi_supported};
