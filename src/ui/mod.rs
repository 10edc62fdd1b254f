//! User-facing output for the command line.
//!
//! - [`UserInterface`] trait so commands can be driven from tests
//! - [`TerminalUI`] writes styled lines to the terminal
//! - [`MockUI`] records everything for assertions
//!
//! # Example
//!
//! ```
//! use workflow_fixtures::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Created mocks file");
//! assert_eq!(ui.successes(), ["Created mocks file"]);
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Status output sink used by commands.
pub trait UserInterface {
    /// Plain informational line.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Always shown, even when quiet.
    fn error(&mut self, msg: &str);
}
