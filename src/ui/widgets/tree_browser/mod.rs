//! Interactive file tree browser.
//!
//! Keyboard-driven view over a [`TreeModel`](repolens::TreeModel). Every
//! expand, collapse and selection goes through a
//! [`SelectionCoordinator`](repolens::SelectionCoordinator) so the events
//! reach the same sink as in non-interactive mode.

mod browser;
mod input;
mod render;

pub use browser::TreeBrowser;
pub use input::run_interactive;
