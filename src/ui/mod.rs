//! Terminal presentation: capability detection, theme, widgets and the
//! event sinks commands hand to the coordinator.

pub mod context;
pub mod json;
pub mod live_region;
pub mod primitives;
pub mod sinks;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
