//! Domain Layer
//!
//! The two state machines behind the front end, free of I/O.
//!
//! ## Structure
//!
//! - `tree/` - file hierarchy with expand and selection state
//! - `pipeline/` - staged processing progress driven by ticks
//! - `ports/` - event sink the display layer implements
//!
//! Nothing here reads the clock or touches the file system. Time arrives as
//! `tick(elapsed)` calls and listings arrive as already-parsed nodes.

pub mod pipeline;
pub mod ports;
pub mod tree;
