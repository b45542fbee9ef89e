//! Infrastructure Layer
//!
//! Everything that touches the file system or the clock.
//!
//! - `listing` - file listings from JSON/YAML documents or a directory walk
//! - `archive` - upload acceptance rules and fingerprinting
//! - `time_source` - real and manual clocks for the pipeline runner

pub mod archive;
pub mod listing;
pub mod time_source;

pub use archive::{format_size, inspect_archive, ArchiveInfo};
pub use listing::{load_listing, load_source, scan_directory};
pub use time_source::{ManualTimeSource, RealTimeSource, TimeSource};
