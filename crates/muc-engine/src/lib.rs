//! Block injection and removal engine for the Mod Update-Checker.
//!
//! A mod ships two coupled Lua files: the main script and a localization
//! script that returns one big table literal. This crate installs a
//! sentinel-delimited, machine-generated block into both (an update-check
//! callback appended to the main script, two localized message entries
//! spliced into the localization table) and can later remove it again,
//! preserving everything the mod author wrote.
//!
//! Lua is never parsed or executed. The engine only recognizes two local
//! structural conventions: the BEGIN/END sentinel block, and the returned
//! bracketed table literal with string-aware brace nesting.

pub mod backup;
pub mod error;
pub mod inject;
pub mod locate;
pub mod marker;
pub mod payload;
pub mod remove;

pub use backup::{BackupManager, BackupTag};
pub use error::{Error, ErrorKind, Result};
pub use inject::{Injector, InjectorConfig};
pub use locate::{InsertionPoint, locate_insertion};
pub use marker::{BEGIN_MARKER, END_MARKER, has_block};
pub use remove::{RemoveOutcome, remove_block};
