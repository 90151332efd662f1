//! Filesystem layer for the Mod Update-Checker
//!
//! Provides classified I/O errors and safe write primitives.

pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{append_text, copy_file, read_text, write_atomic};
