//! Preprocessor define toggling for `ssodefs`.
//!
//! This crate holds the pure half of ssodefs: given the lines of a C header, it enables or
//! disables a `#define` directive by rewriting every line that mentions it to either the bare
//! directive or the directive behind a `//` line comment. Nothing here touches the filesystem;
//! callers read the header into a [`HeaderFile`], toggle, and write it back themselves.

pub mod define;
pub mod fmt;
pub mod header;

pub use define::{DefineState, LINE_COMMENT, Toggled, define_state, set_define};
pub use header::HeaderFile;
