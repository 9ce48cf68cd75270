use core::fmt::{self, Display, Formatter};
use std::mem;

use crate::{
    define::{DefineState, define_state, set_define},
    fmt::{Lines, Newline},
};

/// In-memory contents of a header file, split into lines.
///
/// The file's line terminator is remembered so that writing it back with [`Display`] keeps the
/// same style. Output always ends every line with a terminator, whether or not the input did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderFile {
    pub lines: Vec<String>,
    pub newline: Newline,
}

impl HeaderFile {
    pub fn parse(contents: &str) -> Self {
        HeaderFile {
            lines: contents.lines().map(String::from).collect(),
            newline: Newline::detect(contents),
        }
    }

    /// Applies [`set_define`] in place, returning whether the token was found.
    pub fn set_define(&mut self, token: &str, active: bool) -> bool {
        let toggled = set_define(mem::take(&mut self.lines), token, active);
        self.lines = toggled.lines;
        toggled.found
    }

    pub fn define_state(&self, token: &str) -> DefineState {
        define_state(&self.lines, token)
    }
}

impl Display for HeaderFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Lines(self.lines.iter(), self.newline))
    }
}
