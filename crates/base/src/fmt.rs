use core::fmt::{Display, Formatter, Result};

/// Line terminator style of a text file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    /// Guesses the terminator of `s`: `CrLf` if any `"\r\n"` appears, otherwise `Lf`.
    pub fn detect(s: &str) -> Self {
        if s.contains("\r\n") {
            Newline::CrLf
        } else {
            Newline::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

impl Display for Newline {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.as_str())
    }
}

/// Wrapper type that formats an iterator as terminated lines: every item, including the last, is
/// followed by the given [`Newline`]. An empty iterator formats as the empty string.
pub struct Lines<I>(pub I, pub Newline);

impl<I> Display for Lines<I>
where
    I: Iterator + Clone,
    I::Item: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let Lines(lines, newline) = self;
        lines
            .clone()
            .try_fold((), |(), line| write!(f, "{line}{newline}"))
    }
}
