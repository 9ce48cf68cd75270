use core::fmt::{self, Display, Formatter};

/// Marker prepended to a directive to disable it. No space separates it from the directive.
pub const LINE_COMMENT: &str = "//";

/// Output of [`set_define`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggled {
    /// The input lines, with every line mentioning the token rewritten.
    pub lines: Vec<String>,

    /// Whether any line mentioned the token.
    pub found: bool,
}

/// State of a directive in a header, as reported by [`define_state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefineState {
    /// Every line mentioning the token is exactly the token.
    Enabled,
    /// Every line mentioning the token is exactly [`LINE_COMMENT`] followed by the token.
    Disabled,
    /// The token is mentioned, but not uniformly in one of the two forms above.
    Mixed,
    /// No line mentions the token.
    Missing,
}

impl Display for DefineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefineState::Enabled => "enabled",
            DefineState::Disabled => "disabled",
            DefineState::Mixed => "mixed",
            DefineState::Missing => "missing",
        })
    }
}

/// Enables or disables `token` in `lines`.
///
/// Every line containing `token` as a substring is replaced: with exactly `token` if `active`,
/// otherwise with [`LINE_COMMENT`] followed by `token`. Other lines are passed through untouched,
/// so the number of lines never changes. Applying the same `(token, active)` twice gives the same
/// result as applying it once.
///
/// An empty token matches nothing.
pub fn set_define<S>(lines: impl IntoIterator<Item = S>, token: &str, active: bool) -> Toggled
where
    S: Into<String>,
{
    let replacement = directive(token, active);
    let mut found = false;
    let lines = lines
        .into_iter()
        .map(|line| {
            let line = line.into();
            if mentions(&line, token) {
                found = true;
                replacement.clone()
            } else {
                line
            }
        })
        .collect();
    Toggled { lines, found }
}

/// Reports whether `token` is enabled, disabled, or missing in `lines`.
pub fn define_state<S: AsRef<str>>(lines: &[S], token: &str) -> DefineState {
    use DefineState::*;

    let disabled = directive(token, false);
    let mut state = Missing;
    for line in lines.iter().map(AsRef::as_ref) {
        if !mentions(line, token) {
            continue;
        }
        let this = if line == token {
            Enabled
        } else if line == disabled {
            Disabled
        } else {
            return Mixed;
        };
        state = match state {
            Missing => this,
            s if s == this => s,
            _ => return Mixed,
        };
    }
    state
}

fn directive(token: &str, active: bool) -> String {
    if active {
        token.to_string()
    } else {
        format!("{LINE_COMMENT}{token}")
    }
}

fn mentions(line: &str, token: &str) -> bool {
    !token.is_empty() && line.contains(token)
}
