// Copyright 2025 Steven Dee
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    env,
    ffi::OsStr,
    path::{Component, Path, PathBuf},
};

/// Directory holding per-user configuration: `$XDG_CONFIG_HOME`, `%APPDATA%` on Windows, or
/// `~/.config`.
pub(crate) fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Some(dir.into());
    }
    #[cfg(windows)]
    if let Some(dir) = env::var_os("APPDATA") {
        return Some(dir.into());
    }
    Some(home_dir()?.join(".config"))
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    if let Some(dir) = env::var_os("USERPROFILE") {
        return Some(dir.into());
    }
    env::var_os("HOME").map(PathBuf::from)
}

/// Replaces a leading `~` component with the home directory of `home`.
///
/// Returns `None` for `~user` paths, which are not supported.
pub(crate) fn expand_tilde(path: &Path, home: impl FnOnce() -> Option<PathBuf>) -> Option<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == OsStr::new("~") => {
            Some(home()?.join(components.as_path()))
        }
        Some(Component::Normal(first)) if first.to_str()?.starts_with('~') => None,
        _ => Some(path.to_path_buf()),
    }
}

pub(crate) fn expand_home(path: &Path) -> Option<PathBuf> {
    expand_tilde(path, home_dir)
}
