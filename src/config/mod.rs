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

mod dirs;

use std::{
    env,
    fs::{create_dir_all, read_to_string, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use dirs::{config_dir, expand_home};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::providers::{HEADER_PATH, ProviderFlags};

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Config {
    /// Resolved against the directory of the config file.
    pub package_root: Option<PathBuf>,
    /// Relative to the package root unless absolute.
    pub header: Option<PathBuf>,
    pub apple: Option<bool>,
    pub google: Option<bool>,
}

impl Config {
    /// Loads the config at `path`, or at the default path if `None`.
    ///
    /// A missing file at an explicit path is an error. The default file is optional: if it is
    /// missing it is created with example contents when `init` is set, and if its location cannot
    /// be resolved or created the built-in defaults are used.
    pub fn from_file(path: Option<&Path>, init: bool) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::from_default_path(Self::default_path(), init),
        }
    }

    fn from_default_path(path: Option<PathBuf>, init: bool) -> Result<Self> {
        let Some(path) = path else {
            warn!("no config dir (HOME and XDG_CONFIG_HOME unset); using defaults");
            return Ok(Config::default());
        };
        if path.exists() {
            return Self::load(&path);
        }
        if !init {
            debug!(path = %path.display(), "no config; using defaults");
            return Ok(Config::default());
        }
        match Self::init_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "configuration not found; created one");
                Self::load(&path)
            }
            Err(e) => {
                warn!("{e:#}; using defaults");
                Ok(Config::default())
            }
        }
    }

    fn init_file(path: &Path) -> Result<()> {
        let dir = path.parent().context("invalid config path")?;
        create_dir_all(dir).with_context(|| format!("failed creating {}", dir.display()))?;
        write(path, serde_yaml::to_string(&SerConfig::example())?)
            .with_context(|| format!("failed writing {}", path.display()))
    }

    fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        let config = SerConfig::parse(&contents)
            .with_context(|| format!("failed parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        let base = path.parent().context("invalid config path")?;
        Self::from_ser_config(config, base)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        Self::from_ser_config(SerConfig::parse(s)?, Path::new("/a"))
    }

    /// Resolves the header to edit.
    ///
    /// `header` wins outright. Otherwise the configured (or default) header path is joined onto
    /// `package_root`, falling back to the configured root and then the working directory.
    pub fn header_path(&self, package_root: Option<&Path>, header: Option<&Path>) -> Result<PathBuf> {
        if let Some(header) = header {
            return Ok(header.into());
        }
        let root = match package_root.or(self.package_root.as_deref()) {
            Some(root) => root.to_path_buf(),
            None => env::current_dir().context("failed getting working directory")?,
        };
        let header = self.header.as_deref().unwrap_or(Path::new(HEADER_PATH));
        Ok(root.join(header))
    }

    /// Fills in provider flags not given on the command line from the config, then from
    /// [`ProviderFlags::default`].
    pub fn provider_flags(&self, apple: Option<bool>, google: Option<bool>) -> ProviderFlags {
        let default = ProviderFlags::default();
        ProviderFlags {
            apple: apple.or(self.apple).unwrap_or(default.apple),
            google: google.or(self.google).unwrap_or(default.google),
        }
    }

    fn from_ser_config(config: SerConfig, config_dir: &Path) -> Result<Self> {
        let package_root = config
            .package_root
            .map(|p| -> Result<PathBuf> {
                let mut path = expand_home(&p).context("expand_home failed")?;
                if path.is_relative() {
                    path = config_dir.join(path);
                }
                Ok(path)
            })
            .transpose()?;
        let header = config
            .header
            .map(|p| expand_home(&p).context("expand_home failed"))
            .transpose()?;
        Ok(Config {
            package_root,
            header,
            apple: config.apple,
            google: config.google,
        })
    }

    fn default_path() -> Option<PathBuf> {
        let mut path = config_dir()?;
        path.push("ssodefs");
        path.push("config.yaml");
        Some(path)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    header: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    apple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    google: Option<bool>,
}

impl SerConfig {
    fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(SerConfig::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    fn example() -> Self {
        let flags = ProviderFlags::default();
        SerConfig {
            package_root: None,
            header: Some(HEADER_PATH.into()),
            apple: Some(flags.apple),
            google: Some(flags.google),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn basic() -> Result<()> {
        let config = Config::from_str("apple: false\ngoogle: true\n")?;
        assert_eq!(Some(false), config.apple);
        assert_eq!(Some(true), config.google);
        assert_eq!(None, config.package_root);
        Ok(())
    }

    #[test]
    fn empty() -> Result<()> {
        assert_eq!(Config::default(), Config::from_str("")?);
        Ok(())
    }

    #[test]
    fn relative_package_root() -> Result<()> {
        let config = Config::from_str("package_root: pkg\nheader: Plugins/Constants.h\n")?;
        assert_eq!(Some(PathBuf::from("/a/pkg")), config.package_root);
        assert_eq!(
            PathBuf::from("/a/pkg/Plugins/Constants.h"),
            config.header_path(None, None)?
        );
        Ok(())
    }

    #[test]
    fn header_precedence() -> Result<()> {
        let config = Config::from_str("package_root: /pkg\n")?;
        assert_eq!(
            Path::new("/pkg").join(HEADER_PATH),
            config.header_path(None, None)?
        );
        assert_eq!(
            Path::new("/other").join(HEADER_PATH),
            config.header_path(Some(Path::new("/other")), None)?
        );
        assert_eq!(
            PathBuf::from("/x/h.h"),
            config.header_path(Some(Path::new("/other")), Some(Path::new("/x/h.h")))?
        );
        Ok(())
    }

    #[test]
    fn flag_precedence() -> Result<()> {
        let config = Config::from_str("google: true\n")?;
        assert_eq!(
            ProviderFlags {
                apple: true,
                google: true
            },
            config.provider_flags(None, None)
        );
        assert_eq!(
            ProviderFlags {
                apple: false,
                google: false
            },
            config.provider_flags(Some(false), Some(false))
        );
        assert_eq!(ProviderFlags::default(), Config::default().provider_flags(None, None));
        Ok(())
    }

    #[test]
    fn unknown_type_is_error() {
        assert!(Config::from_str("apple: maybe\n").is_err());
    }

    #[test]
    fn temp_config_file() -> Result<()> {
        let dir = TempDir::new()?;
        let mut config_file = NamedTempFile::new_in(dir.path())?;
        writeln!(config_file, "package_root: pkg")?;
        writeln!(config_file, "apple: false")?;
        let config = Config::from_file(Some(config_file.path()), false)?;
        assert_eq!(Some(dir.path().join("pkg")), config.package_root);
        assert_eq!(Some(false), config.apple);
        Ok(())
    }

    #[test]
    fn missing_explicit_file() -> Result<()> {
        let dir = TempDir::new()?;
        assert!(Config::from_file(Some(dir.path().join("nope.yaml").as_path()), true).is_err());
        Ok(())
    }

    #[test]
    fn no_config_dir_uses_defaults() -> Result<()> {
        assert_eq!(Config::default(), Config::from_default_path(None, true)?);
        Ok(())
    }

    #[test]
    fn blocked_config_dir_uses_defaults() -> Result<()> {
        let blocker = NamedTempFile::new()?;
        let path = blocker.path().join("ssodefs").join("config.yaml");
        assert_eq!(Config::default(), Config::from_default_path(Some(path.clone()), true)?);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn init_creates_default_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ssodefs").join("config.yaml");
        let config = Config::from_default_path(Some(path.clone()), true)?;
        assert!(path.exists());
        assert_eq!(Some(true), config.apple);
        assert_eq!(Some(false), config.google);
        Ok(())
    }

    #[test]
    fn no_init_leaves_default_path_alone() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ssodefs").join("config.yaml");
        assert_eq!(Config::default(), Config::from_default_path(Some(path.clone()), false)?);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn invalid_default_file_is_error() -> Result<()> {
        let mut config_file = NamedTempFile::new()?;
        writeln!(config_file, "apple: maybe")?;
        let err = Config::from_default_path(Some(config_file.path().into()), true).unwrap_err();
        assert!(format!("{err:#}").contains(&config_file.path().display().to_string()));
        Ok(())
    }

    #[test]
    fn example_parses() -> Result<()> {
        let s = serde_yaml::to_string(&SerConfig::example())?;
        let config = Config::from_str(&s)?;
        assert_eq!(
            ProviderFlags::default(),
            config.provider_flags(None, None)
        );
        assert_eq!(Some(PathBuf::from(HEADER_PATH)), config.header);
        Ok(())
    }
}
