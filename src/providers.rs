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

use core::fmt;
use std::{fs, io::Write, path::Path, process::ExitCode};

use anyhow::{Context, Result};
use ssodefs_base::{DefineState, HeaderFile};
use tracing::{debug, info};

use crate::{
    cli::BuildTarget,
    error::{BuildContext, BuildError, ErrorKind},
};

/// Location of the constants header relative to the package root.
pub(crate) const HEADER_PATH: &str = "Runtime/Plugins/iOS/ICSingleSignOnConstants.h";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Provider {
    Apple,
    Google,
}

impl Provider {
    /// Every provider, in the order its define is applied.
    pub const ALL: [Provider; 2] = [Provider::Apple, Provider::Google];

    pub fn token(self) -> &'static str {
        match self {
            Provider::Apple => "#define SIGN_IN_WITH_APPLE",
            Provider::Google => "#define SIGN_IN_WITH_GOOGLE",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Apple => "apple",
            Provider::Google => "google",
        })
    }
}

/// Desired state of each provider for one build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ProviderFlags {
    pub apple: bool,
    pub google: bool,
}

impl Default for ProviderFlags {
    fn default() -> Self {
        ProviderFlags {
            apple: true,
            google: false,
        }
    }
}

impl ProviderFlags {
    pub fn enabled(&self, provider: Provider) -> bool {
        match provider {
            Provider::Apple => self.apple,
            Provider::Google => self.google,
        }
    }
}

/// Rewrites the provider defines in `header` to match `flags`.
///
/// The header is read once and both defines are toggled in memory, Apple first. Nothing is
/// written unless every define was found, so a failed run leaves the file as it was. A file that
/// already matches is not rewritten.
pub(crate) fn update_provider_defines(
    header: &Path,
    flags: ProviderFlags,
    context: BuildContext,
    dry_run: bool,
) -> Result<HeaderFile, BuildError> {
    if !header.exists() {
        return Err(ErrorKind::MissingHeader(header.into()).in_context(context));
    }
    let contents = fs::read_to_string(header).map_err(|source| {
        ErrorKind::Io {
            action: "reading",
            path: header.into(),
            source,
        }
        .in_context(context)
    })?;

    let mut file = HeaderFile::parse(&contents);
    for provider in Provider::ALL {
        let active = flags.enabled(provider);
        if !file.set_define(provider.token(), active) {
            return Err(ErrorKind::MissingDefine {
                token: provider.token(),
                path: header.into(),
            }
            .in_context(context));
        }
        debug!(%provider, active, "set define");
    }

    let updated = file.to_string();
    if updated == contents {
        info!(header = %header.display(), "defines already up to date");
    } else if dry_run {
        info!(header = %header.display(), "dry run; not writing");
    } else {
        fs::write(header, updated).map_err(|source| {
            ErrorKind::Io {
                action: "writing",
                path: header.into(),
                source,
            }
            .in_context(context)
        })?;
        info!(header = %header.display(), "updated provider defines");
    }
    Ok(file)
}

/// Runs the pre-build step for `target` and returns the exit code for the build.
///
/// Only ios builds touch the header. Build errors are reported for their context rather than
/// returned; a dry run writes the rewritten header to `out`.
pub(crate) fn run_build(
    header: &Path,
    target: BuildTarget,
    flags: ProviderFlags,
    context: BuildContext,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<ExitCode> {
    if target != BuildTarget::Ios {
        info!(build_target = ?target, "not an ios build; leaving defines alone");
        return Ok(ExitCode::SUCCESS);
    }
    info!(apple = flags.apple, google = flags.google, "applying provider defines");
    match update_provider_defines(header, flags, context, dry_run) {
        Ok(file) => {
            if dry_run {
                write!(out, "{file}").context("failed writing dry run output")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(e.report()),
    }
}

/// Reads `header` and reports the state of each provider's define.
pub(crate) fn provider_states(header: &Path) -> Result<[(Provider, DefineState); 2]> {
    let contents = fs::read_to_string(header)
        .with_context(|| format!("failed reading {}", header.display()))?;
    let file = HeaderFile::parse(&contents);
    Ok(Provider::ALL.map(|provider| (provider, file.define_state(provider.token()))))
}
