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

use std::{io, path::PathBuf, process::ExitCode};

use clap::ValueEnum;
use thiserror::Error;
use tracing::debug;

/// Where a build was started from. Errors are tagged with it so the caller can decide how to
/// surface them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum BuildContext {
    /// A person pressed build.
    Interactive,
    /// An automated build pipeline.
    #[default]
    Pipeline,
}

impl BuildContext {
    fn label(self) -> &'static str {
        match self {
            BuildContext::Interactive => "build method failed",
            BuildContext::Pipeline => "build failed",
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            BuildContext::Interactive => ExitCode::from(1),
            BuildContext::Pipeline => ExitCode::from(2),
        }
    }
}

/// A fatal error that aborts the build.
#[derive(Debug, Error)]
#[error("{}: {}", .context.label(), .kind)]
pub(crate) struct BuildError {
    pub context: BuildContext,
    pub kind: ErrorKind,
}

#[derive(Debug, Error)]
pub(crate) enum ErrorKind {
    #[error(
        "File {} not found. Please make sure you build native ios before build unity.",
        .0.display()
    )]
    MissingHeader(PathBuf),

    #[error(
        "define {token} not found in file {}. Please make sure you build native code in xcode before building the app",
        .path.display()
    )]
    MissingDefine { token: &'static str, path: PathBuf },

    #[error("failed {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

impl ErrorKind {
    pub fn in_context(self, context: BuildContext) -> BuildError {
        BuildError {
            context,
            kind: self,
        }
    }
}

/// Exit code for failures before any header processing, such as a broken config.
const SETUP_FAILURE: u8 = 3;

/// Prints an error that stopped the tool before the build step and returns its exit code, which
/// never collides with a [`BuildContext`] code.
pub(crate) fn report_setup_failure(err: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {err:#}");
    ExitCode::from(SETUP_FAILURE)
}

impl BuildError {
    /// Prints the error for whoever started the build and returns the matching exit code.
    pub fn report(&self) -> ExitCode {
        debug!(context = ?self.context, "aborting build");
        eprintln!("{self}");
        self.context.exit_code()
    }
}
