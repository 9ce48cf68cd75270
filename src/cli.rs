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

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::error::BuildContext;

/// Toggle single sign-on provider defines in the iOS constants header before a build.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Config file to use instead of the default.
    #[arg(short, long, env = "SSODEFS_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Root of the package that ships the header.
    #[arg(long, env = "SSODEFS_PACKAGE_ROOT", value_name = "DIR", global = true)]
    pub package_root: Option<PathBuf>,

    /// Header to edit, overriding the package root and configured header path.
    #[arg(long, env = "SSODEFS_HEADER", value_name = "FILE", global = true)]
    pub header: Option<PathBuf>,

    /// Increase logging verbosity (-v = info, -vv = debug, -vvv = trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Enable or disable the provider defines for a build.
    Apply(ApplyArgs),

    /// Print the state of each provider define.
    Status,
}

#[derive(Debug, Args)]
pub(crate) struct ApplyArgs {
    /// Platform being built. Only ios builds touch the header.
    #[arg(long, value_enum, default_value_t = BuildTarget::Ios)]
    pub target: BuildTarget,

    /// What started the build; selects how failures are reported.
    #[arg(long, value_enum, default_value_t = BuildContext::Pipeline)]
    pub context: BuildContext,

    /// Enable Sign in with Apple.
    #[arg(long, env = "SSODEFS_APPLE", value_name = "BOOL")]
    pub apple: Option<bool>,

    /// Enable Sign in with Google.
    #[arg(long, env = "SSODEFS_GOOGLE", value_name = "BOOL")]
    pub google: Option<bool>,

    /// Print the rewritten header to stdout instead of writing it.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum BuildTarget {
    Ios,
    Android,
    Standalone,
    #[value(name = "webgl")]
    WebGl,
}

impl Cli {
    /// Filter directive for `tracing_subscriber::EnvFilter`, from `-q` and `-v`.
    pub fn log_level_filter(&self) -> String {
        let level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        format!("{}={level}", env!("CARGO_CRATE_NAME"))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli> {
        Ok(Cli::try_parse_from(["ssodefs"].iter().chain(args))?)
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_levels() -> Result<()> {
        let tests: [(&str, &[&str]); 5] = [
            ("ssodefs=warn", &["status"]),
            ("ssodefs=info", &["-v", "status"]),
            ("ssodefs=debug", &["status", "-vv"]),
            ("ssodefs=trace", &["-vvvv", "status"]),
            ("ssodefs=error", &["-q", "-vv", "status"]),
        ];
        for (want, args) in tests {
            assert_eq!(want, parse(args)?.log_level_filter(), "{args:?}");
        }
        Ok(())
    }

    #[test]
    fn apply_defaults() -> Result<()> {
        let Command::Apply(args) = parse(&["apply"])?.command else {
            panic!("expected apply");
        };
        assert_eq!(BuildTarget::Ios, args.target);
        assert_eq!(BuildContext::Pipeline, args.context);
        assert!(!args.dry_run);
        Ok(())
    }

    #[test]
    fn apply_flags() -> Result<()> {
        let cli = parse(&[
            "--package-root",
            "/pkg",
            "apply",
            "--target",
            "webgl",
            "--context",
            "interactive",
            "--apple",
            "false",
            "--google",
            "true",
            "-n",
        ])?;
        assert_eq!(Some(PathBuf::from("/pkg")), cli.package_root);
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(BuildTarget::WebGl, args.target);
        assert_eq!(BuildContext::Interactive, args.context);
        assert_eq!(Some(false), args.apple);
        assert_eq!(Some(true), args.google);
        assert!(args.dry_run);
        Ok(())
    }

    #[test]
    fn rejects_bad_bool() {
        assert!(parse(&["apply", "--apple", "maybe"]).is_err());
    }
}
