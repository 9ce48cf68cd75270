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

mod cli;
mod config;
mod error;
mod providers;

use std::{io, path::Path, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::{Cli, Command},
    config::Config,
    error::report_setup_failure,
    providers::{provider_states, run_build},
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_level_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run(cli).unwrap_or_else(|e| report_setup_failure(&e))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let init = matches!(cli.command, Command::Apply(_));
    let config = Config::from_file(cli.config.as_deref(), init)?;
    let header = config.header_path(cli.package_root.as_deref(), cli.header.as_deref())?;
    debug!(header = %header.display(), "resolved header");

    match cli.command {
        Command::Apply(args) => {
            let flags = config.provider_flags(args.apple, args.google);
            run_build(
                &header,
                args.target,
                flags,
                args.context,
                args.dry_run,
                &mut io::stdout().lock(),
            )
        }
        Command::Status => status(&header),
    }
}

fn status(header: &Path) -> Result<ExitCode> {
    println!("{}", header.display());
    for (provider, state) in provider_states(header)? {
        println!("{provider}\t{state}");
    }
    Ok(ExitCode::SUCCESS)
}
