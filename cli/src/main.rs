// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # camsh Entry Point
//!
//! Bootstraps logging and the terminal, turns the command line into a
//! [`Config`], opens the console [`Session`] and hands control to the prompt.
//!
//! This is the only error boundary that ends the process. Anything going wrong
//! inside a console command is printed and the prompt comes back; only a
//! failure to set up the session or to read stdin exits with a non-zero code.

mod commands;
mod console;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use camsh_common::{config::Config, error};
use camsh_core::listener::ReplyReporter;
use camsh_core::session::Session;
use camsh_protocols::recovery::BroadcastReply;

use crate::{
    commands::CommandLine,
    terminal::{print::Print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    if let Err(e) = spinner::init_logging(commands.verbosity) {
        eprintln!("failed to initialize logging: {e}");
    }

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let exit_code = match run(&cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}

async fn run(cfg: &Config) -> anyhow::Result<()> {
    let reporter: ReplyReporter = Arc::new(|reply: BroadcastReply| Print::broadcast_reply(&reply));
    let session = Session::open(cfg, reporter).await?;
    console::run(session).await
}
