// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The interactive loop.
//!
//! Reads one line at a time from stdin, hands `<command> <args>` to the
//! [`Session`] and prints the outcome. Nothing typed at the prompt can end the
//! process except `exit`, `quit` or end of input.

use anyhow::Context;
use camsh_common::models::target::Target;
use camsh_common::{error, info, success, warn};
use camsh_core::commands::{self, COMMANDS};
use camsh_core::session::{Outcome, Session};
use colored::*;
use console::Term;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info_span;

use crate::cprint;
use crate::terminal::colors;
use crate::terminal::print::{self, Print};
use crate::terminal::spinner::SpinnerGuard;

/// What the loop should do with one input line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Empty,
    Exit,
    Help(Option<&'a str>),
    Command { name: &'a str, args: &'a str },
}

fn parse(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Empty;
    }

    let (name, args) = line
        .split_once(char::is_whitespace)
        .map(|(name, args)| (name, args.trim_start()))
        .unwrap_or((line, ""));

    match name {
        "exit" | "quit" | "EOF" => Line::Exit,
        "help" | "?" => Line::Help(args.split_whitespace().next()),
        _ => Line::Command { name, args },
    }
}

/// The full address for a single camera, the last octets otherwise.
pub fn prompt(targets: &[Target]) -> String {
    match targets {
        [single] => format!("{single} > "),
        _ => {
            let octets: Vec<&str> = targets.iter().map(Target::last_octet).collect();
            format!("{} > ", octets.join(","))
        }
    }
}

pub async fn run(mut session: Session) -> anyhow::Result<()> {
    let term = Term::stdout();
    let prompt = prompt(session.targets());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        term.write_str(&prompt.color(colors::PRIMARY).to_string())
            .context("failed to write the prompt")?;

        let Some(input) = lines.next_line().await.context("failed to read stdin")? else {
            term.write_line("")?;
            break;
        };

        match parse(&input) {
            Line::Empty => {
                cprint!();
            }
            Line::Exit => break,
            Line::Help(topic) => help(topic),
            Line::Command { name, args } => execute(&mut session, name, args).await,
        }
    }

    session.shutdown().await;
    Ok(())
}

fn help(topic: Option<&str>) {
    match topic {
        None => Print::command_table(COMMANDS),
        Some(name) => match commands::lookup(name) {
            Some(spec) => Print::command_help(spec),
            None => warn!("no help for '{name}'"),
        },
    }
}

async fn execute(session: &mut Session, name: &str, args: &str) {
    let outcome = {
        let _spinner = spinner(session, name);
        session.execute(name, args).await
    };

    match outcome {
        Ok(outcome) => render(session, outcome),
        Err(e) => error!("{e}"),
    }
}

fn spinner(session: &Session, name: &str) -> Option<SpinnerGuard> {
    if Print::quiet() > 0 {
        return None;
    }

    let span = info_span!("command", indicatif.pb_show = true);
    let _enter = span.enter();

    let status = match session.targets() {
        [single] => format!("Waiting for {name} on {single}..."),
        targets => format!("Waiting for {name} on {} cameras...", targets.len()),
    };
    Some(SpinnerGuard::with_status(span.clone(), status))
}

fn render(session: &Session, outcome: Outcome) {
    match outcome {
        Outcome::Replies { request, replies } => {
            Print::request(&request.http_path());
            Print::replies(&replies);
        }
        Outcome::Broadcast { payload, .. } => {
            info!(
                "broadcast {} bytes to {}",
                payload.len(),
                session.recovery().destination()
            );
            Print::datagram(&payload);
        }
        Outcome::Saved { target, download } => success!(
            "Written {} ({} bytes) from {}",
            download.path.display(),
            download.bytes,
            print::target(&target)
        ),
        Outcome::RecoveryMode {
            enabled: true,
            reply_port,
        } => {
            let mac = session
                .recovery()
                .mac_address
                .as_deref()
                .map_or_else(|| "no MAC address".red(), print::mac_address);
            info!("recovery mode on, addressing {mac}");
            if let Some(port) = reply_port {
                info!("listening for broadcast replies on udp/{port}");
            }
        }
        Outcome::RecoveryMode { enabled: false, .. } => {
            info!("recovery mode off, commands go over HTTP")
        }
        Outcome::Discovery { reply_port } => {
            info!("discovery sent, listening for replies on udp/{reply_port}")
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
