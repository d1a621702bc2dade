// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Translator
//!
//! Turns the shorthand typed at the console into a [`RequestLine`].
//!
//! ## Shorthand Rules
//!
//! * **Action inference**: for commands that allow it, a line without an
//!   explicit `action=` gets `action=get` when it carries no parameters and
//!   `action=set` otherwise.
//! * **Stream id**: `stream 1 quality=50` becomes `stream?id=1&quality=50&...`.
//!   Without a leading number, `id=0` is prepended. Neither form counts as a
//!   real parameter for action inference.
//! * **Credentials**: `login` and `logout` without arguments fall back to the
//!   factory account and never infer an action.
//! * **File payloads**: `raw_command inp_file=...` and `firmware` name a local
//!   file that is POSTed instead of being encoded in the query.

use std::path::PathBuf;

use camsh_protocols::cgi::{self, RequestLine};

use crate::error::DispatchError;

const STREAM: &str = "stream";
const LOGIN: &str = "login";
const LOGOUT: &str = "logout";
const RAW_COMMAND: &str = "raw_command";
const FIRMWARE: &str = "firmware";
const TEST: &str = "test";

const DEFAULT_LOGIN: &str = "user=root&password=password";
const DEFAULT_LOGOUT: &str = "user=root";
const DEFAULT_STREAM_ID: &str = "id=0";

const ACTION_GET: &str = "action=get";
const ACTION_SET: &str = "action=set";

/// What `raw_command` turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCommand {
    /// `cmd=...`, sent like any other command.
    Inline(RequestLine),
    /// `inp_file=<name> <local file>`, POSTed over HTTP.
    Upload { file: PathBuf, request: RequestLine },
}

pub fn translate(command: &str, args: &str, infers_action: bool) -> RequestLine {
    let mut tokens: Vec<String> = args.split_whitespace().map(String::from).collect();
    let infer = infers_action && !cgi::has_action(&tokens);
    let mut real_params = tokens.len();

    if command == STREAM {
        if tokens.first().is_some_and(|first| is_numeric(first)) {
            let id = format!("id={}", tokens[0]);
            tokens[0] = id;
            real_params -= 1;
        } else {
            tokens.insert(0, DEFAULT_STREAM_ID.to_string());
        }
    }

    if infer {
        let action = if real_params == 0 { ACTION_GET } else { ACTION_SET };
        tokens.push(action.to_string());
    }

    RequestLine::with_params(command, tokens)
}

pub fn login(args: &str) -> RequestLine {
    with_default(LOGIN, args, DEFAULT_LOGIN)
}

pub fn logout(args: &str) -> RequestLine {
    with_default(LOGOUT, args, DEFAULT_LOGOUT)
}

pub fn raw_command(args: &str) -> Result<RawCommand, DispatchError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.first() {
        Some(first) if first.starts_with("cmd=") => {
            Ok(RawCommand::Inline(translate(RAW_COMMAND, args, false)))
        }
        Some(first) if first.starts_with("inp_file=") => {
            let file = tokens.get(1).ok_or_else(|| {
                DispatchError::Usage("inp_file= must be followed by a local file name".into())
            })?;
            Ok(RawCommand::Upload {
                file: PathBuf::from(file),
                request: RequestLine::with_params(RAW_COMMAND, [*first]),
            })
        }
        _ => Err(DispatchError::Usage("must have cmd= or inp_file=".into())),
    }
}

/// The whole argument line is the file name.
pub fn firmware(args: &str) -> Result<(PathBuf, RequestLine), DispatchError> {
    let file = args.trim();
    if file.is_empty() {
        return Err(DispatchError::Usage("firmware needs a file name".into()));
    }
    let request = RequestLine::with_params(FIRMWARE, [format!("file={file}")]);
    Ok((PathBuf::from(file), request))
}

pub fn logfile() -> RequestLine {
    RequestLine::with_params(TEST, ["logfile=1"])
}

fn with_default(command: &str, args: &str, default: &str) -> RequestLine {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.is_empty() {
        return RequestLine::with_params(command, [default]);
    }
    RequestLine::with_params(command, tokens)
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
