// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Table
//!
//! The fixed set of console commands. Each record names the handler that
//! builds the request and whether the translator may append an implicit
//! `action=get`/`action=set`.
//!
//! Lookup ignores case, so `Reboot`, `reboot` and `REBOOT` are the same command.

/// How a command turns its argument line into traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Plain CGI call through the translator.
    Cgi,
    /// `login`, with default credentials when no arguments are given.
    Login,
    /// `logout`, logging out `root` when no arguments are given.
    Logout,
    /// `cmd=...` inline, or `inp_file=... <file>` as a POST upload.
    RawCommand,
    /// POST upload of a firmware image.
    Firmware,
    /// Download of the camera log into a local file.
    Logfile,
    /// Switches recovery (broadcast) mode on or off.
    NetRecovery,
    /// Broadcasts a discovery datagram and listens for replies.
    NetDiscovery,
}

#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub handler: Handler,
    pub infers_action: bool,
    pub summary: &'static str,
    pub help: Option<&'static str>,
}

const fn cgi(name: &'static str, infers_action: bool, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        handler: Handler::Cgi,
        infers_action,
        summary,
        help: None,
    }
}

const fn special(name: &'static str, handler: Handler, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        handler,
        infers_action: false,
        summary,
        help: None,
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    special(
        "login",
        Handler::Login,
        "login user (without arguments supplies user=root&password=password)",
    ),
    special(
        "logout",
        Handler::Logout,
        "logout user (without arguments logs out root)",
    ),
    cgi("user", true, "change user password"),
    cgi("reset", false, "reset camera"),
    cgi("reboot", false, "reboot camera"),
    cgi("status", false, "print camera status"),
    cgi("device_info", true, "get or set device info"),
    cgi("date", true, "get or set date"),
    cgi("image", true, "get or set image"),
    cgi(
        "stream",
        true,
        "get or set stream (a leading number selects the stream, default 0)",
    ),
    cgi("roi", true, "get or set roi"),
    cgi("test", false, "execute test command"),
    cgi("snapshot", false, "get snapshot (snapshot send is not supported)"),
    special(
        "raw_command",
        Handler::RawCommand,
        "send raw command: cmd=<command> or inp_file=<name> <local file>",
    ),
    special(
        "firmware",
        Handler::Firmware,
        "send firmware, the rest of the line is the file name (HTTP only)",
    ),
    special(
        "logfile",
        Handler::Logfile,
        "fetch the camera logfile from the first camera (camera must be in test mode)",
    ),
    CommandSpec {
        name: "net_recovery",
        handler: Handler::NetRecovery,
        infers_action: false,
        summary: "switch between HTTP and broadcast recovery mode",
        help: Some(
            "net_recovery <on/off> [<mac_address>] [<port>] [<magic_bytes>]\n\
             \n\
             With recovery on, commands are broadcast to the camera owning\n\
             <mac_address> instead of being sent over HTTP. Replies are\n\
             printed as they arrive on <port> + 1.\n\
             Default port is 8000 and magic_bytes is 93d60153bbe87fc0ae09be1d8be26e84.",
        ),
    },
    CommandSpec {
        name: "net_discovery",
        handler: Handler::NetDiscovery,
        infers_action: false,
        summary: "broadcast a discovery packet (see net_recovery)",
        help: Some(
            "net_discovery\n\
             \n\
             Every camera with network recovery enabled replies as if\n\
             device_info?action=get was executed. Replies go to <port> + 1.",
        ),
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
