// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Address used when no target is given, and the source of every octet a
/// partial target leaves out.
pub const DEFAULT_ADDRESS: [&str; 4] = ["192", "168", "6", "58"];

/// Port the cameras listen on for recovery broadcasts. Replies come back on `port + 1`.
pub const DEFAULT_BROADCAST_PORT: u16 = 8000;

/// Shared secret a camera expects on the first line of every broadcast.
pub const DEFAULT_MAGIC: &str = "93d60153bbe87fc0ae09be1d8be26e84";

pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Global configuration for a console session.
///
/// Built once from the command line. The recovery related fields only seed the
/// session; `net_recovery` may change them at runtime and nothing is written back.
#[derive(Debug, Clone)]
pub struct Config {
    /// Toggles the display of the startup banner.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): Banner, headers and the spinner while a camera is contacted.
    /// * **1**: Headers collapse to blank lines, no spinner.
    /// * **2**: Raw mode. Only response bodies and errors are printed.
    pub quiet: u8,

    /// Comma-separated list of full or partial camera addresses, e.g. `58,59` or `7.58`.
    pub targets: String,

    /// Octets used to complete partial targets.
    pub default_address: [String; 4],

    /// TCP port of the camera's CGI server.
    pub http_port: u16,

    /// Where recovery and discovery datagrams are sent.
    pub broadcast_address: Ipv4Addr,

    /// UDP port the cameras listen on. The reply listener binds `broadcast_port + 1`.
    pub broadcast_port: u16,

    /// Magic token framing every broadcast.
    pub magic: String,

    /// MAC address of the camera addressed in recovery mode.
    ///
    /// Forwarded verbatim; the camera compares it case-insensitively.
    pub mac_address: Option<String>,

    /// Start the session with recovery mode switched on.
    pub recovery: bool,

    /// Directory that receives files fetched with `logfile`.
    pub download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            targets: String::new(),
            default_address: DEFAULT_ADDRESS.map(String::from),
            http_port: DEFAULT_HTTP_PORT,
            broadcast_address: Ipv4Addr::BROADCAST,
            broadcast_port: DEFAULT_BROADCAST_PORT,
            magic: DEFAULT_MAGIC.to_string(),
            mac_address: None,
            recovery: false,
            download_dir: PathBuf::from("."),
        }
    }
}
