// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! The process arguments only seed the console session: which cameras to talk
//! to, how to reach them by broadcast and how loud the output is. Everything
//! else happens at the `camsh` prompt.
//!
//! [`CommandLine`] is translated into the core [`Config`] through
//! `From<&CommandLine>`, so the libraries never see clap types.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use camsh_common::config::{self, Config};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "camsh")]
#[command(version)]
#[command(about = "Interactive console for camera CGI control and broadcast recovery.")]
pub struct CommandLine {
    /// Comma-separated cameras, full or partial addresses (e.g. `58,59` or `7.58`)
    #[arg(value_name = "TARGETS", default_value = "")]
    pub targets: String,

    /// Address completing partial targets
    #[arg(long = "default-address", value_name = "IPV4", default_value = "192.168.6.58")]
    pub default_address: Ipv4Addr,

    /// TCP port of the camera CGI server
    #[arg(long = "http-port", default_value_t = config::DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    /// UDP port for recovery broadcasts, replies arrive on PORT + 1
    #[arg(short = 'p', long = "port", default_value_t = config::DEFAULT_BROADCAST_PORT)]
    pub port: u16,

    /// Magic token framing every broadcast
    #[arg(long = "magic", default_value = config::DEFAULT_MAGIC)]
    pub magic: String,

    /// MAC address of the camera addressed in recovery mode
    #[arg(short = 'm', long = "mac")]
    pub mac_address: Option<String>,

    /// Destination of recovery and discovery broadcasts
    #[arg(long = "broadcast", value_name = "IPV4", default_value = "255.255.255.255")]
    pub broadcast: Ipv4Addr,

    /// Start with recovery mode switched on
    #[arg(short = 'r', long = "recovery")]
    pub recovery: bool,

    /// Directory receiving fetched logfiles
    #[arg(long = "download-dir", value_name = "DIR", default_value = ".")]
    pub download_dir: PathBuf,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: no headers or spinner, -qq: bodies only)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Increase logging detail (-v: per camera progress, -vv: socket chatter)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            targets: cmd.targets.clone(),
            default_address: cmd.default_address.octets().map(|octet| octet.to_string()),
            http_port: cmd.http_port,
            broadcast_address: cmd.broadcast,
            broadcast_port: cmd.port,
            magic: cmd.magic.clone(),
            mac_address: cmd.mac_address.clone(),
            recovery: cmd.recovery,
            download_dir: cmd.download_dir.clone(),
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
