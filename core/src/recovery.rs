// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use camsh_common::config::Config;

use crate::error::DispatchError;

/// Everything needed to reach a camera by broadcast.
///
/// Survives `net_recovery off`, so switching recovery back on without
/// arguments reuses the last MAC address, port and token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverySettings {
    pub broadcast_address: Ipv4Addr,
    pub port: u16,
    pub magic: String,
    pub mac_address: Option<String>,
}

impl From<&Config> for RecoverySettings {
    fn from(cfg: &Config) -> Self {
        Self {
            broadcast_address: cfg.broadcast_address,
            port: cfg.broadcast_port,
            magic: cfg.magic.clone(),
            mac_address: cfg.mac_address.clone(),
        }
    }
}

impl RecoverySettings {
    pub fn destination(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.broadcast_address, self.port))
    }

    /// Cameras answer on the port right above the one they listen on.
    pub fn reply_port(&self) -> Result<u16, DispatchError> {
        self.port
            .checked_add(1)
            .ok_or(DispatchError::InvalidPort(self.port))
    }

    pub fn mac_address(&self) -> Result<&str, DispatchError> {
        self.mac_address
            .as_deref()
            .filter(|mac| !mac.is_empty())
            .ok_or(DispatchError::MissingMacAddress)
    }

    /// Applies `on|off [<mac_address>] [<port>] [<magic>]` and returns the
    /// requested mode. Nothing changes if the line is invalid.
    pub fn apply(&mut self, args: &str) -> Result<bool, DispatchError> {
        let params: Vec<&str> = args.split_whitespace().collect();
        let enabled = match params.first() {
            Some(&"on") => true,
            Some(&"off") => false,
            _ => {
                return Err(DispatchError::Usage(
                    "net_recovery <on/off> [<mac_address>] [<port>] [<magic_bytes>]".into(),
                ));
            }
        };

        let port = params
            .get(2)
            .map(|port| {
                port.parse::<u16>()
                    .map_err(|e| DispatchError::Usage(format!("invalid port '{port}': {e}")))
            })
            .transpose()?;

        if let Some(mac) = params.get(1) {
            self.mac_address = Some((*mac).to_string());
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(magic) = params.get(3) {
            self.magic = (*magic).to_string();
        }

        Ok(enabled)
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
