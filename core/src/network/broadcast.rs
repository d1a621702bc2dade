// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::{Ipv4Addr, SocketAddr};

use camsh_common::debug;
use tokio::net::UdpSocket;

use crate::error::DispatchError;

/// Sends one datagram from an ephemeral port with `SO_BROADCAST` set.
pub async fn send(destination: SocketAddr, payload: &[u8]) -> Result<usize, DispatchError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.set_broadcast(true)?;
    let sent = socket.send_to(payload, destination).await?;
    debug!(verbosity = 1, "Sent {sent} byte datagram to {destination}");
    Ok(sent)
}
