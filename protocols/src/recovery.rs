// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Broadcast Recovery Framing
//!
//! When a camera's IP configuration is broken it can still be reached by
//! broadcast. Every datagram is a sequence of `\r\n` terminated lines:
//!
//! | Datagram  | Lines                                   |
//! |-----------|-----------------------------------------|
//! | Discovery | `magic`                                 |
//! | Recovery  | `magic`, `mac address`, `request line`  |
//! | Reply     | `magic`, then the raw CGI response body |
//!
//! Requests go to the camera's broadcast port, replies come back on `port + 1`.
//! A discovery datagram is answered by every camera sharing the magic token as
//! if `device_info?action=get` had been issued.

use std::borrow::Cow;
use std::net::SocketAddr;

use crate::ProtocolError;
use crate::cgi::RequestLine;
use crate::utils::{LINE_END, MAX_DATAGRAM_LEN};

/// Command a camera runs when it receives a discovery datagram.
pub const DISCOVERY_COMMAND: &str = "device_info?action=get";

pub fn discovery_packet(magic: &str) -> Vec<u8> {
    format!("{magic}{LINE_END}").into_bytes()
}

pub fn recovery_packet(magic: &str, mac_address: &str, request: &RequestLine) -> Vec<u8> {
    format!("{magic}{LINE_END}{mac_address}{LINE_END}{request}{LINE_END}").into_bytes()
}

/// A datagram collected by the reply listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastReply {
    pub source: SocketAddr,
    pub payload: Vec<u8>,
}

impl BroadcastReply {
    /// The response body, if the payload opens with `magic`.
    pub fn body(&self, magic: &str) -> Option<&[u8]> {
        let mut lines = Lines::new(&self.payload);
        let token = lines.next_line()?;
        (token == magic.as_bytes()).then(|| lines.rest())
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

/// Camera side of the protocol: the command addressed to `mac_address`, if any.
///
/// MAC addresses compare case-insensitively. A datagram carrying only the
/// magic token is a discovery request.
pub fn decode_request(magic: &str, mac_address: &str, payload: &[u8]) -> Option<String> {
    let mut lines = Lines::new(payload);
    if lines.next_line()? != magic.as_bytes() {
        return None;
    }

    let target = lines.next_line().unwrap_or_default();
    let command = lines.next_line().unwrap_or_default();

    if target.is_empty() && command.is_empty() {
        return Some(DISCOVERY_COMMAND.to_string());
    }
    if !target.eq_ignore_ascii_case(mac_address.as_bytes()) || command.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(command).into_owned())
}

/// Camera side of the protocol: frames a response body for the reply port.
pub fn encode_reply(magic: &str, body: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let size = magic.len() + LINE_END.len() + body.len();
    if size >= MAX_DATAGRAM_LEN {
        return Err(ProtocolError::ReplyTooLarge(size));
    }

    let mut datagram = Vec::with_capacity(size);
    datagram.extend_from_slice(magic.as_bytes());
    datagram.extend_from_slice(LINE_END.as_bytes());
    datagram.extend_from_slice(body);
    Ok(datagram)
}

/// Walks `\r\n` terminated lines. A trailing fragment without terminator is not a line.
struct Lines<'a> {
    buf: &'a [u8],
}

impl<'a> Lines<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        let end = self.buf.windows(2).position(|w| w == LINE_END.as_bytes())?;
        let line = &self.buf[..end];
        self.buf = &self.buf[end + LINE_END.len()..];
        Some(line)
    }

    fn rest(&self) -> &'a [u8] {
        self.buf
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
