// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Wire formats spoken with the camera.
//!
//! * [`cgi`]: the canonical request line shared by HTTP and recovery broadcasts.
//! * [`recovery`]: datagram framing for discovery, recovery and their replies.
//! * [`disposition`]: filename extraction from `Content-Disposition`.

pub mod cgi;
pub mod disposition;
pub mod recovery;
pub mod utils;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("malformed Content-Disposition header: '{0}'")]
    MalformedDisposition(String),
    #[error("reply of {0} bytes does not fit in a datagram")]
    ReplyTooLarge(usize),
}
