// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use camsh_protocols::ProtocolError;
use thiserror::Error;

/// Everything that can go wrong between a console line and a camera.
///
/// None of these end the session. Per-target variants are reported next to
/// the camera they belong to while the remaining cameras are still contacted.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("connection refused ({0})")]
    ConnectionRefused(String),

    /// The address could not even be turned into a URL, e.g. a mistyped octet.
    #[error("camera unreachable ({0})")]
    Unreachable(String),

    #[error("bad status line ({0})")]
    BadStatusLine(String),

    #[error("response interrupted ({0})")]
    Interrupted(String),

    #[error("missing mac_address, use 'net_recovery on <mac_address>'")]
    MissingMacAddress,

    #[error("unable to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("response carries no Content-Disposition header")]
    MissingDisposition,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("reply port {0} + 1 is out of range")]
    InvalidPort(u16),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        let detail = describe(&err);
        if err.is_builder() {
            Self::Unreachable(detail)
        } else if err.is_connect() {
            Self::ConnectionRefused(detail)
        } else if err.is_body() || err.is_decode() {
            Self::Interrupted(detail)
        } else {
            Self::BadStatusLine(detail)
        }
    }
}

/// reqwest keeps the interesting part (refused, parse error, ...) in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
