// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Transport Dispatcher
//!
//! Delivers a [`RequestLine`] to the cameras.
//!
//! * **Unicast**: one HTTP request per target, strictly in target order. A
//!   failing camera is recorded next to its address and the next camera is
//!   tried anyway.
//! * **Broadcast**: in recovery mode the line is wrapped in a recovery datagram
//!   and sent once. Replies are not awaited here; they show up on the
//!   [`listener`](crate::listener).

use std::path::Path;

use camsh_common::models::target::Target;
use camsh_common::{debug, warn};
use camsh_protocols::cgi::RequestLine;
use camsh_protocols::recovery;
use tokio::fs::File;

use crate::error::DispatchError;
use crate::network::broadcast;
use crate::network::http::{Download, Exchange, Reply};
use crate::recovery::RecoverySettings;

/// The outcome for one camera.
#[derive(Debug)]
pub struct TargetReply {
    pub target: Target,
    pub result: Result<Reply, DispatchError>,
}

#[derive(Debug)]
pub enum Dispatch {
    Unicast(Vec<TargetReply>),
    Broadcast { payload: Vec<u8> },
}

pub struct Dispatcher<E: Exchange> {
    exchange: E,
}

impl<E: Exchange> Dispatcher<E> {
    pub fn new(exchange: E) -> Self {
        Self { exchange }
    }

    /// Sends `request` by broadcast when `recovery` is given, over HTTP otherwise.
    ///
    /// Only the recovery precondition and local socket failures are returned as
    /// `Err`; per-camera failures live inside [`Dispatch::Unicast`].
    pub async fn dispatch(
        &self,
        request: &RequestLine,
        targets: &[Target],
        recovery: Option<&RecoverySettings>,
    ) -> Result<Dispatch, DispatchError> {
        match recovery {
            Some(settings) => {
                let payload = broadcast_request(request, settings).await?;
                Ok(Dispatch::Broadcast { payload })
            }
            None => Ok(Dispatch::Unicast(self.unicast(request, targets).await)),
        }
    }

    pub async fn unicast(&self, request: &RequestLine, targets: &[Target]) -> Vec<TargetReply> {
        let path = request.http_path();
        let mut replies = Vec::with_capacity(targets.len());

        for target in targets {
            let result = self.exchange.get(target.host(), &path).await;
            log_failure(target, &result);
            replies.push(TargetReply {
                target: target.clone(),
                result,
            });
        }

        replies
    }

    /// POSTs `file` to every target. The file is reopened for each camera so
    /// every upload streams it from the start.
    pub async fn upload(
        &self,
        request: &RequestLine,
        targets: &[Target],
        file: &Path,
    ) -> Vec<TargetReply> {
        let path = request.http_path();
        let mut replies = Vec::with_capacity(targets.len());

        for target in targets {
            let result = match File::open(file).await {
                Ok(body) => self.exchange.post(target.host(), &path, body).await,
                Err(source) => Err(DispatchError::FileOpen {
                    path: file.to_path_buf(),
                    source,
                }),
            };
            log_failure(target, &result);
            replies.push(TargetReply {
                target: target.clone(),
                result,
            });
        }

        replies
    }

    pub async fn fetch(
        &self,
        request: &RequestLine,
        target: &Target,
        dir: &Path,
    ) -> Result<Download, DispatchError> {
        self.exchange
            .download(target.host(), &request.http_path(), dir)
            .await
    }
}

/// Wraps `request` in a recovery datagram addressed to the configured MAC.
/// Nothing is sent when no MAC address is set.
pub async fn broadcast_request(
    request: &RequestLine,
    settings: &RecoverySettings,
) -> Result<Vec<u8>, DispatchError> {
    let mac_address = settings.mac_address()?;
    let payload = recovery::recovery_packet(&settings.magic, mac_address, request);
    broadcast::send(settings.destination(), &payload).await?;
    Ok(payload)
}

pub async fn broadcast_discovery(settings: &RecoverySettings) -> Result<Vec<u8>, DispatchError> {
    let payload = recovery::discovery_packet(&settings.magic);
    broadcast::send(settings.destination(), &payload).await?;
    Ok(payload)
}

fn log_failure<T>(target: &Target, result: &Result<T, DispatchError>) {
    match result {
        Ok(_) => debug!(verbosity = 1, "{target} answered"),
        Err(e) => warn!(verbosity = 1, "{target} failed: {e}"),
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
