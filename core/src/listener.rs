// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Background receiver for recovery replies.
//!
//! Cameras answer a broadcast on `port + 1`. The listener owns that socket on a
//! tokio task and hands every datagram to a reporter callback, so replies can
//! arrive while the console is waiting for input.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use camsh_common::{debug, warn};
use camsh_protocols::recovery::BroadcastReply;
use camsh_protocols::utils::MAX_DATAGRAM_LEN;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use crate::error::DispatchError;

pub type ReplyReporter = Arc<dyn Fn(BroadcastReply) + Send + Sync>;

/// How long a receive may block before the stop flag is checked again.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

struct ActiveListener {
    port: u16,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

pub struct BroadcastListener {
    active: Option<ActiveListener>,
    reporter: ReplyReporter,
    poll: Duration,
}

impl BroadcastListener {
    pub fn new(reporter: ReplyReporter) -> Self {
        Self {
            active: None,
            reporter,
            poll: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    pub fn is_listening(&self) -> bool {
        self.active.is_some()
    }

    pub fn port(&self) -> Option<u16> {
        self.active.as_ref().map(|active| active.port)
    }

    /// Listens on `base_port + 1`, replacing any listener already running.
    /// Replies not opening with `magic` are still reported, but flagged in the log.
    ///
    /// The socket is bound before this returns, so a bind failure surfaces to
    /// the caller and no reply sent afterwards can be missed.
    pub async fn start(&mut self, base_port: u16, magic: &str) -> Result<u16, DispatchError> {
        self.stop().await;

        let port = base_port
            .checked_add(1)
            .ok_or(DispatchError::InvalidPort(base_port))?;
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        let port = socket.local_addr()?.port();

        let stop = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(receive_loop(
            socket,
            magic.to_string(),
            stop.clone(),
            self.reporter.clone(),
            self.poll,
        ));

        debug!(verbosity = 1, "listening for recovery replies on udp/{port}");
        self.active = Some(ActiveListener { port, stop, handle });
        Ok(port)
    }

    /// Signals the receive task and waits for it to release the socket.
    pub async fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        active.stop.store(true, Ordering::Relaxed);
        if let Err(e) = active.handle.await
            && e.is_panic()
        {
            warn!("reply listener panicked: {e}");
        }
        debug!(verbosity = 1, "stopped listening on udp/{}", active.port);
    }
}

impl Drop for BroadcastListener {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.stop.store(true, Ordering::Relaxed);
            active.handle.abort();
        }
    }
}

async fn receive_loop(
    socket: UdpSocket,
    magic: String,
    stop: Arc<AtomicBool>,
    reporter: ReplyReporter,
    poll: Duration,
) {
    let mut buf = [0u8; MAX_DATAGRAM_LEN];

    while !stop.load(Ordering::Relaxed) {
        match tokio::time::timeout(poll, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, source))) => report(&reporter, &magic, source, &buf[..len]),
            Ok(Err(e)) => debug!(verbosity = 2, "recv failed: {e}"),
            Err(_) => continue,
        }
    }
}

fn report(reporter: &ReplyReporter, magic: &str, source: SocketAddr, payload: &[u8]) {
    let reply = BroadcastReply {
        source,
        payload: payload.to_vec(),
    };
    if reply.body(magic).is_none() {
        warn!(verbosity = 1, "reply from {source} does not carry the expected token");
    }
    reporter(reply);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
