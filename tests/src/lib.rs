// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod http;
mod recovery;

pub mod utils {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use camsh_core::listener::ReplyReporter;
    use camsh_protocols::recovery::{self, BroadcastReply};
    use tokio::net::UdpSocket;
    use tokio::task::JoinHandle;

    pub const MAGIC: &str = "93d60153bbe87fc0ae09be1d8be26e84";
    pub const MAC: &str = "00:11:22:33:44:55";

    /// A camera with network recovery enabled, listening on loopback.
    ///
    /// Answers every datagram addressed to its MAC (or a bare discovery) with
    /// `<mac> ran <command>` on the sender's address at `port + 1`.
    pub struct FakeCamera {
        port: u16,
        received: Arc<AtomicUsize>,
        handle: JoinHandle<()>,
    }

    impl FakeCamera {
        pub async fn spawn(magic: &str, mac: &str) -> std::io::Result<Self> {
            let socket = UdpSocket::bind("127.0.0.1:0").await?;
            let port = socket.local_addr()?.port();
            let received = Arc::new(AtomicUsize::new(0));

            let counter = received.clone();
            let magic = magic.to_string();
            let mac = mac.to_string();
            let handle = tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                while let Ok((len, source)) = socket.recv_from(&mut buf).await {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let Some(command) = recovery::decode_request(&magic, &mac, &buf[..len]) else {
                        continue;
                    };
                    let body = format!("{mac} ran {command}");
                    if let Ok(reply) = recovery::encode_reply(&magic, body.as_bytes()) {
                        let to = SocketAddr::new(source.ip(), port + 1);
                        let _ = socket.send_to(&reply, to).await;
                    }
                }
            });

            Ok(Self {
                port,
                received,
                handle,
            })
        }

        pub fn port(&self) -> u16 {
            self.port
        }

        pub fn received(&self) -> usize {
            self.received.load(Ordering::SeqCst)
        }
    }

    impl Drop for FakeCamera {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    /// A reporter collecting every broadcast reply.
    pub fn collector() -> (ReplyReporter, Arc<Mutex<Vec<BroadcastReply>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter: ReplyReporter =
            Arc::new(move |reply: BroadcastReply| sink.lock().unwrap().push(reply));
        (reporter, seen)
    }

    /// Waits up to two seconds for `count` replies.
    pub async fn wait_for(seen: &Mutex<Vec<BroadcastReply>>, count: usize) -> Vec<BroadcastReply> {
        for _ in 0..80 {
            if seen.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        seen.lock().unwrap().clone()
    }
}
