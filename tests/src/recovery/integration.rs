// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::net::Ipv4Addr;
use std::time::Duration;

use camsh_common::config::Config;
use camsh_core::DispatchError;
use camsh_core::session::{Outcome, Session};

use crate::utils::{FakeCamera, MAC, MAGIC, collector, wait_for};

fn config(camera: &FakeCamera, mac: Option<&str>) -> Config {
    Config {
        broadcast_address: Ipv4Addr::LOCALHOST,
        broadcast_port: camera.port(),
        magic: MAGIC.to_string(),
        mac_address: mac.map(String::from),
        recovery: true,
        ..Config::default()
    }
}

#[tokio::test]
async fn recovery_command_is_answered_on_the_reply_port() {
    let camera = FakeCamera::spawn(MAGIC, MAC).await.unwrap();
    let (reporter, seen) = collector();
    let mut session = Session::open(&config(&camera, Some(MAC)), reporter)
        .await
        .unwrap();

    assert!(session.recovery_mode());
    assert_eq!(session.listener_port(), Some(camera.port() + 1));

    let outcome = session.execute("image", "osd=true").await.unwrap();
    let Outcome::Broadcast { payload, .. } = outcome else {
        panic!("expected a broadcast");
    };
    assert_eq!(
        payload,
        format!("{MAGIC}\r\n{MAC}\r\nimage?osd=true&action=set\r\n").into_bytes()
    );

    let replies = wait_for(&seen, 1).await;
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].body(MAGIC),
        Some(format!("{MAC} ran image?osd=true&action=set").as_bytes())
    );

    session.shutdown().await;
}

#[tokio::test]
async fn mac_address_matches_regardless_of_case() {
    let camera = FakeCamera::spawn(MAGIC, MAC).await.unwrap();
    let (reporter, seen) = collector();
    let mut session = Session::open(&config(&camera, Some("00:11:22:33:44:55")), reporter)
        .await
        .unwrap();

    session
        .execute("net_recovery", "on 00:11:22:33:44:55")
        .await
        .unwrap();
    session.execute("reboot", "").await.unwrap();
    assert_eq!(wait_for(&seen, 1).await.len(), 1);

    session
        .execute("net_recovery", &format!("on {}", MAC.to_uppercase()))
        .await
        .unwrap();
    session.execute("reboot", "").await.unwrap();
    assert_eq!(wait_for(&seen, 2).await.len(), 2);

    session.shutdown().await;
}

#[tokio::test]
async fn other_cameras_stay_silent() {
    let camera = FakeCamera::spawn(MAGIC, MAC).await.unwrap();
    let (reporter, seen) = collector();
    let mut session = Session::open(&config(&camera, Some("aa:bb:cc:dd:ee:ff")), reporter)
        .await
        .unwrap();

    session.execute("reboot", "").await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(camera.received(), 1);
    assert!(seen.lock().unwrap().is_empty());

    session.shutdown().await;
}

#[tokio::test]
async fn recovery_without_mac_sends_nothing() {
    let camera = FakeCamera::spawn(MAGIC, MAC).await.unwrap();
    let (reporter, _) = collector();
    let mut session = Session::open(&config(&camera, None), reporter)
        .await
        .unwrap();

    assert!(matches!(
        session.execute("status", "").await,
        Err(DispatchError::MissingMacAddress)
    ));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(camera.received(), 0);

    session.shutdown().await;
}

#[tokio::test]
async fn discovery_reaches_every_enabled_camera() {
    let camera = FakeCamera::spawn(MAGIC, MAC).await.unwrap();
    let (reporter, seen) = collector();
    let cfg = Config {
        recovery: false,
        ..config(&camera, None)
    };
    let mut session = Session::open(&cfg, reporter).await.unwrap();
    assert_eq!(session.listener_port(), None);

    let outcome = session.execute("net_discovery", "").await.unwrap();
    assert!(matches!(outcome, Outcome::Discovery { reply_port } if reply_port == camera.port() + 1));

    let replies = wait_for(&seen, 1).await;
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].body(MAGIC),
        Some(format!("{MAC} ran device_info?action=get").as_bytes())
    );

    session.shutdown().await;
}

#[tokio::test]
async fn switching_recovery_on_twice_keeps_one_listener() {
    let camera = FakeCamera::spawn(MAGIC, MAC).await.unwrap();
    let (reporter, seen) = collector();
    let mut session = Session::open(&config(&camera, Some(MAC)), reporter)
        .await
        .unwrap();

    session.execute("net_recovery", "on").await.unwrap();
    session.execute("net_recovery", "on").await.unwrap();
    assert_eq!(session.listener_port(), Some(camera.port() + 1));

    session.execute("reboot", "").await.unwrap();
    let replies = wait_for(&seen, 1).await;
    // A second live listener would have duplicated the reply.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(replies.len(), 1);
    assert_eq!(seen.lock().unwrap().len(), 1);

    session.execute("net_recovery", "off").await.unwrap();
    assert_eq!(session.listener_port(), None);
}

#[tokio::test]
async fn busy_reply_port_opens_without_recovery() {
    let taken = tokio::net::UdpSocket::bind("0.0.0.0:0").await.unwrap();
    let cfg = Config {
        broadcast_address: Ipv4Addr::LOCALHOST,
        broadcast_port: taken.local_addr().unwrap().port() - 1,
        recovery: true,
        ..Config::default()
    };
    let (reporter, _) = collector();

    let session = Session::open(&cfg, reporter).await.unwrap();
    assert!(!session.recovery_mode());
    assert_eq!(session.listener_port(), None);
}
