// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::io::Write;

use camsh_common::config::Config;
use camsh_core::DispatchError;
use camsh_core::session::{Outcome, Session};
use wiremock::matchers::{body_bytes, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::utils::collector;

/// Config pointing every target at the mock server's port. Targets complete
/// from `127.0.0.x`, so `1` is the mock and `2` refuses connections.
fn config(server: &MockServer, targets: &str) -> Config {
    Config {
        targets: targets.to_string(),
        default_address: ["127", "0", "0", "1"].map(String::from),
        http_port: server.address().port(),
        ..Config::default()
    }
}

async fn open(cfg: &Config) -> Session {
    let (reporter, _) = collector();
    Session::open(cfg, reporter).await.unwrap()
}

fn replies(outcome: Outcome) -> Vec<Result<String, DispatchError>> {
    match outcome {
        Outcome::Replies { replies, .. } => replies
            .into_iter()
            .map(|reply| reply.result.map(|r| r.text().into_owned()))
            .collect(),
        other => panic!("expected HTTP replies, got {other:?}"),
    }
}

#[tokio::test]
async fn query_without_arguments_asks_for_current_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/image"))
        .and(query_param("action", "get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("osd=true"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "")).await;
    let outcome = session.execute("image", "").await.unwrap();

    let bodies = replies(outcome);
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].as_ref().unwrap(), "osd=true");
}

#[tokio::test]
async fn stream_id_and_action_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/stream"))
        .and(query_param("id", "1"))
        .and(query_param("encoder", "mjpeg"))
        .and(query_param("action", "set"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "1")).await;
    let outcome = session.execute("stream", "1 encoder=mjpeg").await.unwrap();

    assert_eq!(replies(outcome)[0].as_ref().unwrap(), "ok");
}

#[tokio::test]
async fn password_with_hash_arrives_whole() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/login"))
        .and(query_param("user", "root"))
        .and(query_param("password", "ab#cd"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "")).await;
    let outcome = session
        .execute("login", "user=root password=ab#cd")
        .await
        .unwrap();

    assert_eq!(replies(outcome)[0].as_ref().unwrap(), "welcome");
}

#[tokio::test]
async fn unreachable_camera_does_not_stop_the_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("up"))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "1,2,1")).await;
    let hosts: Vec<String> = session
        .targets()
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(hosts, ["127.0.0.1", "127.0.0.2", "127.0.0.1"]);

    let bodies = replies(session.execute("status", "").await.unwrap());
    assert_eq!(bodies.len(), 3);
    assert_eq!(bodies[0].as_ref().unwrap(), "up");
    assert!(matches!(bodies[1], Err(DispatchError::ConnectionRefused(_))));
    assert_eq!(bodies[2].as_ref().unwrap(), "up");
}

#[tokio::test]
async fn firmware_is_posted_to_every_camera() {
    let mut image = tempfile::NamedTempFile::new().unwrap();
    image.write_all(b"\x7fELF firmware").unwrap();
    let name = image.path().to_str().unwrap().to_string();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/firmware"))
        .and(query_param("file", name.as_str()))
        .and(body_bytes(b"\x7fELF firmware".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_string("flashed"))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "1,1")).await;
    let bodies = replies(session.execute("firmware", &name).await.unwrap());

    assert_eq!(bodies.len(), 2);
    for body in bodies {
        assert_eq!(body.unwrap(), "flashed");
    }
}

#[tokio::test]
async fn missing_upload_file_is_reported_per_camera() {
    let server = MockServer::start().await;
    let mut session = open(&config(&server, "1,1")).await;

    let bodies = replies(
        session
            .execute("raw_command", "inp_file=cfg.ini /no/such/cfg.ini")
            .await
            .unwrap(),
    );

    assert_eq!(bodies.len(), 2);
    for body in bodies {
        assert!(matches!(body, Err(DispatchError::FileOpen { .. })));
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn inline_raw_command_is_a_plain_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/raw_command"))
        .and(query_param("cmd", "uptime"))
        .respond_with(ResponseTemplate::new(200).set_body_string("42 days"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "")).await;
    let bodies = replies(session.execute("raw_command", "cmd=uptime").await.unwrap());

    assert_eq!(bodies[0].as_ref().unwrap(), "42 days");
}

#[tokio::test]
async fn logfile_lands_in_the_download_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/test"))
        .and(query_param("logfile", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Disposition", "attachment; filename=\"cam.log\"")
                .set_body_string("boot ok\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        download_dir: dir.path().to_path_buf(),
        ..config(&server, "1,2")
    };
    let mut session = open(&cfg).await;

    let Outcome::Saved { target, download } = session.execute("logfile", "").await.unwrap() else {
        panic!("expected a saved file");
    };

    assert_eq!(target.host(), "127.0.0.1");
    assert_eq!(download.path, dir.path().join("cam.log"));
    assert_eq!(download.bytes, 8);
    assert_eq!(std::fs::read_to_string(&download.path).unwrap(), "boot ok\n");
}

#[tokio::test]
async fn misquoted_disposition_is_an_error_not_a_crash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Disposition", "attachment; filename=cam.log")
                .set_body_string("boot ok\n"),
        )
        .mount(&server)
        .await;

    let mut session = open(&config(&server, "")).await;
    assert!(matches!(
        session.execute("logfile", "").await,
        Err(DispatchError::Protocol(_))
    ));

    // The session is still usable afterwards.
    assert!(session.execute("help", "").await.is_err());
    assert!(session.execute("reboot", "").await.is_ok());
}
