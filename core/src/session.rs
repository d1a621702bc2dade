// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Console Session
//!
//! Holds everything one console run works with: the resolved targets, the
//! broadcast settings, whether recovery mode is on and the reply listener.
//! [`Session::execute`] takes one command name plus its argument line and
//! returns an [`Outcome`] for the front end to print.

use std::path::{Path, PathBuf};

use camsh_common::config::Config;
use camsh_common::models::target::{self, Target};
use camsh_common::{error, warn};
use camsh_protocols::cgi::RequestLine;

use crate::commands::{self, CommandSpec, Handler};
use crate::dispatcher::{self, Dispatch, Dispatcher, TargetReply};
use crate::error::DispatchError;
use crate::listener::{BroadcastListener, ReplyReporter};
use crate::network::http::{Download, Exchange, HttpExchange};
use crate::recovery::RecoverySettings;
use crate::translator::{self, RawCommand};

/// What a command produced.
#[derive(Debug)]
pub enum Outcome {
    /// HTTP replies, one per target, in target order.
    Replies {
        request: RequestLine,
        replies: Vec<TargetReply>,
    },
    /// The datagram sent in recovery mode.
    Broadcast {
        request: RequestLine,
        payload: Vec<u8>,
    },
    /// A file fetched from the first target.
    Saved { target: Target, download: Download },
    /// Recovery mode was switched. `reply_port` is set while listening.
    RecoveryMode {
        enabled: bool,
        reply_port: Option<u16>,
    },
    /// A discovery datagram went out; replies arrive on `reply_port`.
    Discovery { reply_port: u16 },
}

pub struct Session<E: Exchange = HttpExchange> {
    targets: Vec<Target>,
    recovery: RecoverySettings,
    recovery_mode: bool,
    dispatcher: Dispatcher<E>,
    listener: BroadcastListener,
    download_dir: PathBuf,
}

impl Session<HttpExchange> {
    /// Builds a session from the startup configuration. With `recovery` set
    /// the reply listener is started right away; if that fails the session
    /// opens with recovery mode off.
    pub async fn open(cfg: &Config, reporter: ReplyReporter) -> anyhow::Result<Self> {
        let targets = target::resolve(&cfg.targets, &cfg.default_address);
        let exchange = HttpExchange::new(cfg.http_port)?;
        let mut session = Self::new(
            targets,
            RecoverySettings::from(cfg),
            exchange,
            BroadcastListener::new(reporter),
            cfg.download_dir.clone(),
        );

        if cfg.recovery {
            if let Err(e) = session.execute("net_recovery", "on").await {
                error!("failed to enter recovery mode: {e}");
            }
        }

        Ok(session)
    }
}

impl<E: Exchange> Session<E> {
    pub fn new(
        targets: Vec<Target>,
        recovery: RecoverySettings,
        exchange: E,
        listener: BroadcastListener,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            targets,
            recovery,
            recovery_mode: false,
            dispatcher: Dispatcher::new(exchange),
            listener,
            download_dir,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn recovery(&self) -> &RecoverySettings {
        &self.recovery
    }

    pub fn recovery_mode(&self) -> bool {
        self.recovery_mode
    }

    pub fn listener_port(&self) -> Option<u16> {
        self.listener.port()
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Runs one console command.
    ///
    /// Errors returned here concern the command as a whole (unknown name, bad
    /// usage, missing MAC). Failures of a single camera are reported inside
    /// [`Outcome::Replies`].
    pub async fn execute(&mut self, name: &str, args: &str) -> Result<Outcome, DispatchError> {
        let spec = commands::lookup(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        match spec.handler {
            Handler::Cgi => self.send(cgi_request(spec, args)).await,
            Handler::Login => self.send(translator::login(args)).await,
            Handler::Logout => self.send(translator::logout(args)).await,
            Handler::RawCommand => match translator::raw_command(args)? {
                RawCommand::Inline(request) => self.send(request).await,
                RawCommand::Upload { file, request } => Ok(self.upload(request, &file).await),
            },
            Handler::Firmware => {
                let (file, request) = translator::firmware(args)?;
                Ok(self.upload(request, &file).await)
            }
            Handler::Logfile => self.fetch_log().await,
            Handler::NetRecovery => self.switch_recovery(args).await,
            Handler::NetDiscovery => self.discover().await,
        }
    }

    /// Stops the reply listener, if any.
    pub async fn shutdown(&mut self) {
        self.listener.stop().await;
    }

    async fn send(&self, request: RequestLine) -> Result<Outcome, DispatchError> {
        let settings = self.recovery_mode.then_some(&self.recovery);
        match self
            .dispatcher
            .dispatch(&request, &self.targets, settings)
            .await?
        {
            Dispatch::Unicast(replies) => Ok(Outcome::Replies { request, replies }),
            Dispatch::Broadcast { payload } => Ok(Outcome::Broadcast { request, payload }),
        }
    }

    async fn upload(&self, request: RequestLine, file: &Path) -> Outcome {
        if self.recovery_mode {
            warn!("file uploads are not broadcast, sending {} over HTTP", request.path());
        }
        let replies = self.dispatcher.upload(&request, &self.targets, file).await;
        Outcome::Replies { request, replies }
    }

    async fn fetch_log(&self) -> Result<Outcome, DispatchError> {
        let target = self
            .targets
            .first()
            .ok_or_else(|| DispatchError::Usage("no camera to fetch the logfile from".into()))?;

        if self.recovery_mode {
            warn!("logfile is fetched over HTTP even in recovery mode");
        }

        let download = self
            .dispatcher
            .fetch(&translator::logfile(), target, &self.download_dir)
            .await?;

        Ok(Outcome::Saved {
            target: target.clone(),
            download,
        })
    }

    async fn switch_recovery(&mut self, args: &str) -> Result<Outcome, DispatchError> {
        let mut next = self.recovery.clone();
        let enabled = next.apply(args)?;

        if !enabled {
            self.recovery = next;
            self.recovery_mode = false;
            self.listener.stop().await;
            return Ok(Outcome::RecoveryMode {
                enabled,
                reply_port: None,
            });
        }

        let reply_port = self.restart_listener(&next).await?;
        self.recovery = next;
        self.recovery_mode = true;
        if self.recovery.mac_address().is_err() {
            warn!("recovery mode is on but no MAC address is set");
        }

        Ok(Outcome::RecoveryMode {
            enabled,
            reply_port: Some(reply_port),
        })
    }

    async fn discover(&mut self) -> Result<Outcome, DispatchError> {
        let settings = self.recovery.clone();
        let reply_port = self.restart_listener(&settings).await?;
        dispatcher::broadcast_discovery(&self.recovery).await?;
        Ok(Outcome::Discovery { reply_port })
    }

    /// An unusable port is refused before the running listener is touched.
    /// Once it has been stopped, a failed bind leaves no listener and recovery
    /// mode ends with it.
    async fn restart_listener(
        &mut self,
        settings: &RecoverySettings,
    ) -> Result<u16, DispatchError> {
        settings.reply_port()?;
        let started = self.listener.start(settings.port, &settings.magic).await;
        if started.is_err() && self.recovery_mode {
            self.recovery_mode = false;
            warn!("reply listener is down, recovery mode is off");
        }
        started
    }
}

fn cgi_request(spec: &CommandSpec, args: &str) -> RequestLine {
    translator::translate(spec.name, args, spec.infers_action)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
