// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Command translation and transport for the camera console.
//!
//! A console line flows through three stages:
//!
//! 1. [`commands`] maps the command name to a handler record.
//! 2. [`translator`] turns the argument line into a [`RequestLine`].
//! 3. [`dispatcher`] sends it over HTTP to every target, or as a recovery
//!    broadcast when recovery mode is on.
//!
//! [`session::Session`] ties the stages together and owns the reply
//! [`listener`].
//!
//! [`RequestLine`]: camsh_protocols::cgi::RequestLine

pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod network;
pub mod recovery;
pub mod session;
pub mod translator;

pub use error::DispatchError;
