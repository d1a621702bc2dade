// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! HTTP exchange with a single camera.
//!
//! Requests are issued without any timeout: a camera that accepts the
//! connection and never answers stalls the console until it gives up.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use camsh_common::debug;
use camsh_protocols::disposition;
use reqwest::header::{CONTENT_DISPOSITION, HeaderValue};
use reqwest::{Body, Client, Response, Url};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::DispatchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    /// Raw body; snapshots and logs are not necessarily UTF-8.
    pub body: Bytes,
}

impl Reply {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path: PathBuf,
    pub bytes: u64,
}

/// One request/response round trip with a camera's CGI server.
///
/// `path` is always a full `/cgi-bin/...` path including the query.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn get(&self, host: &str, path: &str) -> Result<Reply, DispatchError>;

    async fn post(&self, host: &str, path: &str, body: File) -> Result<Reply, DispatchError>;

    /// GETs `path` and stores the body under the name the camera announces
    /// in `Content-Disposition`, inside `dir`.
    async fn download(&self, host: &str, path: &str, dir: &Path)
    -> Result<Download, DispatchError>;
}

#[derive(Debug, Clone)]
pub struct HttpExchange {
    http: Client,
    port: u16,
}

impl HttpExchange {
    pub fn new(port: u16) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(HeaderValue::from_static(concat!(
                "camsh/",
                env!("CARGO_PKG_VERSION")
            )))
            // Every request opens its own connection.
            .pool_max_idle_per_host(0)
            .build()
            .context("building HTTP client")?;
        Ok(Self { http, port })
    }

    /// Parameters go into the query verbatim apart from percent-encoding
    /// the characters a query cannot carry, so a `#` in a value reaches the
    /// camera instead of starting a fragment.
    fn url(&self, host: &str, path: &str) -> Result<Url, DispatchError> {
        let base = format!("http://{host}:{}", self.port);
        let mut url = Url::parse(&base)
            .map_err(|e| DispatchError::Unreachable(format!("{host}: {e}")))?;
        match path.split_once('?') {
            Some((path, query)) => {
                url.set_path(path);
                url.set_query(Some(query));
            }
            None => url.set_path(path),
        }
        Ok(url)
    }

    async fn read(response: Response) -> Result<Reply, DispatchError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(Reply { status, body })
    }
}

#[async_trait]
impl Exchange for HttpExchange {
    async fn get(&self, host: &str, path: &str) -> Result<Reply, DispatchError> {
        let url = self.url(host, path)?;
        debug!(verbosity = 1, "GET {url}");
        let response = self.http.get(url).send().await?;
        Self::read(response).await
    }

    async fn post(&self, host: &str, path: &str, body: File) -> Result<Reply, DispatchError> {
        let url = self.url(host, path)?;
        debug!(verbosity = 1, "POST {url}");
        let response = self
            .http
            .post(url)
            .body(Body::from(body))
            .send()
            .await?;
        Self::read(response).await
    }

    async fn download(
        &self,
        host: &str,
        path: &str,
        dir: &Path,
    ) -> Result<Download, DispatchError> {
        let url = self.url(host, path)?;
        debug!(verbosity = 1, "GET {url} (download)");
        let mut response = self.http.get(url).send().await?;

        let header = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .ok_or(DispatchError::MissingDisposition)?;
        let header = String::from_utf8_lossy(header.as_bytes()).into_owned();
        let name = disposition::filename(&header)?;

        // Never let the camera pick a directory.
        let file_name = Path::new(name).file_name().ok_or_else(|| {
            camsh_protocols::ProtocolError::MalformedDisposition(header.clone())
        })?;
        let path = dir.join(file_name);

        let mut file = File::create(&path).await?;
        let mut bytes: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(Download { path, bytes })
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
