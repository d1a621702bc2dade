// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Canonical Request Line
//!
//! The camera's CGI server and its recovery listener both accept the same
//! `<command>?<k=v>&<k=v>` string. Over HTTP it is appended to `/cgi-bin/`,
//! in a recovery broadcast it travels as the third line of the datagram.

use std::fmt;

use crate::utils::{CGI_ROOT, PARAM_SEPARATOR, QUERY_SEPARATOR};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLine {
    path: String,
    params: Vec<String>,
}

impl RequestLine {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(path: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The request path as sent over HTTP, e.g. `/cgi-bin/image?action=get`.
    pub fn http_path(&self) -> String {
        format!("{CGI_ROOT}{self}")
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.params.is_empty() {
            return Ok(());
        }
        write!(f, "{QUERY_SEPARATOR}")?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                write!(f, "{PARAM_SEPARATOR}")?;
            }
            f.write_str(param)?;
        }
        Ok(())
    }
}

/// The key of a `key=value` token. Bare tokens are their own key.
pub fn param_key(token: &str) -> &str {
    token.split_once('=').map_or(token, |(key, _)| key)
}

pub fn has_action<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens.iter().any(|token| param_key(token.as_ref()) == "action")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_has_no_query() {
        let line = RequestLine::new("status");
        assert_eq!(line.to_string(), "status");
        assert_eq!(line.http_path(), "/cgi-bin/status");
    }

    #[test]
    fn params_are_joined_with_ampersand() {
        let line = RequestLine::with_params("image", ["osd=true", "action=set"]);
        assert_eq!(line.to_string(), "image?osd=true&action=set");
        assert_eq!(line.http_path(), "/cgi-bin/image?osd=true&action=set");
    }

    #[test]
    fn empty_trailing_param_keeps_the_query_marker() {
        let line = RequestLine::with_params("image", [""]);
        assert_eq!(line.to_string(), "image?");
    }

    #[test]
    fn action_detection_uses_the_key_only() {
        assert!(has_action(&["osd=true", "action=get"]));
        assert!(has_action(&["action"]));
        assert!(!has_action(&["reaction=1", "osd=action"]));
        assert!(!has_action::<&str>(&[]));
    }

    #[test]
    fn param_key_of_bare_token() {
        assert_eq!(param_key("1"), "1");
        assert_eq!(param_key("id=1"), "id");
        assert_eq!(param_key("cmd=a=b"), "cmd");
    }
}
