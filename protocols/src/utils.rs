// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

// HTTP
pub const CGI_ROOT: &str = "/cgi-bin/";
pub const QUERY_SEPARATOR: char = '?';
pub const PARAM_SEPARATOR: char = '&';
// Broadcast
pub const LINE_END: &str = "\r\n";
pub const MAX_DATAGRAM_LEN: usize = 1024;
