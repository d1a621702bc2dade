// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use crate::ProtocolError;

/// Extracts the quoted filename from a header such as
/// `attachment; filename="camera.log"`.
///
/// The camera always quotes the name, so the first quoted segment is taken.
/// An unquoted or unterminated name is rejected.
pub fn filename(header: &str) -> Result<&str, ProtocolError> {
    let malformed = || ProtocolError::MalformedDisposition(header.to_string());

    let mut segments = header.split('"');
    let _before = segments.next();
    let name = segments.next().ok_or_else(malformed)?;
    // An unterminated quote leaves no segment after the name.
    segments.next().ok_or_else(malformed)?;

    if name.is_empty() {
        return Err(malformed());
    }
    Ok(name)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
