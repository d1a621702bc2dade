// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Camera Target Model
//!
//! Turns the user's target list into complete camera addresses.
//!
//! Targets are written the way an operator thinks about a lab subnet: `58`
//! means "host 58 on the usual network", `7.58` means "host 58 on the
//! neighbouring /24". Missing octets are always the *leading* ones and are
//! borrowed from a default address.
//!
//! Octets are deliberately left unvalidated. Whatever the user typed ends up
//! in the URL, and a bad address surfaces as a connection failure for that
//! camera.
//!
//! Empty entries are the one exception: `58,,59` or a trailing comma does
//! not produce a camera. Completed, an empty entry would become
//! `192.168.6.`, and URL parsing accepts a trailing dot as a shortened IPv4
//! form (`192.168.0.6`), addressing some other host without any error.

use std::fmt;

use crate::{debug, success};

/// One camera's resolved address, e.g. `192.168.6.58`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    pub fn host(&self) -> &str {
        &self.0
    }

    /// The final octet, used to keep multi-camera prompts short.
    pub fn last_octet(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expands a comma-separated list of partial addresses into full targets.
///
/// Each entry is right-aligned against `default`: a 2-octet entry replaces
/// only the last two octets. Empty entries are skipped. A list with no
/// entries yields `default` itself, so the result is never empty.
pub fn resolve<S: AsRef<str>>(input: &str, default: &[S; 4]) -> Vec<Target> {
    let mut targets: Vec<Target> = input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let target = complete(entry, default);
            debug!(verbosity = 2, "Resolved '{entry}' to {target}");
            target
        })
        .collect();

    if targets.is_empty() {
        targets.push(complete("", default));
    }

    let len = targets.len();
    let unit = if len == 1 { "camera" } else { "cameras" };
    success!(verbosity = 1, "{len} {unit} targeted");

    targets
}

/// Overlays the given octets onto the end of the default address.
fn complete<S: AsRef<str>>(entry: &str, default: &[S; 4]) -> Target {
    let given: Vec<&str> = if entry.is_empty() {
        Vec::new()
    } else {
        entry.split('.').collect()
    };

    let mut octets: Vec<Option<&str>> = given.iter().copied().map(Some).collect();
    while octets.len() < 4 {
        octets.insert(0, None);
    }

    let filled: Vec<&str> = octets
        .into_iter()
        .enumerate()
        .map(|(idx, octet)| match octet {
            Some(octet) => octet,
            None => default[idx].as_ref(),
        })
        .collect();

    Target(filled.join("."))
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

    const SUBNET: [&str; 4] = ["192", "168", "6", "1"];

    fn hosts(targets: &[Target]) -> Vec<&str> {
        targets.iter().map(Target::host).collect()
    }

    #[test]
    fn test_single_octet_fills_from_default() {
        assert_eq!(hosts(&resolve("58", &SUBNET)), ["192.168.6.58"]);
    }

    #[test]
    fn test_partial_octets_are_right_aligned() {
        assert_eq!(hosts(&resolve("7.58", &SUBNET)), ["192.168.7.58"]);
        assert_eq!(hosts(&resolve("10.7.58", &SUBNET)), ["192.10.7.58"]);
    }

    #[test]
    fn test_full_address_is_kept() {
        assert_eq!(hosts(&resolve("10.0.0.5", &SUBNET)), ["10.0.0.5"]);
    }

    #[test]
    fn test_empty_input_yields_default() {
        assert_eq!(hosts(&resolve("", &SUBNET)), ["192.168.6.1"]);
        assert_eq!(hosts(&resolve("  ", &SUBNET)), ["192.168.6.1"]);
    }

    #[test]
    fn test_comma_list_keeps_order() {
        let targets = resolve("59, 58,7.60", &SUBNET);
        assert_eq!(
            hosts(&targets),
            ["192.168.6.59", "192.168.6.58", "192.168.7.60"]
        );
    }

    #[test]
    fn test_empty_entries_are_skipped() {
        assert_eq!(hosts(&resolve("58,,59,", &SUBNET)), ["192.168.6.58", "192.168.6.59"]);
        assert!(
            resolve(" 7.58 , , 59", &SUBNET)
                .iter()
                .all(|target| !target.host().ends_with('.'))
        );
    }

    #[test]
    fn test_only_separators_fall_back_to_default() {
        assert_eq!(hosts(&resolve(" , ,", &SUBNET)), ["192.168.6.1"]);
    }

    #[test]
    fn test_octets_are_not_validated() {
        assert_eq!(hosts(&resolve("cam.999", &SUBNET)), ["192.168.cam.999"]);
    }

    #[test]
    fn test_last_octet() {
        assert_eq!(Target::new("192.168.6.58").last_octet(), "58");
        assert_eq!(Target::new("camera").last_octet(), "camera");
    }

    proptest::proptest! {
        #[test]
        fn test_given_octets_always_end_the_address(
            given in proptest::collection::vec(0u8..=255, 0..=4)
        ) {
            let entry = given.iter().map(u8::to_string).collect::<Vec<_>>().join(".");
            let targets = resolve(&entry, &SUBNET);
            proptest::prop_assert_eq!(targets.len(), 1);

            let octets: Vec<&str> = targets[0].host().split('.').collect();
            proptest::prop_assert_eq!(octets.len(), 4);

            let kept = 4 - given.len();
            proptest::prop_assert_eq!(&octets[..kept], &SUBNET[..kept]);
            for (octet, expected) in octets[kept..].iter().zip(&given) {
                proptest::prop_assert_eq!(*octet, expected.to_string());
            }
        }
    }
}
