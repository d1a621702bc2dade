// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Console usage hints.
const CONSOLE_TIPS: &[&str] = &[
    "No arguments means get, any argument means set",
    "A leading number on 'stream' selects the stream id",
    "Partial targets like '58,59' borrow the default subnet",
    "'net_discovery' makes every recovery-enabled camera answer",
    "Ctrl-D leaves the console",
    "Pass action=... yourself to skip the automatic one",
];

/// Camera and protocol trivia.
const CAMERA_TRIVIA: &[&str] = &[
    "CGI dates back to 1993 and the NCSA HTTPd server",
    "255.255.255.255 never leaves the local segment",
    "MJPEG is just a stream of JPEG frames, no inter-frame coding",
    "A MAC address is the one thing a lost camera always keeps",
];

/// Filler while a camera takes its time.
const WAITING_HUMOR: &[&str] = &[
    "UDP: I'd tell you a joke, but you might not get it",
    "The camera is thinking. Cameras rarely think",
    "Rebooting fixes most things, including cameras",
    "The 'S' in IoT stands for Security",
];

/// Generates a randomized list of spinner messages.
///
/// Every slot has a 50% probability of being a console tip and a 50%
/// probability of being flavor text, while both pools still have items left.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = CONSOLE_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut flavor: Vec<&str> = CAMERA_TRIVIA
        .iter()
        .chain(WAITING_HUMOR.iter())
        .copied()
        .collect();
    flavor.shuffle(&mut rng);

    let mut output = Vec::with_capacity(tips.len() + flavor.len());

    while !tips.is_empty() && !flavor.is_empty() {
        if rng.random_bool(0.5) {
            output.push(tips.remove(0));
        } else {
            output.push(flavor.remove(0));
        }
    }

    output.extend(tips);
    output.extend(flavor);
    output
}
