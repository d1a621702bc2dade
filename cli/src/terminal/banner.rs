// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;

use crate::cprint;
use crate::terminal::print::centerln;

const LOGO: &[&str] = &[
    r" ██████╗ █████╗ ███╗   ███╗███████╗██╗  ██╗",
    r"██╔════╝██╔══██╗████╗ ████║██╔════╝██║  ██║",
    r"██║     ███████║██╔████╔██║███████╗███████║",
    r"██║     ██╔══██║██║╚██╔╝██║╚════██║██╔══██║",
    r"╚██████╗██║  ██║██║ ╚═╝ ██║███████║██║  ██║",
    r" ╚═════╝╚═╝  ╚═╝╚═╝     ╚═╝╚══════╝╚═╝  ╚═╝",
];

const TAGLINE: &str = "cgi control & broadcast recovery";

pub fn print() {
    for line in LOGO {
        centerln(&line.bright_green().to_string());
    }
    centerln(&TAGLINE.bright_black().italic().to_string());
    cprint!();
}
