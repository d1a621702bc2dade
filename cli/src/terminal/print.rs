// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::sync::OnceLock;

use crate::terminal::{banner, colors};
use anyhow::bail;
use camsh_common::config::Config;
use camsh_common::{error, reply, warn};
use camsh_common::models::target::Target;
use camsh_core::commands::CommandSpec;
use camsh_core::dispatcher::TargetReply;
use camsh_protocols::recovery::BroadcastReply;
use colored::*;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

#[macro_export]
macro_rules! cprint {
    () => {
        $crate::cprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "camsh::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

#[derive(Default)]
pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get_or_init(Self::default)
    }

    pub fn quiet() -> u8 {
        Self::get().q_level
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ CAMSH v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();
        let output: String = format!("{}{}{}", sep, text, sep);

        cprint!("{}", output);
        banner::print();
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            cprint!();
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        cprint!("{}", line);
    }

    /// Echoes the CGI path about to be requested.
    pub fn request(path: &str) {
        if Self::get().q_level > 1 {
            return;
        }
        print_status(format!("'{}'", path.color(colors::REQUEST)));
    }

    /// Prints the bodies in target order. A lone target prints its body bare,
    /// several targets prefix every body with the address.
    pub fn replies(replies: &[TargetReply]) {
        let single = replies.len() == 1;
        for reply in replies {
            let response = match &reply.result {
                Ok(response) => response,
                Err(e) if single => {
                    error!("{e}");
                    continue;
                }
                Err(e) => {
                    error!("{} : {e}", reply.target);
                    continue;
                }
            };

            if !(200..300).contains(&response.status) {
                warn!(verbosity = 1, "{} answered HTTP {}", reply.target, response.status);
            }
            if single {
                cprint!("{}", response.text());
            } else {
                cprint!("{} : {}", target(&reply.target), response.text());
            }
        }
    }

    /// Shows the datagram that went out in recovery mode.
    pub fn datagram(payload: &[u8]) {
        if Self::get().q_level > 1 {
            return;
        }
        for line in String::from_utf8_lossy(payload).lines() {
            print_status(line.color(colors::DATAGRAM).to_string());
        }
    }

    /// Renders a reply caught by the broadcast listener.
    pub fn broadcast_reply(reply: &BroadcastReply) {
        reply!("Received broadcast message from {}", reply.source);
        cprint!("{}", reply.text());
    }

    pub fn command_table(commands: &[CommandSpec]) {
        let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
        Self::header("commands");
        for spec in commands {
            aligned_line(spec.name, width, spec.summary);
        }
        aligned_line("help", width, "help [<command>]");
        aligned_line("exit", width, "leave the console (also quit or Ctrl-D)");
    }

    pub fn command_help(spec: &CommandSpec) {
        cprint!("{}", spec.help.unwrap_or(spec.summary));
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }
        cprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

pub fn target(target: &Target) -> ColoredString {
    target.to_string().color(colors::TARGET)
}

pub fn mac_address(mac: &str) -> ColoredString {
    mac.color(colors::MAC_ADDR)
}

pub fn aligned_line(key: &str, width: usize, value: &str) {
    let whitespace: String = ".".repeat((width + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        whitespace.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    print_status(format!(
        "{}{} {}",
        key.color(colors::PRIMARY),
        colon,
        value.color(colors::TEXT_DEFAULT)
    ));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    cprint!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    );
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    cprint!("{}{}{}", space, msg, space);
}
