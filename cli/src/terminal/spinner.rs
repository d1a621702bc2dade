// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Terminal UI & Logging
//!
//! Wires `tracing` to the console and runs the spinner shown while cameras are
//! being contacted.
//!
//! The spinner alternates between a status line naming the command in flight
//! and a shuffled tip:
//!
//! * **0s - 2s**: Status (e.g., "Waiting for reboot on 2 cameras...")
//! * **2s - 5s**: Random tip
//! * **Repeat**
//!
//! Without a timeout on HTTP requests a silent camera keeps the spinner going
//! until the connection gives up on its own.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use camsh_common::insights;
use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::{IndicatifLayer, span_ext::IndicatifSpanExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::terminal::{colors, logging};

/// Total length of one text cycle (Status + Tip).
const CYCLE_MS: u128 = 5000;
/// How long the status message stays visible at the start of a cycle.
const STATUS_MS: u128 = 2000;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Installs the global subscriber: `RUST_LOG` (or the default filter), the
/// [`CamshFormatter`](logging::CamshFormatter) and the indicatif layer that
/// keeps log lines above the spinner.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")?.tick_strings(TICKS);
    let indicatif_layer = IndicatifLayer::new().with_progress_style(style);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,camsh=debug,hyper=warn,reqwest=warn"));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .event_format(logging::CamshFormatter {
            max_verbosity: verbosity,
        })
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(formatting_layer)
        .with(indicatif_layer)
        .try_init()?;

    Ok(())
}

async fn run_spinner_loop(span: Span, running: Arc<AtomicBool>, status: String) {
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let start_time = tokio::time::Instant::now();
    let mut last_text = String::new();

    let active_insights = insights::get_shuffled_insights();

    while running.load(Ordering::Relaxed) {
        interval.tick().await;

        let elapsed_ms = start_time.elapsed().as_millis();
        let cycle_time = elapsed_ms % CYCLE_MS;
        let tip = active_insights
            .get((elapsed_ms / CYCLE_MS) as usize % active_insights.len().max(1))
            .copied();

        let colored_msg: ColoredString = match tip {
            Some(tip) if cycle_time >= STATUS_MS => tip.italic().color(colors::TEXT_DEFAULT),
            _ => status.as_str().italic().color(colors::TEXT_DEFAULT),
        };

        let current_text = colored_msg.to_string();
        if current_text != last_text {
            span.pb_set_message(&current_text);
            last_text = current_text;
        }
    }
}

/// Keeps the spinner alive while held.
///
/// Dropping the guard stops the background task and clears the spinner line.
pub struct SpinnerGuard {
    running: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl SpinnerGuard {
    pub fn with_status(span: Span, status: String) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let run_clone = running.clone();

        let handle = tokio::spawn(async move {
            run_spinner_loop(span, run_clone, status).await;
        });

        Self { running, handle }
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.handle.abort();
    }
}
