/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod commands;
mod config;
mod input;
mod view;

use connector::SessionStorage;
use std::process::exit;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let storage = match input::open_storage() {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("{:#}", e);
            exit(1);
        }
    };

    let log_level = config::log_level(Some(&*storage as &dyn SessionStorage));
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = commands::base::run_cli(storage).await {
        eprintln!("{:#}", e);
        exit(1);
    }
}
