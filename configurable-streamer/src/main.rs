/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod config;

use crate::config::Config;
use clap::Parser;
use osc_streamer::{FeedSource, OscStreamer};
use search_feed_client::SearchFeedClient;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};
use udp_osc_transport::UdpOscTransport;

#[derive(Parser)]
#[command()]
struct StreamerArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

async fn build_feed_source(config: &Config) -> FeedSource {
    let Some(section) = &config.search_feed else {
        info!("No search_feed section configured; feed bridge disabled");
        return FeedSource::Disabled;
    };

    match SearchFeedClient::authenticate(section.client_config()).await {
        Ok(client) => FeedSource::Client(Arc::new(client)),
        Err(err) => {
            warn!("Search feed authentication failed, continuing without feed results: {err}");
            FeedSource::Unauthenticated(err.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started configurable-streamer");

    let args = StreamerArgs::parse();
    let contents = std::fs::read_to_string(&args.config)
        .map_err(|e| format!("Unable to read config file {}: {e}", args.config))?;
    let config =
        Config::from_json5(&contents).map_err(|e| format!("Unable to parse config file: {e}"))?;

    let transport = Arc::new(UdpOscTransport::bind(config.transport.bind_address).await?);
    let feed = build_feed_source(&config).await;

    let streamer = OscStreamer::start(config.streamer_settings(), transport.clone(), feed).await?;
    info!(
        "Streamer {} listening on {}",
        streamer.name(),
        transport.local_addr()
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    streamer.shutdown().await;
    transport.close().await;

    Ok(())
}
