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

use osc_streamer::{Endpoint, FeedResult};
use std::net::SocketAddr;
use std::time::Duration;

/// Upper bound for waits on asynchronous deliveries in tests.
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(2);

/// Installs a global `tracing` subscriber once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parses `"host:port"` into a socket address; panics on malformed test input.
pub fn source(address: &str) -> SocketAddr {
    address
        .parse()
        .unwrap_or_else(|err| panic!("invalid test socket address {address}: {err}"))
}

/// Parses `"host:port"` into an [`Endpoint`].
pub fn endpoint(address: &str) -> Endpoint {
    Endpoint::from(source(address))
}

pub fn feed_result(id: u64, text: &str) -> FeedResult {
    FeedResult {
        id,
        text: text.to_string(),
        source_label: format!("author{id}"),
        created_at: None,
    }
}
