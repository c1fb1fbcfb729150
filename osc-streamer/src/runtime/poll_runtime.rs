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

//! Background task that ticks the feed bridge until cancelled.

use crate::feed_bridge::polling_bridge::PollingBridge;
use crate::observability::{events, fields};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

const COMPONENT: &str = "poll_runtime";

/// Ticks `bridge` every `tick_interval` until `shutdown` is cancelled.
///
/// The bridge decides on each tick whether its poll period has elapsed, so the interval
/// only bounds how late a poll can start. A tick in progress finishes before the task
/// observes cancellation.
pub(crate) fn spawn_poll_loop(
    mut bridge: PollingBridge,
    tick_interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<PollingBridge> {
    tokio::spawn(async move {
        let topic = bridge.settings().topic.key().to_string();
        info!(
            event = events::POLL_LOOP_START,
            component = COMPONENT,
            topic = topic.as_str(),
            tick_interval_ms = tick_interval.as_millis() as u64,
            "starting feed poll loop"
        );

        let mut ticker = tokio::time::interval_at(Instant::now() + tick_interval, tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                tick_at = ticker.tick() => {
                    bridge.tick(tick_at).await;
                }
            }
        }

        info!(
            event = events::POLL_LOOP_STOP,
            component = COMPONENT,
            topic = topic.as_str(),
            reason = fields::REASON_CANCELLED,
            watermark = bridge.watermark(),
            "feed poll loop stopped"
        );
        bridge
    })
}
