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

mod support;

use integration_test_utils::{endpoint, feed_result, init_logging, source, ScriptedFeed};
use osc_streamer::{FeedError, FeedSource, OscArg, OscMessage, StreamerSettings};
use std::time::Duration;
use support::{start_streamer, subscribe};

// With the default 5s tick and 6s poll period, the first poll after startup runs at 10s.
const FIRST_POLL: Duration = Duration::from_secs(11);

#[tokio::test(start_paused = true)]
async fn new_results_are_pushed_in_feed_order_above_the_watermark() {
    init_logging();
    let feed = ScriptedFeed::new();
    feed.push(Ok(vec![feed_result(100, "old news")])).await;
    feed.push(Ok(vec![
        feed_result(100, "old news"),
        feed_result(99, "older news"),
        feed_result(103, "breaking"),
        feed_result(101, "fresh"),
    ]))
    .await;

    let (streamer, transport) = start_streamer(
        StreamerSettings::new("feed-order-test"),
        FeedSource::Client(feed.clone()),
    )
    .await;
    assert_eq!(streamer.bridge_health().map(|health| health.watermark), Some(100));

    subscribe(&transport, "twitter", 9100, "10.0.0.8:3000").await;
    tokio::time::sleep(FIRST_POLL).await;

    assert_eq!(
        transport.sent_to(&endpoint("10.0.0.8:9100")).await,
        vec![
            OscMessage::with_text("/AEffectLab/here/Twitter", "breaking"),
            OscMessage::with_text("/AEffectLab/here/Twitter", "fresh"),
        ]
    );

    let queries = feed.queries().await;
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].since_id, 1);
    assert_eq!(queries[1].since_id, 100);
    assert_eq!(queries[1].query, "#ficaadica OR aeLab");

    let health = streamer.bridge_health().expect("feed bridge should run");
    assert_eq!(health.watermark, 103);
    assert_eq!(health.delivered_total, 2);

    streamer.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn feed_results_do_not_reach_router_topic_subscribers() {
    init_logging();
    let feed = ScriptedFeed::new();
    feed.push(Ok(Vec::new())).await;
    feed.push(Ok(vec![feed_result(5, "only for twitter")])).await;

    let (streamer, transport) = start_streamer(
        StreamerSettings::new("feed-topic-test"),
        FeedSource::Client(feed),
    )
    .await;

    subscribe(&transport, "osc", 9200, "10.0.0.9:3000").await;
    tokio::time::sleep(FIRST_POLL).await;

    assert!(transport.sent_to(&endpoint("10.0.0.9:9200")).await.is_empty());
    assert_eq!(streamer.bridge_health().map(|health| health.watermark), Some(5));

    streamer.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_poll_is_retried_on_the_next_period() {
    init_logging();
    let feed = ScriptedFeed::new();
    feed.push(Ok(vec![feed_result(20, "seen")])).await;
    feed.push(Err(FeedError::Request("connection reset".to_string())))
        .await;
    feed.push(Ok(vec![feed_result(21, "after outage")])).await;

    let (streamer, transport) = start_streamer(
        StreamerSettings::new("feed-retry-test"),
        FeedSource::Client(feed.clone()),
    )
    .await;
    subscribe(&transport, "twitter", 9300, "10.0.0.10:3000").await;

    tokio::time::sleep(FIRST_POLL).await;
    let health = streamer.bridge_health().expect("feed bridge should run");
    assert_eq!(health.last_attempt_succeeded, Some(false));
    assert_eq!(health.watermark, 20);
    assert!(transport.sent().await.is_empty());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(
        transport.sent_to(&endpoint("10.0.0.10:9300")).await,
        vec![OscMessage::with_text("/AEffectLab/here/Twitter", "after outage")]
    );
    assert_eq!(feed.queries().await[2].since_id, 20);

    streamer.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn unauthenticated_feed_degrades_but_routing_keeps_working() {
    init_logging();
    let (streamer, transport) = start_streamer(
        StreamerSettings::new("degraded-feed-test"),
        FeedSource::Unauthenticated("token exchange rejected".to_string()),
    )
    .await;

    tokio::time::sleep(FIRST_POLL).await;
    let health = streamer.bridge_health().expect("feed bridge should run");
    assert_eq!(health.last_attempt_succeeded, Some(false));
    assert_eq!(
        health.last_error,
        Some(FeedError::Unauthenticated(
            "token exchange rejected".to_string()
        ))
    );
    assert_eq!(health.watermark, 1);

    subscribe(&transport, "osc", 9400, "10.0.0.11:3000").await;
    transport
        .deliver(
            OscMessage::new("/AEffectLab/here/kindB", vec![OscArg::Float(1.5)]),
            source("10.0.0.12:3000"),
        )
        .await;
    assert_eq!(
        transport.sent_to(&endpoint("10.0.0.11:9400")).await,
        vec![OscMessage::with_text("/AEffectLab/here/kindB", "1.5")]
    );

    streamer.shutdown().await;
}
